//! # View Registry
//!
//! Keeps the set of registered views and re-renders all of them whenever the
//! session changes.
//!
//! Views are addressed by [`ViewId`]. The registry never holds a reference to
//! the editor; it is passed to [`ViewRegistry::notify_all`] for the duration
//! of one refresh.

use std::fmt;

use sightline_core::SessionSnapshot;
use tracing::{trace, warn};

use crate::surface::Editor;
use crate::views::{RenderError, View};

/// Handle to a registered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId
{
    /// Id reported for views the registry does not own, such as the command log.
    pub(crate) const fn detached() -> Self
    {
        Self(0)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn raw(self) -> u64
    {
        self.0
    }
}

impl fmt::Display for ViewId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "view#{}", self.0)
    }
}

/// A view that failed during [`ViewRegistry::notify_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure
{
    pub view: ViewId,
    pub name: &'static str,
    pub error: RenderError,
}

impl fmt::Display for RenderFailure
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} view ({}) failed to render: {}", self.name, self.view, self.error)
    }
}

/// Ordered collection of views
#[derive(Default)]
pub struct ViewRegistry
{
    views: Vec<(ViewId, Box<dyn View>)>,
    next_id: u64,
}

impl ViewRegistry
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Add a view. It is rendered after every view registered before it.
    pub fn register(&mut self, view: Box<dyn View>) -> ViewId
    {
        self.next_id += 1;
        let id = ViewId(self.next_id);
        trace!(view = %id, name = view.name(), surface = %view.surface(), "view registered");
        self.views.push((id, view));
        id
    }

    /// Remove a view, handing it back. `None` if the id is unknown.
    pub fn unregister(&mut self, id: ViewId) -> Option<Box<dyn View>>
    {
        let index = self.views.iter().position(|(view_id, _)| *view_id == id)?;
        let (_, view) = self.views.remove(index);
        trace!(view = %id, name = view.name(), "view unregistered");
        Some(view)
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.views.is_empty()
    }

    /// Re-render every view in registration order
    ///
    /// A failing view does not stop the others. Each failure is logged and
    /// returned so front-ends can show it.
    pub fn notify_all(&mut self, snapshot: &SessionSnapshot, editor: &mut dyn Editor) -> Vec<RenderFailure>
    {
        let mut failures = Vec::new();
        for (id, view) in &mut self.views {
            if let Err(error) = view.render(snapshot, editor) {
                warn!(view = %id, name = view.name(), error = %error, "view failed to render");
                failures.push(RenderFailure {
                    view: *id,
                    name: view.name(),
                    error,
                });
            }
        }
        failures
    }
}

impl fmt::Debug for ViewRegistry
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let names: Vec<&str> = self.views.iter().map(|(_, view)| view.name()).collect();
        f.debug_struct("ViewRegistry").field("views", &names).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::surface::BufferEditor;
    use crate::views::{BreakpointsView, LocalsView};

    #[test]
    fn test_unregister_removes_view()
    {
        let mut registry = ViewRegistry::new();
        let first = registry.register(Box::new(BreakpointsView::new()));
        let second = registry.register(Box::new(LocalsView::new()));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);

        let removed = registry.unregister(first).unwrap();
        assert_eq!(removed.name(), "breakpoints");
        assert!(registry.unregister(first).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_notify_all_without_failures()
    {
        let mut registry = ViewRegistry::new();
        registry.register(Box::new(LocalsView::new()));
        let mut editor = BufferEditor::new();
        assert!(registry.notify_all(&SessionSnapshot::empty(), &mut editor).is_empty());
    }
}
