//! # Workbench
//!
//! The controller a host editor talks to. It owns one [`Session`], the
//! [`ViewRegistry`], the [`CommandDispatcher`] and the editor itself, and
//! pairs every session mutation with a view refresh.
//!
//! ## Refresh policy
//!
//! | Operation | Views refreshed |
//! |-----------|-----------------|
//! | `create_target`, `launch`, `step_into`, `continue_`, `kill` | on success |
//! | `submit` | always |
//! | `add_breakpoint` | never (call [`Workbench::refresh`]) |
//!
//! Render failures never abort an operation. They are collected and can be
//! drained with [`Workbench::take_diagnostics`].

use std::path::Path;

use sightline_core::types::{BreakpointHandle, CommandOutput, ProcessHandle, TargetHandle};
use sightline_core::{Backend, Session, SessionResult};
use tracing::warn;

use crate::dispatcher::CommandDispatcher;
use crate::registry::{RenderFailure, ViewId, ViewRegistry};
use crate::surface::Editor;
use crate::views::{BreakpointsView, CodeView, LocalsView, SourceCache, View};

/// Session, views and editor bundled behind one handle
#[derive(Debug)]
pub struct Workbench<B: Backend, E: Editor>
{
    session: Session<B>,
    registry: ViewRegistry,
    dispatcher: CommandDispatcher,
    editor: E,
    diagnostics: Vec<RenderFailure>,
}

impl<B: Backend, E: Editor> Workbench<B, E>
{
    /// Workbench with no views registered; the command log prompt is seeded.
    pub fn new(session: Session<B>, editor: E) -> Self
    {
        let mut workbench = Self {
            session,
            registry: ViewRegistry::new(),
            dispatcher: CommandDispatcher::new(),
            editor,
            diagnostics: Vec::new(),
        };
        if let Err(e) = workbench.dispatcher.seed(&mut workbench.editor) {
            warn!(error = %e, "failed to seed the command log");
        }
        workbench
    }

    /// Workbench with the breakpoints, locals and code views registered.
    pub fn with_default_views(session: Session<B>, editor: E, sources: SourceCache) -> Self
    {
        let mut workbench = Self::new(session, editor);
        workbench.register(Box::new(BreakpointsView::new()));
        workbench.register(Box::new(LocalsView::new()));
        workbench.register(Box::new(CodeView::new(sources)));
        workbench.refresh();
        workbench
    }

    /// Add a view. It is not rendered until the next refresh.
    pub fn register(&mut self, view: Box<dyn View>) -> ViewId
    {
        self.registry.register(view)
    }

    /// Remove a view.
    pub fn unregister(&mut self, id: ViewId) -> Option<Box<dyn View>>
    {
        self.registry.unregister(id)
    }

    #[must_use]
    pub fn session(&self) -> &Session<B>
    {
        &self.session
    }

    #[must_use]
    pub fn editor(&self) -> &E
    {
        &self.editor
    }

    /// Mutable editor access for host-side edits such as typing at the prompt.
    pub fn editor_mut(&mut self) -> &mut E
    {
        &mut self.editor
    }

    /// See [`Session::create_target`].
    ///
    /// ## Errors
    ///
    /// Propagates the session error; views are not refreshed.
    pub fn create_target(&mut self, path: impl AsRef<Path>) -> SessionResult<TargetHandle>
    {
        let target = self.session.create_target(path)?;
        self.refresh();
        Ok(target)
    }

    /// See [`Session::add_breakpoint`]. Views are not refreshed.
    ///
    /// ## Errors
    ///
    /// Propagates the session error.
    pub fn add_breakpoint(&mut self, spec: &str) -> SessionResult<BreakpointHandle>
    {
        self.session.add_breakpoint(spec)
    }

    /// See [`Session::launch`].
    ///
    /// ## Errors
    ///
    /// Propagates the session error; views are not refreshed.
    pub fn launch(&mut self) -> SessionResult<ProcessHandle>
    {
        let process = self.session.launch()?;
        self.refresh();
        Ok(process)
    }

    /// See [`Session::step_into`].
    ///
    /// ## Errors
    ///
    /// Propagates the session error; views are not refreshed.
    pub fn step_into(&mut self) -> SessionResult<()>
    {
        self.session.step_into()?;
        self.refresh();
        Ok(())
    }

    /// See [`Session::continue_`].
    ///
    /// ## Errors
    ///
    /// Propagates the session error; views are not refreshed.
    pub fn continue_(&mut self) -> SessionResult<()>
    {
        self.session.continue_()?;
        self.refresh();
        Ok(())
    }

    /// See [`Session::kill`].
    ///
    /// ## Errors
    ///
    /// Propagates the session error; views are not refreshed.
    pub fn kill(&mut self) -> SessionResult<()>
    {
        self.session.kill()?;
        self.refresh();
        Ok(())
    }

    /// Submit a console line. See [`CommandDispatcher::submit`].
    pub fn submit(&mut self, raw: &str) -> CommandOutput
    {
        let submission = self
            .dispatcher
            .submit(raw, &mut self.session, &mut self.registry, &mut self.editor);
        self.diagnostics.extend(submission.failures);
        submission.output
    }

    /// Re-render every registered view from a fresh snapshot.
    pub fn refresh(&mut self)
    {
        let snapshot = self.session.snapshot();
        let failures = self.registry.notify_all(&snapshot, &mut self.editor);
        self.diagnostics.extend(failures);
    }

    /// Drain the render failures collected so far.
    pub fn take_diagnostics(&mut self) -> Vec<RenderFailure>
    {
        std::mem::take(&mut self.diagnostics)
    }
}
