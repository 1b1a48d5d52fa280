//! # Views
//!
//! Passive projections of a [`SessionSnapshot`] onto one editor surface each.
//!
//! A view holds no debugger state. Every [`View::render`] re-derives the whole
//! surface from the snapshot it is given, so rendering twice without a state
//! change leaves the surface unchanged. The command log is the one exception:
//! it is append-only and owned by the
//! [`CommandDispatcher`](crate::dispatcher::CommandDispatcher).

use sightline_core::SessionSnapshot;
use thiserror::Error;

use crate::surface::{Editor, SurfaceError, SurfaceName};

pub mod breakpoints;
pub mod code;
pub mod command_log;
pub mod locals;

pub use breakpoints::BreakpointsView;
pub use code::{CodeView, SourceCache};
pub use command_log::{CommandLogView, PROMPT};
pub use locals::LocalsView;

/// Why a view could not render
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError
{
    /// The editor refused a surface operation.
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Convenience type alias for `Result<T, RenderError>`
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// A read-only observer of the session
pub trait View
{
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Surface this view draws into.
    fn surface(&self) -> SurfaceName;

    /// Redraw the surface from `snapshot`.
    ///
    /// ## Errors
    ///
    /// Returns `RenderError` when the editor rejects an operation. The surface
    /// may be partially drawn in that case.
    fn render(&mut self, snapshot: &SessionSnapshot, editor: &mut dyn Editor) -> RenderResult<()>;
}

/// Clear `name` and write `lines` into it, one surface line each.
pub(crate) fn redraw<I>(editor: &mut dyn Editor, name: SurfaceName, lines: I) -> RenderResult<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let surface = editor.surface(name)?;
    surface.clear()?;
    for line in lines {
        surface.append_line(line.as_ref())?;
    }
    Ok(())
}
