use sightline_core::SessionSnapshot;

use super::{redraw, RenderResult, View};
use crate::surface::{Editor, SurfaceName};

/// Shows the current frame's locals as `(type) name = value`
///
/// Empty whenever the process is not stopped.
#[derive(Debug, Default)]
pub struct LocalsView;

impl LocalsView
{
    #[must_use]
    pub fn new() -> Self
    {
        Self
    }
}

impl View for LocalsView
{
    fn name(&self) -> &'static str
    {
        "locals"
    }

    fn surface(&self) -> SurfaceName
    {
        SurfaceName::Variables
    }

    fn render(&mut self, snapshot: &SessionSnapshot, editor: &mut dyn Editor) -> RenderResult<()>
    {
        redraw(editor, self.surface(), snapshot.locals.iter().map(ToString::to_string))
    }
}
