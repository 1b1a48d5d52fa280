use sightline_core::SessionSnapshot;

use super::{redraw, RenderResult, View};
use crate::surface::{Editor, SurfaceName};

/// Lists every resolved breakpoint location as `file:line:column`
#[derive(Debug, Default)]
pub struct BreakpointsView;

impl BreakpointsView
{
    #[must_use]
    pub fn new() -> Self
    {
        Self
    }
}

impl View for BreakpointsView
{
    fn name(&self) -> &'static str
    {
        "breakpoints"
    }

    fn surface(&self) -> SurfaceName
    {
        SurfaceName::Breakpoints
    }

    fn render(&mut self, snapshot: &SessionSnapshot, editor: &mut dyn Editor) -> RenderResult<()>
    {
        redraw(editor, self.surface(), snapshot.breakpoints.iter().map(ToString::to_string))
    }
}

#[cfg(test)]
mod tests
{
    use sightline_core::SourceLocation;

    use super::*;
    use crate::surface::BufferEditor;

    #[test]
    fn test_one_line_per_location()
    {
        let mut snapshot = SessionSnapshot::empty();
        snapshot.breakpoints = vec![SourceLocation::new("main.c", 9, 3), SourceLocation::new("main.c", 3, 3)];

        let mut editor = BufferEditor::new();
        BreakpointsView::new().render(&snapshot, &mut editor).unwrap();
        assert_eq!(editor.lines(SurfaceName::Breakpoints), &["main.c:9:3".to_string(), "main.c:3:3".to_string()]);
    }
}
