//! Append-only console transcript.
//!
//! Unlike the other views the log is never cleared by a render. A turn looks
//! like this on the surface:
//!
//! ```text
//! (lldb) foo                               <- typed by the user
//! error: 'foo' is not a valid command.     <- stdout lines, then stderr lines
//! (lldb)                                   <- fresh prompt
//! ```

use sightline_core::types::CommandOutput;
use sightline_core::SessionSnapshot;

use super::{RenderResult, View};
use crate::surface::{Cursor, Editor, SurfaceName};

/// Prompt written at the start of every input line.
pub const PROMPT: &str = "(lldb) ";

/// Console transcript on the `command_line` surface
#[derive(Debug, Default)]
pub struct CommandLogView;

impl CommandLogView
{
    #[must_use]
    pub fn new() -> Self
    {
        Self
    }

    /// Append the output of one command and a fresh prompt, then park the
    /// cursor just after that prompt.
    ///
    /// ## Errors
    ///
    /// Returns `RenderError` when the editor rejects an operation.
    pub fn append_turn(&mut self, output: &CommandOutput, editor: &mut dyn Editor) -> RenderResult<()>
    {
        let surface = editor.surface(self.surface())?;
        for line in output.lines() {
            surface.append_line(line)?;
        }
        surface.append_line(PROMPT)?;
        surface.set_cursor(Cursor {
            line: surface.line_count(),
            column: PROMPT.len() + 1,
        })?;
        Ok(())
    }
}

impl View for CommandLogView
{
    fn name(&self) -> &'static str
    {
        "command_log"
    }

    fn surface(&self) -> SurfaceName
    {
        SurfaceName::CommandLine
    }

    /// Seeds the first prompt; a non-empty log is left alone.
    fn render(&mut self, _snapshot: &SessionSnapshot, editor: &mut dyn Editor) -> RenderResult<()>
    {
        let surface = editor.surface(self.surface())?;
        if surface.line_count() == 0 {
            surface.append_line(PROMPT)?;
            surface.set_cursor(Cursor {
                line: 1,
                column: PROMPT.len() + 1,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::surface::BufferEditor;

    #[test]
    fn test_render_seeds_prompt_once()
    {
        let mut editor = BufferEditor::new();
        let mut view = CommandLogView::new();
        view.render(&SessionSnapshot::empty(), &mut editor).unwrap();
        view.render(&SessionSnapshot::empty(), &mut editor).unwrap();
        assert_eq!(editor.lines(SurfaceName::CommandLine), &[PROMPT.to_string()]);
    }

    #[test]
    fn test_turn_splits_multiline_output()
    {
        let mut editor = BufferEditor::new();
        let mut view = CommandLogView::new();
        view.render(&SessionSnapshot::empty(), &mut editor).unwrap();

        let output = CommandOutput {
            stdout: "one\ntwo\n".to_string(),
            stderr: "error: three\n".to_string(),
        };
        view.append_turn(&output, &mut editor).unwrap();
        assert_eq!(
            editor.lines(SurfaceName::CommandLine),
            &["(lldb) ", "one", "two", "error: three", "(lldb) "].map(String::from)
        );
    }
}
