//! Editor surfaces the views draw into.
//!
//! The host editor exposes four named text surfaces. Views only ever use the
//! operations of [`Surface`]: clear-all, append-line, set-highlight-region and
//! cursor query/set. Anything richer (syntax colouring, folding, splits) is the
//! host's business.
//!
//! [`BufferEditor`] is the in-memory host used by the terminal UI, the
//! headless console and the tests.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// The four display surfaces a session is projected onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceName
{
    /// Resolved breakpoint locations.
    Breakpoints,
    /// Locals of the current frame.
    Variables,
    /// Source of the current file with the stop line highlighted.
    Code,
    /// Console transcript.
    CommandLine,
}

impl SurfaceName
{
    /// Every surface, in display order.
    pub const ALL: [SurfaceName; 4] = [Self::Breakpoints, Self::Variables, Self::Code, Self::CommandLine];

    /// Name the host uses for the surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self {
            Self::Breakpoints => "breakpoints",
            Self::Variables => "variables",
            Self::Code => "code",
            Self::CommandLine => "command_line",
        }
    }
}

impl fmt::Display for SurfaceName
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

/// A single-line, single-column highlight (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight
{
    pub line: u32,
    pub column: u32,
}

/// Cursor position (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor
{
    pub line: usize,
    pub column: usize,
}

impl Default for Cursor
{
    fn default() -> Self
    {
        Self { line: 1, column: 1 }
    }
}

/// Surface operation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError
{
    /// The host could not create or find the surface.
    #[error("Surface '{0}' is unavailable")]
    Unavailable(SurfaceName),

    /// A cursor position outside the surface's lines.
    #[error("Line {line} is out of range (surface has {lines} lines)")]
    OutOfRange
    {
        /// Requested line.
        line: usize,
        /// Lines currently on the surface.
        lines: usize,
    },
}

/// Convenience type alias for `Result<T, SurfaceError>`
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// A text surface inside the host editor
pub trait Surface
{
    /// Remove every line and the highlight.
    ///
    /// # Errors
    ///
    /// Host specific.
    fn clear(&mut self) -> SurfaceResult<()>;

    /// Append one line. `text` must not contain a newline.
    ///
    /// # Errors
    ///
    /// Host specific.
    fn append_line(&mut self, text: &str) -> SurfaceResult<()>;

    /// Set or clear the highlight region.
    ///
    /// # Errors
    ///
    /// Host specific.
    fn set_highlight(&mut self, region: Option<Highlight>) -> SurfaceResult<()>;

    /// Current cursor position.
    fn cursor(&self) -> Cursor;

    /// Move the cursor.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when `cursor.line` is past the last line.
    fn set_cursor(&mut self, cursor: Cursor) -> SurfaceResult<()>;

    /// Lines currently on the surface, top to bottom.
    fn lines(&self) -> &[String];

    /// Current highlight region.
    fn highlight(&self) -> Option<Highlight>;

    /// Number of lines on the surface.
    fn line_count(&self) -> usize
    {
        self.lines().len()
    }
}

/// The host editor: hands out surfaces by name, creating them on first use
pub trait Editor
{
    /// Get or create the named surface.
    ///
    /// # Errors
    ///
    /// `Unavailable` when the host cannot provide the surface.
    fn surface(&mut self, name: SurfaceName) -> SurfaceResult<&mut dyn Surface>;
}

/// In-memory text surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer
{
    lines: Vec<String>,
    highlight: Option<Highlight>,
    cursor: Cursor,
}

impl TextBuffer
{
    /// The last line, if any.
    #[must_use]
    pub fn last_line(&self) -> Option<&str>
    {
        self.lines.last().map(String::as_str)
    }

    /// Overwrite the last line, appending one if the buffer is empty.
    ///
    /// This is a host-side edit (the user typing at the prompt). Views never
    /// call it.
    pub fn replace_last_line(&mut self, text: impl Into<String>)
    {
        let text = text.into();
        match self.lines.last_mut() {
            Some(last) => *last = text,
            None => self.lines.push(text),
        }
        self.cursor = Cursor {
            line: self.lines.len(),
            column: self.lines.last().map_or(0, |l| l.chars().count()) + 1,
        };
    }
}

impl Surface for TextBuffer
{
    fn clear(&mut self) -> SurfaceResult<()>
    {
        self.lines.clear();
        self.highlight = None;
        self.cursor = Cursor::default();
        Ok(())
    }

    fn append_line(&mut self, text: &str) -> SurfaceResult<()>
    {
        self.lines.push(text.to_string());
        Ok(())
    }

    fn set_highlight(&mut self, region: Option<Highlight>) -> SurfaceResult<()>
    {
        self.highlight = region;
        Ok(())
    }

    fn cursor(&self) -> Cursor
    {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: Cursor) -> SurfaceResult<()>
    {
        let lines = self.lines.len().max(1);
        if cursor.line == 0 || cursor.line > lines {
            return Err(SurfaceError::OutOfRange {
                line: cursor.line,
                lines: self.lines.len(),
            });
        }
        self.cursor = cursor;
        Ok(())
    }

    fn lines(&self) -> &[String]
    {
        &self.lines
    }

    fn highlight(&self) -> Option<Highlight>
    {
        self.highlight
    }
}

/// In-memory editor holding one [`TextBuffer`] per surface
#[derive(Debug, Clone, Default)]
pub struct BufferEditor
{
    buffers: HashMap<SurfaceName, TextBuffer>,
}

impl BufferEditor
{
    /// Editor with no surfaces yet.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Read a surface, if it was ever created.
    #[must_use]
    pub fn buffer(&self, name: SurfaceName) -> Option<&TextBuffer>
    {
        self.buffers.get(&name)
    }

    /// Lines of a surface; empty if it was never created.
    #[must_use]
    pub fn lines(&self, name: SurfaceName) -> &[String]
    {
        match self.buffer(name) {
            Some(buffer) => buffer.lines(),
            None => &[],
        }
    }

    /// Mutable access for host-side edits.
    pub fn buffer_mut(&mut self, name: SurfaceName) -> &mut TextBuffer
    {
        self.buffers.entry(name).or_default()
    }
}

impl Editor for BufferEditor
{
    fn surface(&mut self, name: SurfaceName) -> SurfaceResult<&mut dyn Surface>
    {
        Ok(self.buffer_mut(name))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_surface_names()
    {
        let names: Vec<&str> = SurfaceName::ALL.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["breakpoints", "variables", "code", "command_line"]);
    }

    #[test]
    fn test_clear_drops_highlight()
    {
        let mut buffer = TextBuffer::default();
        buffer.append_line("a").unwrap();
        buffer.set_highlight(Some(Highlight { line: 1, column: 1 })).unwrap();
        buffer.clear().unwrap();
        assert!(buffer.lines().is_empty());
        assert_eq!(buffer.highlight(), None);
    }

    #[test]
    fn test_cursor_out_of_range()
    {
        let mut buffer = TextBuffer::default();
        buffer.append_line("only").unwrap();
        assert!(buffer.set_cursor(Cursor { line: 1, column: 3 }).is_ok());
        assert_eq!(
            buffer.set_cursor(Cursor { line: 2, column: 1 }),
            Err(SurfaceError::OutOfRange { line: 2, lines: 1 })
        );
    }

    #[test]
    fn test_replace_last_line()
    {
        let mut buffer = TextBuffer::default();
        buffer.replace_last_line("(lldb) ");
        buffer.replace_last_line("(lldb) run");
        assert_eq!(buffer.lines(), &["(lldb) run".to_string()]);
        assert_eq!(buffer.cursor(), Cursor { line: 1, column: 11 });
    }

    #[test]
    fn test_editor_reuses_surfaces()
    {
        let mut editor = BufferEditor::new();
        editor.surface(SurfaceName::Code).unwrap().append_line("x").unwrap();
        editor.surface(SurfaceName::Code).unwrap().append_line("y").unwrap();
        assert_eq!(editor.lines(SurfaceName::Code).len(), 2);
        assert!(editor.lines(SurfaceName::Variables).is_empty());
    }
}
