//! Source view with the current stop position highlighted.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use sightline_core::SessionSnapshot;
use tracing::{debug, warn};

use super::{redraw, RenderResult, View};
use crate::surface::{Cursor, Editor, Highlight, SurfaceName};

/// Source text by file name
///
/// Files are read from disk on first use, relative to the cache root when the
/// name is not absolute. Text can also be preloaded, which is how programs
/// that carry their own source are shown. A file that cannot be read is cached
/// as a one-line placeholder so the disk is not hit again on every stop.
#[derive(Debug, Default)]
pub struct SourceCache
{
    root: Option<PathBuf>,
    files: HashMap<String, Vec<String>>,
}

impl SourceCache
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Resolve relative file names against `root`.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self
    {
        self.root = Some(root.into());
        self
    }

    /// Preload the text of `file`, replacing anything cached.
    pub fn insert(&mut self, file: impl Into<String>, text: &str)
    {
        self.files.insert(file.into(), text.lines().map(str::to_string).collect());
    }

    /// Lines of `file`, loading it if needed.
    pub fn lines(&mut self, file: &str) -> &[String]
    {
        let root = self.root.as_ref();
        self.files.entry(file.to_string()).or_insert_with(|| {
            let path = match root {
                Some(root) => root.join(file),
                None => PathBuf::from(file),
            };
            match fs::read_to_string(&path) {
                Ok(text) => {
                    debug!(path = %path.display(), "loaded source file");
                    text.lines().map(str::to_string).collect()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "source file unavailable");
                    vec![format!("<source unavailable: {file}: {e}>")]
                }
            }
        })
    }
}

/// Shows the current file and highlights the stop position
///
/// With no stop location the last file shown stays on the surface and only
/// the highlight is cleared.
#[derive(Debug, Default)]
pub struct CodeView
{
    sources: SourceCache,
    shown: Option<String>,
}

impl CodeView
{
    #[must_use]
    pub fn new(sources: SourceCache) -> Self
    {
        Self { sources, shown: None }
    }

    /// File currently on the surface.
    #[must_use]
    pub fn shown_file(&self) -> Option<&str>
    {
        self.shown.as_deref()
    }
}

impl View for CodeView
{
    fn name(&self) -> &'static str
    {
        "code"
    }

    fn surface(&self) -> SurfaceName
    {
        SurfaceName::Code
    }

    fn render(&mut self, snapshot: &SessionSnapshot, editor: &mut dyn Editor) -> RenderResult<()>
    {
        let name = self.surface();
        let Some(location) = &snapshot.location else {
            match &self.shown {
                Some(file) => redraw(editor, name, self.sources.lines(file))?,
                None => redraw(editor, name, std::iter::empty::<&str>())?,
            }
            editor.surface(name)?.set_highlight(None)?;
            return Ok(());
        };

        redraw(editor, name, self.sources.lines(&location.file))?;
        self.shown = Some(location.file.clone());

        let surface = editor.surface(name)?;
        surface.set_highlight(Some(Highlight {
            line: location.line,
            column: location.column,
        }))?;
        let line = location.line as usize;
        if line >= 1 && line <= surface.line_count() {
            surface.set_cursor(Cursor {
                line,
                column: location.column.max(1) as usize,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use sightline_core::{SessionState, SourceLocation};

    use super::*;
    use crate::surface::{BufferEditor, Surface};

    fn stopped_at(line: u32) -> SessionSnapshot
    {
        let mut snapshot = SessionSnapshot::empty();
        snapshot.state = SessionState::Stopped;
        snapshot.location = Some(SourceLocation::new("demo.c", line, 3));
        snapshot
    }

    #[test]
    fn test_highlights_stop_line()
    {
        let mut sources = SourceCache::new();
        sources.insert("demo.c", "int main()\n{\n  return 0;\n}\n");
        let mut view = CodeView::new(sources);
        let mut editor = BufferEditor::new();

        view.render(&stopped_at(3), &mut editor).unwrap();
        let buffer = editor.buffer(SurfaceName::Code).unwrap();
        assert_eq!(buffer.lines().len(), 4);
        assert_eq!(buffer.highlight(), Some(Highlight { line: 3, column: 3 }));
        assert_eq!(buffer.cursor(), Cursor { line: 3, column: 3 });
    }

    #[test]
    fn test_missing_file_renders_placeholder()
    {
        let mut view = CodeView::new(SourceCache::new().with_root("/nonexistent-sightline-root"));
        let mut editor = BufferEditor::new();

        view.render(&stopped_at(1), &mut editor).unwrap();
        let lines = editor.lines(SurfaceName::Code);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("<source unavailable: demo.c"));
    }

    #[test]
    fn test_no_location_keeps_file()
    {
        let mut sources = SourceCache::new();
        sources.insert("demo.c", "a\nb\nc\n");
        let mut view = CodeView::new(sources);
        let mut editor = BufferEditor::new();

        view.render(&stopped_at(2), &mut editor).unwrap();
        view.render(&SessionSnapshot::empty(), &mut editor).unwrap();
        let buffer = editor.buffer(SurfaceName::Code).unwrap();
        assert_eq!(buffer.lines().len(), 3);
        assert_eq!(buffer.highlight(), None);
        assert_eq!(view.shown_file(), Some("demo.c"));
    }
}
