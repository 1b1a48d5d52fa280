//! Source location type.

use std::fmt;

/// A 1-based `file:line:column` position in the debuggee's sources
///
/// Used both for resolved breakpoint locations and for the place where the
/// process is currently stopped. The `Display` form is exactly
/// `<file>:<line>:<column>`, which is what the breakpoints surface lists.
///
/// ## Example
///
/// ```rust
/// use sightline_core::types::SourceLocation;
///
/// let loc = SourceLocation::new("main.c", 3, 7);
/// assert_eq!(loc.to_string(), "main.c:3:7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLocation
{
    /// Absolute or workspace-relative path.
    pub file: String,
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number, starting at 1.
    pub column: u32,
}

impl SourceLocation
{
    /// Build a location from its parts.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self
    {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
