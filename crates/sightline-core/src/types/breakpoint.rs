//! Breakpoint specification and resolution types.

use std::fmt;
use std::str::FromStr;

use super::{BreakpointHandle, SourceLocation};
use crate::error::SessionError;

/// What the user asked to break on
///
/// A specification is resolved by the backend into zero or more
/// [`SourceLocation`]s. A spec with no locations is pending: it stays in the
/// backend's list and may resolve later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BreakpointSpec
{
    /// Break on entry to a function by symbol name.
    Symbol(String),
    /// Break on a source line.
    FileLine
    {
        /// File name as written by the user.
        file: String,
        /// 1-based line number.
        line: u32,
    },
}

impl BreakpointSpec
{
    /// Breakpoint on a function name.
    pub fn symbol(name: impl Into<String>) -> Self
    {
        Self::Symbol(name.into())
    }

    /// Breakpoint on a file and line.
    pub fn file_line(file: impl Into<String>, line: u32) -> Self
    {
        Self::FileLine {
            file: file.into(),
            line,
        }
    }
}

/// Parses `file:line` when the text ends in `:<digits>` with a non-empty file
/// part, and a symbol name otherwise.
///
/// ```rust
/// use sightline_core::types::BreakpointSpec;
///
/// assert_eq!("main".parse::<BreakpointSpec>().unwrap(), BreakpointSpec::symbol("main"));
/// assert_eq!("main.c:4".parse::<BreakpointSpec>().unwrap(), BreakpointSpec::file_line("main.c", 4));
/// ```
impl FromStr for BreakpointSpec
{
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let text = s.trim();
        if text.is_empty() {
            return Err(SessionError::Breakpoint("empty breakpoint specification".to_string()));
        }

        if let Some((file, line)) = text.rsplit_once(':') {
            if !file.is_empty() && !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
                let line = line
                    .parse::<u32>()
                    .map_err(|e| SessionError::Breakpoint(format!("invalid line in {text:?}: {e}")))?;
                return Ok(Self::file_line(file, line));
            }
        }

        Ok(Self::symbol(text))
    }
}

impl fmt::Display for BreakpointSpec
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::Symbol(name) => write!(f, "{name}"),
            Self::FileLine { file, line } => write!(f, "{file}:{line}"),
        }
    }
}

/// A breakpoint together with the locations the backend resolved it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint
{
    /// Backend identifier.
    pub id: BreakpointHandle,
    /// The original request.
    pub spec: BreakpointSpec,
    /// Resolved locations in backend order.
    pub locations: Vec<SourceLocation>,
}

impl Breakpoint
{
    /// Whether the backend found at least one location for this breakpoint.
    #[must_use]
    pub fn is_resolved(&self) -> bool
    {
        !self.locations.is_empty()
    }
}
