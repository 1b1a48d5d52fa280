//! Local variable type.

use std::fmt;

/// A variable as reported by the backend for the current frame
///
/// All three fields are display strings taken verbatim from the backend; the
/// session never interprets them. Values are produced fresh on every query and
/// must not be cached across steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable
{
    /// Variable name, e.g. `i`.
    pub name: String,
    /// Type name as the backend prints it, e.g. `int`.
    pub type_name: String,
    /// Current value rendered by the backend, e.g. `42`.
    pub value: String,
}

impl Variable
{
    /// Create a variable entry.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, value: impl Into<String>) -> Self
    {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value: value.into(),
        }
    }
}

/// Renders as `(type) name = value`, matching the lldb `frame variable` layout.
impl fmt::Display for Variable
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "({}) {} = {}", self.type_name, self.name, self.value)
    }
}
