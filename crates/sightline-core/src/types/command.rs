//! Captured console output.

/// Output of one free-form console command
///
/// Both streams are kept as the backend produced them, including trailing
/// newlines. A malformed command is not an error at this level: its
/// diagnostic simply lands in `stderr`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput
{
    /// Normal output.
    pub stdout: String,
    /// Error output.
    pub stderr: String,
}

impl CommandOutput
{
    /// Output with only a stdout part.
    pub fn stdout(text: impl Into<String>) -> Self
    {
        Self {
            stdout: text.into(),
            stderr: String::new(),
        }
    }

    /// Output with only a stderr part.
    pub fn stderr(text: impl Into<String>) -> Self
    {
        Self {
            stdout: String::new(),
            stderr: text.into(),
        }
    }

    /// Returns `true` if the backend reported an error.
    #[must_use]
    pub fn is_error(&self) -> bool
    {
        !self.stderr.is_empty()
    }

    /// Lines of stdout followed by lines of stderr, one entry per newline.
    ///
    /// A trailing newline does not produce an empty final line.
    pub fn lines(&self) -> impl Iterator<Item = &str>
    {
        self.stdout.lines().chain(self.stderr.lines())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_lines_split_both_streams()
    {
        let output = CommandOutput {
            stdout: "one\ntwo\n".to_string(),
            stderr: "error: bad\n".to_string(),
        };
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["one", "two", "error: bad"]);
        assert!(output.is_error());
    }

    #[test]
    fn test_empty_output_has_no_lines()
    {
        let output = CommandOutput::default();
        assert_eq!(output.lines().count(), 0);
        assert!(!output.is_error());
    }
}
