//! # Command Dispatcher
//!
//! Turns a line typed at the console prompt into a session command and a new
//! turn in the command log.

use sightline_core::types::CommandOutput;
use sightline_core::{Backend, Session, SessionSnapshot};
use tracing::{debug, warn};

use crate::registry::{RenderFailure, ViewId, ViewRegistry};
use crate::surface::Editor;
use crate::views::{CommandLogView, RenderResult, View, PROMPT};

/// Strip the console prompt from a submitted line.
///
/// Lines typed without the prompt are passed through, trimmed.
#[must_use]
pub fn strip_prompt(raw: &str) -> &str
{
    raw.strip_prefix(PROMPT)
        .or_else(|| raw.strip_prefix(PROMPT.trim_end()))
        .unwrap_or(raw)
        .trim()
}

/// Routes console input to the session and owns the command log
#[derive(Debug, Default)]
pub struct CommandDispatcher
{
    log: CommandLogView,
}

/// Result of one [`CommandDispatcher::submit`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission
{
    /// What the session printed.
    pub output: CommandOutput,
    /// Views that failed while refreshing, including the log itself.
    pub failures: Vec<RenderFailure>,
}

impl CommandDispatcher
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Seed the log's first prompt if the surface is still empty.
    ///
    /// ## Errors
    ///
    /// Returns `RenderError` when the editor rejects an operation.
    pub fn seed(&mut self, editor: &mut dyn Editor) -> RenderResult<()>
    {
        self.log.render(&SessionSnapshot::empty(), editor)
    }

    /// Execute the command on `raw` and record the turn
    ///
    /// The prompt prefix is stripped, the remainder goes to
    /// [`Session::execute_command`], every registered view is refreshed, and
    /// the output plus a fresh prompt are appended to the log. The output is
    /// shown verbatim, errors included.
    pub fn submit<B: Backend>(
        &mut self,
        raw: &str,
        session: &mut Session<B>,
        registry: &mut ViewRegistry,
        editor: &mut dyn Editor,
    ) -> Submission
    {
        let command = strip_prompt(raw);
        debug!(command, "submitting console command");

        let output = session.execute_command(command);
        let mut failures = registry.notify_all(&session.snapshot(), editor);

        if let Err(error) = self.log.append_turn(&output, editor) {
            warn!(error = %error, "failed to append to the command log");
            failures.push(RenderFailure {
                view: ViewId::detached(),
                name: self.log.name(),
                error,
            });
        }

        Submission { output, failures }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_strip_prompt()
    {
        assert_eq!(strip_prompt("(lldb) run"), "run");
        assert_eq!(strip_prompt("(lldb)run"), "run");
        assert_eq!(strip_prompt("  step "), "step");
        assert_eq!(strip_prompt("(lldb) "), "");
    }
}
