//! Application state and key handling for the terminal UI

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sightline_core::{Backend, SessionResult};
use tracing::debug;

use crate::surface::{BufferEditor, SurfaceName};
use crate::views::PROMPT;
use crate::workbench::Workbench;

/// Terminal UI state around a [`Workbench`]
pub struct App<B: Backend>
{
    /// Session, views and the editor the panes are drawn from.
    pub workbench: Workbench<B, BufferEditor>,
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Last error or render diagnostic, shown in the footer.
    pub status_message: Option<String>,
    /// Lines scrolled back from the end of the command log.
    pub log_scrollback: usize,
}

impl<B: Backend> App<B>
{
    #[must_use]
    pub fn new(workbench: Workbench<B, BufferEditor>) -> Self
    {
        let mut app = Self {
            workbench,
            should_quit: false,
            status_message: None,
            log_scrollback: 0,
        };
        app.collect_diagnostics();
        app
    }

    /// Handle a keyboard event
    ///
    /// Returns `true` if the application should quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool
    {
        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::F(5) => self.run_action("continue", Workbench::continue_),
            KeyCode::F(9) => self.run_action("launch", |wb| wb.launch().map(|_| ())),
            KeyCode::F(11) => self.run_action("step", Workbench::step_into),
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => self.edit_prompt(|input| {
                input.pop();
            }),
            KeyCode::Char(c) => self.edit_prompt(|input| input.push(c)),
            KeyCode::Up => self.scroll_log_up(),
            KeyCode::Down => self.scroll_log_down(),
            _ => {}
        }

        self.should_quit
    }

    /// Text typed after the prompt on the last log line.
    #[must_use]
    pub fn input(&self) -> &str
    {
        let last = self
            .workbench
            .editor()
            .buffer(SurfaceName::CommandLine)
            .and_then(|buffer| buffer.last_line())
            .unwrap_or(PROMPT);
        last.strip_prefix(PROMPT).unwrap_or(last)
    }

    fn run_action(&mut self, label: &str, action: impl FnOnce(&mut Workbench<B, BufferEditor>) -> SessionResult<()>)
    {
        self.status_message = None;
        if let Err(e) = action(&mut self.workbench) {
            debug!(action = label, error = %e, "key action failed");
            self.status_message = Some(format!("{label}: {e}"));
        }
        self.collect_diagnostics();
    }

    fn submit_prompt(&mut self)
    {
        let line = format!("{PROMPT}{}", self.input());
        self.status_message = None;
        self.log_scrollback = 0;
        self.workbench.submit(&line);
        self.collect_diagnostics();
    }

    fn edit_prompt(&mut self, edit: impl FnOnce(&mut String))
    {
        let mut input = self.input().to_string();
        edit(&mut input);
        self.workbench
            .editor_mut()
            .buffer_mut(SurfaceName::CommandLine)
            .replace_last_line(format!("{PROMPT}{input}"));
        self.log_scrollback = 0;
    }

    fn scroll_log_up(&mut self)
    {
        let lines = self.workbench.editor().lines(SurfaceName::CommandLine).len();
        if self.log_scrollback + 1 < lines {
            self.log_scrollback += 1;
        }
    }

    fn scroll_log_down(&mut self)
    {
        self.log_scrollback = self.log_scrollback.saturating_sub(1);
    }

    fn collect_diagnostics(&mut self)
    {
        if let Some(failure) = self.workbench.take_diagnostics().pop() {
            self.status_message = Some(failure.to_string());
        }
    }
}

#[cfg(test)]
mod tests
{
    use sightline_core::backend::scripted::{Program, ScriptedBackend};
    use sightline_core::{Session, SessionState};

    use super::*;
    use crate::views::SourceCache;

    fn app() -> App<ScriptedBackend>
    {
        let mut session = Session::new(ScriptedBackend::new().with_program("a.out", Program::sample()));
        session.create_target("a.out").unwrap();
        App::new(Workbench::with_default_views(session, BufferEditor::new(), SourceCache::new()))
    }

    fn key(code: KeyCode) -> KeyEvent
    {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_edits_prompt()
    {
        let mut app = app();
        for c in "rux".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(app.input(), "ru");
    }

    #[test]
    fn test_enter_submits_prompt()
    {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('r')));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.workbench.session().state(), SessionState::Stopped);
        assert_eq!(app.input(), "");
    }

    #[test]
    fn test_function_keys_drive_session()
    {
        let mut app = app();
        app.handle_key_event(key(KeyCode::F(11)));
        assert!(app.status_message.as_deref().is_some_and(|m| m.starts_with("step:")));

        app.handle_key_event(key(KeyCode::F(9)));
        assert_eq!(app.workbench.session().state(), SessionState::Stopped);
        app.handle_key_event(key(KeyCode::F(5)));
        assert_eq!(app.workbench.session().state(), SessionState::Exited);
        assert!(app.handle_key_event(key(KeyCode::Esc)));
    }
}
