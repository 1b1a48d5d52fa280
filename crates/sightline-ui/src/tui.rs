//! Terminal setup and the UI event loop

use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sightline_core::Backend;
use sightline_utils::{debug, info};

use crate::app::App;
use crate::event::{Event, EventHandler};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Owns the terminal while the UI is up
///
/// Raw mode and the alternate screen are entered on construction and left on
/// drop, and also from a panic hook so a crash does not leave the terminal
/// unusable.
pub struct Tui
{
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui
{
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched.
    pub fn new() -> io::Result<Self>
    {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = Self::restore();
            previous_hook(panic_info);
        }));

        Ok(Self { terminal })
    }

    /// Draw and handle input until the user quits.
    ///
    /// Session work runs on this task between draws; the event reader only
    /// forwards terminal input.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or restoring the terminal fails.
    pub async fn run<B: Backend>(&mut self, app: &mut App<B>) -> io::Result<()>
    {
        info!(state = %app.workbench.session().state(), "terminal UI started");
        let mut events = EventHandler::new(TICK_RATE);

        while !app.should_quit {
            self.terminal.draw(|frame| crate::ui::draw(frame, app))?;

            match events.next().await {
                Some(Event::Key(key)) => {
                    if app.handle_key_event(key) {
                        break;
                    }
                }
                Some(Event::Resize | Event::Tick) => {}
                None => break,
            }
        }

        Self::restore()?;
        events.stop();
        if events.is_running() {
            debug!("event reader still draining after stop");
        }
        info!(state = %app.workbench.session().state(), "terminal UI closed");
        Ok(())
    }

    /// Leave raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched back.
    pub fn restore() -> io::Result<()>
    {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for Tui
{
    fn drop(&mut self)
    {
        let _ = Self::restore();
    }
}
