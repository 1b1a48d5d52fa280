//! Terminal input events

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracing::trace;

/// Events the UI loop reacts to
#[derive(Debug, Clone)]
pub enum Event
{
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized; the next draw picks up the new size.
    Resize,
    /// Periodic wake-up so the loop can redraw.
    Tick,
}

/// Reads crossterm events on a blocking task and forwards them to the UI loop
pub struct EventHandler
{
    receiver: mpsc::Receiver<Event>,
    should_stop: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl EventHandler
{
    /// Spawn the reader task, ticking every `tick_rate`.
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self
    {
        let (sender, receiver) = mpsc::channel(100);
        let should_stop = Arc::new(AtomicBool::new(false));

        let stop = Arc::clone(&should_stop);
        let handle = tokio::task::spawn_blocking(move || {
            let mut last_tick = Instant::now();
            while !stop.load(Ordering::Relaxed) {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());

                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                        Ok(CrosstermEvent::Resize(..)) => Some(Event::Resize),
                        _ => None,
                    };
                    // A closed channel means the UI loop is gone.
                    if let Some(ev) = forwarded {
                        if sender.blocking_send(ev).is_err() {
                            break;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.blocking_send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
            trace!("terminal event reader stopped");
        });

        Self {
            receiver,
            should_stop,
            handle,
        }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event>
    {
        self.receiver.recv().await
    }

    /// Ask the reader task to exit and close the channel.
    pub fn stop(&mut self)
    {
        self.should_stop.store(true, Ordering::Relaxed);
        self.receiver.close();
    }

    /// Returns `true` while the reader task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool
    {
        !self.handle.is_finished()
    }
}

impl Drop for EventHandler
{
    fn drop(&mut self)
    {
        self.stop();
    }
}
