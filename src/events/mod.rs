//! Event handling for the application.
//!
//! Terminal input is polled on the event loop and turned into [`Event`]s;
//! background API results arrive separately through the task channel.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// Events consumed by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized to (width, height).
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
