//! Terminal setup and teardown.

use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::{AppError, Result};

/// The terminal type used by the application.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen.
///
/// A panic hook is installed that restores the terminal before the default
/// hook prints, so panic messages stay readable.
pub fn init() -> Result<Tui> {
    install_panic_hook();

    enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| AppError::terminal(e.to_string()))?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| AppError::terminal(e.to_string()))
}

/// Leave the alternate screen and raw mode.
pub fn restore(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| AppError::terminal(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| AppError::terminal(e.to_string()))?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
