//! Terminal mode guard

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

/// Puts the terminal in raw mode on the alternate screen with the cursor
/// hidden. Dropping it restores everything, including on early returns.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        log::info!("terminal session started");
        Ok(session)
    }

    /// Current size as (rows, columns)
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let (columns, rows) = terminal::size()?;
        Ok((rows, columns))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if let Err(err) = execute!(out, Show, LeaveAlternateScreen) {
            log::error!("failed to restore screen: {err}");
        }
        let _ = out.flush();
        if let Err(err) = terminal::disable_raw_mode() {
            log::error!("failed to leave raw mode: {err}");
        }
        log::info!("terminal session ended");
    }
}
