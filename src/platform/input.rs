//! Keyboard input
//!
//! Every event queued since the previous tick is drained without blocking
//! and folded into one [`Controls`] value.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Everything the player asked for during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub input: TickInput,
    pub quit: bool,
    /// Flip the sound setting
    pub toggle_sound: bool,
    /// New terminal size as (rows, columns)
    pub resized: Option<(u16, u16)>,
}

/// Fold one key event into `controls`. Later keys on the same axis win.
pub fn apply_key(controls: &mut Controls, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => controls.quit = true,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => controls.quit = true,
        KeyCode::Up | KeyCode::Char('w') => controls.input.rows_direction = -1,
        KeyCode::Down | KeyCode::Char('s') => controls.input.rows_direction = 1,
        KeyCode::Left | KeyCode::Char('a') => controls.input.columns_direction = -1,
        KeyCode::Right | KeyCode::Char('d') => controls.input.columns_direction = 1,
        KeyCode::Char(' ') => controls.input.fire = true,
        KeyCode::Char('m') => controls.toggle_sound = !controls.toggle_sound,
        _ => {}
    }
}

/// Drain pending terminal events without waiting
pub fn poll_controls() -> io::Result<Controls> {
    let mut controls = Controls::default();
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) => apply_key(&mut controls, key),
            Event::Resize(columns, rows) => controls.resized = Some((rows, columns)),
            _ => {}
        }
    }
    Ok(controls)
}
