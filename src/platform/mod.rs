//! Platform layer
//!
//! Handles everything that touches the real terminal:
//! - Keyboard polling
//! - Raw mode, alternate screen and cursor state

pub mod input;
pub mod session;

pub use input::{Controls, apply_key, poll_controls};
pub use session::TerminalSession;
