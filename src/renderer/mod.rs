//! Character rendering
//!
//! Everything is drawn as glyphs on a cell grid. The simulation only sees
//! [`Canvas`]; the terminal backend diffs a back buffer against what is on
//! screen.

pub mod canvas;
pub mod terminal;

pub use canvas::{Canvas, Cell, Grid, Style, contains, draw_border, draw_frame, draw_text, frame_size};
pub use terminal::TerminalCanvas;
