//! Terminal surface
//!
//! Behaviors draw into a back buffer. [`TerminalCanvas::present`] sends only
//! the cells that changed since the previous present, then flushes.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use super::canvas::{Canvas, Grid, Style};

fn attribute(style: Style) -> Attribute {
    match style {
        Style::Normal => Attribute::Reset,
        Style::Dim => Attribute::Dim,
        Style::Bold => Attribute::Bold,
    }
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    back: Grid,
    /// What the terminal currently shows; `None` forces a full redraw
    front: Option<Grid>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, rows: u16, columns: u16) -> Self {
        Self {
            out,
            back: Grid::new(i32::from(rows), i32::from(columns)),
            front: None,
        }
    }

    /// Start over on a new terminal size. Everything drawn so far is lost.
    pub fn resize(&mut self, rows: u16, columns: u16) {
        self.back = Grid::new(i32::from(rows), i32::from(columns));
        self.front = None;
    }

    pub fn back(&self) -> &Grid {
        &self.back
    }

    /// Write pending changes and any alert to the terminal
    pub fn present(&mut self) -> io::Result<()> {
        let (rows, columns) = self.back.size();
        if self.front.is_none() {
            queue!(self.out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
        }

        let mut style = None;
        let mut cursor = None;
        for row in 0..rows {
            for column in 0..columns {
                let Some(cell) = self.back.get(row, column) else {
                    continue;
                };
                let shown = self.front.as_ref().and_then(|front| front.get(row, column));
                if shown == Some(cell) || (shown.is_none() && cell.ch == ' ' && cell.style == Style::Normal) {
                    continue;
                }
                // Terminal sizes fit in u16, so the casts are lossless
                if cursor != Some((row, column)) {
                    queue!(self.out, MoveTo(column as u16, row as u16))?;
                }
                if style != Some(cell.style) {
                    queue!(self.out, SetAttribute(Attribute::Reset))?;
                    if cell.style != Style::Normal {
                        queue!(self.out, SetAttribute(attribute(cell.style)))?;
                    }
                    style = Some(cell.style);
                }
                queue!(self.out, Print(cell.ch))?;
                cursor = Some((row, column + 1));
            }
        }
        if style.is_some_and(|s| s != Style::Normal) {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }

        if self.back.take_beeps() > 0 {
            queue!(self.out, Print('\x07'))?;
        }
        self.out.flush()?;
        self.front = Some(self.back.clone());
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn size(&self) -> (i32, i32) {
        self.back.size()
    }

    fn put(&mut self, row: i32, column: i32, ch: char, style: Style) {
        self.back.put(row, column, ch, style);
    }

    fn beep(&mut self) {
        self.back.beep();
    }
}
