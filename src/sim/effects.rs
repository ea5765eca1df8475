//! Decorative behaviors: stars, explosions, status line, banners

use std::rc::Rc;

use super::collision::Rect;
use super::task::{Behavior, Step, StepCtx};
use crate::error::SimError;
use crate::renderer::{Canvas, Style, contains, draw_frame, draw_text, frame_size};

/// Style and duration (ticks) of each blink phase
const BLINK_CYCLE: [(Style, u32); 4] = [
    (Style::Dim, 20),
    (Style::Normal, 3),
    (Style::Bold, 5),
    (Style::Normal, 3),
];

/// A star that twinkles forever
#[derive(Debug, Clone)]
pub struct Star {
    row: i32,
    column: i32,
    symbol: char,
    delay: u32,
    phase: usize,
    remaining: u32,
}

impl Star {
    /// `delay` ticks pass before the first blink, so stars don't pulse in
    /// unison
    pub fn new(row: i32, column: i32, symbol: char, delay: u32) -> Self {
        Self {
            row,
            column,
            symbol,
            delay,
            phase: 0,
            remaining: 0,
        }
    }
}

impl Behavior for Star {
    fn name(&self) -> &'static str {
        "star"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        if self.delay > 0 {
            self.delay -= 1;
            return Ok(Step::Suspend);
        }
        if self.remaining == 0 {
            let (style, ticks) = BLINK_CYCLE[self.phase];
            cx.canvas.put(self.row, self.column, self.symbol, style);
            self.remaining = ticks;
            self.phase = (self.phase + 1) % BLINK_CYCLE.len();
        }
        self.remaining -= 1;
        Ok(Step::Suspend)
    }
}

pub const EXPLOSION_FRAMES: [&str; 4] = [
    r"           (_)
       (  (   (  (
      () (  (  )
        ( )  ()
",
    r"           (_)
       (  (   (
         (  (  )
          )  (
",
    r"            (
          (   (
         (     (
          )  (
",
    r"            (
              (
            (
",
];

/// Short animation centered on a destroyed obstacle
#[derive(Debug, Clone)]
pub struct Explosion {
    corner_row: f32,
    corner_column: f32,
    frame: usize,
    drawn: bool,
}

impl Explosion {
    pub fn new(center_row: f32, center_column: f32) -> Self {
        let (rows, columns) = frame_size(EXPLOSION_FRAMES[0]);
        Self {
            corner_row: center_row - rows as f32 / 2.0,
            corner_column: center_column - columns as f32 / 2.0,
            frame: 0,
            drawn: false,
        }
    }
}

impl Behavior for Explosion {
    fn name(&self) -> &'static str {
        "explosion"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        if self.drawn {
            let frame = EXPLOSION_FRAMES[self.frame];
            draw_frame(cx.canvas, self.corner_row, self.corner_column, frame, true);
            self.drawn = false;
            self.frame += 1;
        } else if self.frame == 0 {
            cx.beep();
        }

        let Some(frame) = EXPLOSION_FRAMES.get(self.frame) else {
            return Ok(Step::DONE);
        };
        draw_frame(cx.canvas, self.corner_row, self.corner_column, frame, false);
        self.drawn = true;
        Ok(Step::Suspend)
    }
}

/// Current year and its commentary on the bottom line
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    shown: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    fn text(year: u32, phrase: &str) -> String {
        if phrase.is_empty() {
            format!("Year {year}")
        } else {
            format!("Year {year}: {phrase}")
        }
    }
}

impl Behavior for StatusLine {
    fn name(&self) -> &'static str {
        "status"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        let timeline = &cx.world.timeline;
        let text = Self::text(timeline.year(), timeline.phrase());
        let (rows, _) = cx.bounds();
        let row = rows - 2;

        if let Some(old) = self.shown.as_deref().filter(|old| *old != text) {
            let blank = " ".repeat(old.chars().count());
            draw_text(cx.canvas, row, 2, &blank, Style::Normal);
        }
        draw_text(cx.canvas, row, 2, &text, Style::Normal);
        self.shown = Some(text);
        Ok(Step::Suspend)
    }
}

/// Banner shown for the rest of the session once the ship is lost
#[derive(Debug, Clone)]
pub struct GameOverBanner {
    frame: Rc<str>,
}

impl GameOverBanner {
    pub fn new(frame: Rc<str>) -> Self {
        Self { frame }
    }
}

impl Behavior for GameOverBanner {
    fn name(&self) -> &'static str {
        "game-over"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        let (rows, columns) = cx.bounds();
        let (frame_rows, frame_columns) = frame_size(&self.frame);
        let row = (rows - frame_rows) / 2;
        let column = (columns - frame_columns) / 2;
        draw_frame(cx.canvas, row as f32, column as f32, &self.frame, false);
        Ok(Step::Suspend)
    }
}

/// Debug overlay: outlines every registered obstacle's bounding box
#[derive(Debug, Clone, Default)]
pub struct ObstacleOutlines {
    drawn: Vec<Rect>,
}

impl ObstacleOutlines {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Box drawn one cell outside `rect`
fn outline<C: Canvas + ?Sized>(canvas: &mut C, rect: &Rect, negative: bool) {
    let (top, left) = (rect.row - 1, rect.column - 1);
    let (bottom, right) = (rect.row + rect.rows, rect.column + rect.columns);
    let glyph = |ch: char| if negative { ' ' } else { ch };

    let mut put = |row: i32, column: i32, ch: char| {
        if contains(&*canvas, row, column) {
            canvas.put(row, column, glyph(ch), Style::Dim);
        }
    };
    for column in left + 1..right {
        put(top, column, '-');
        put(bottom, column, '-');
    }
    for row in top + 1..bottom {
        put(row, left, '|');
        put(row, right, '|');
    }
    for (row, column) in [(top, left), (top, right), (bottom, left), (bottom, right)] {
        put(row, column, '+');
    }
}

impl Behavior for ObstacleOutlines {
    fn name(&self) -> &'static str {
        "outlines"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        for rect in self.drawn.drain(..) {
            outline(cx.canvas, &rect, true);
        }
        for (_, obstacle) in cx.world.obstacles.snapshot() {
            let rect = obstacle.rect();
            outline(cx.canvas, &rect, false);
            self.drawn.push(rect);
        }
        Ok(Step::Suspend)
    }
}
