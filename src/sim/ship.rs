//! The player's ship
//!
//! [`ShipState`] is the pure motion model (velocity update, stop snapping,
//! clamping); [`ShipController`] is the behavior that wires it to input,
//! the gun, the canvas and collision detection.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::physics::update_velocity;
use super::projectile::Projectile;
use super::task::{Behavior, Step, StepCtx, TickInput};
use crate::consts::{SHIP_FADING, SHIP_SPEED_LIMIT, SHIP_STOP_THRESHOLD};
use crate::error::SimError;
use crate::renderer::{draw_frame, frame_size};

/// Handling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipTuning {
    /// Per-axis speed limit (x = columns, y = rows per tick)
    pub speed_limit: Vec2,
    pub fading: f32,
    pub stop_threshold: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            speed_limit: Vec2::splat(SHIP_SPEED_LIMIT),
            fading: SHIP_FADING,
            stop_threshold: SHIP_STOP_THRESHOLD,
        }
    }
}

/// Clamp so a `footprint`-sized frame stays off both borders. The upper
/// bound wins only when it is at least 1.
#[inline]
fn clamp_axis(value: f32, bound: i32, footprint: i32) -> f32 {
    let max = (bound - footprint - 1) as f32;
    value.min(max).max(1.0)
}

/// Position and velocity. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipState {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frame size as (rows, columns)
    pub footprint: (i32, i32),
}

impl ShipState {
    pub fn new(row: f32, column: f32, footprint: (i32, i32)) -> Self {
        Self {
            pos: Vec2::new(column, row),
            vel: Vec2::ZERO,
            footprint,
        }
    }

    pub fn row(&self) -> f32 {
        self.pos.y
    }

    pub fn column(&self) -> f32 {
        self.pos.x
    }

    /// Apply one tick of input: update velocity, snap near-zero drift on
    /// idle axes, move, and clamp into the playfield.
    pub fn integrate(&mut self, input: &TickInput, bounds: (i32, i32), tuning: &ShipTuning) -> Result<(), SimError> {
        let mut vel = update_velocity(
            self.vel,
            input.rows_direction,
            input.columns_direction,
            tuning.speed_limit,
            tuning.fading,
        )?;
        if input.rows_direction == 0 && vel.y.abs() < tuning.stop_threshold {
            vel.y = 0.0;
        }
        if input.columns_direction == 0 && vel.x.abs() < tuning.stop_threshold {
            vel.x = 0.0;
        }
        self.vel = vel;

        let (rows, columns) = bounds;
        let (frame_rows, frame_columns) = self.footprint;
        let next = self.pos + self.vel;
        self.pos = Vec2::new(
            clamp_axis(next.x, columns, frame_columns),
            clamp_axis(next.y, rows, frame_rows),
        );
        Ok(())
    }

    /// Where shots leave the ship: top row, horizontal center
    pub fn gun_position(&self) -> (f32, f32) {
        (self.pos.y, self.pos.x + (self.footprint.1 / 2) as f32)
    }

    /// Bounding box at the rounded position
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos.y, self.pos.x, self.footprint.0, self.footprint.1)
    }
}

/// Behavior driving the ship while the game is on
#[derive(Debug, Clone)]
pub struct ShipController {
    state: ShipState,
    frames: Vec<Rc<str>>,
    tuning: ShipTuning,
    ticks: u64,
    /// Position and frame index of the last draw
    drawn: Option<(Vec2, usize)>,
}

impl ShipController {
    /// Ship at (row, column). The footprint covers the largest frame.
    pub fn new(row: f32, column: f32, frames: Vec<Rc<str>>, tuning: ShipTuning) -> Self {
        let footprint = frames
            .iter()
            .map(|frame| frame_size(frame))
            .fold((0, 0), |(r, c), (fr, fc)| (r.max(fr), c.max(fc)));
        Self {
            state: ShipState::new(row, column, footprint),
            frames,
            tuning,
            ticks: 0,
            drawn: None,
        }
    }

    pub fn state(&self) -> &ShipState {
        &self.state
    }

    fn frame(&self, index: usize) -> &str {
        self.frames.get(index).map_or("", |frame| frame)
    }

    fn erase(&mut self, cx: &mut StepCtx<'_>) {
        if let Some((pos, index)) = self.drawn.take() {
            draw_frame(cx.canvas, pos.y, pos.x, self.frame(index), true);
        }
    }
}

impl Behavior for ShipController {
    fn name(&self) -> &'static str {
        "ship"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        self.erase(cx);

        let input = cx.world.input;
        self.state.integrate(&input, cx.bounds(), &self.tuning)?;

        if input.fire && cx.world.timeline.weapon_unlocked() {
            let (row, column) = self.state.gun_position();
            cx.spawn(Projectile::new(row, column));
        }

        // Each frame stays up for two ticks
        let index = if self.frames.is_empty() {
            0
        } else {
            (self.ticks / 2) as usize % self.frames.len()
        };
        self.ticks += 1;

        let pos = self.state.pos;
        draw_frame(cx.canvas, pos.y, pos.x, self.frame(index), false);
        self.drawn = Some((pos, index));

        if cx.world.obstacles.any_overlap(&self.state.rect()) {
            log::info!(
                "ship destroyed at row {:.1}, column {:.1}",
                pos.y,
                pos.x
            );
            self.erase(cx);
            return Ok(Step::GAME_OVER);
        }
        Ok(Step::Suspend)
    }
}
