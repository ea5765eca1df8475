//! Fills the orbit with debris at the cadence the timeline dictates

use std::rc::Rc;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::debris::FallingDebris;
use super::task::{Behavior, Step, StepCtx};
use crate::consts::SPAWN_RETRY_TICKS;
use crate::error::SimError;
use crate::renderer::frame_size;

#[derive(Debug, Clone)]
pub struct DebrisSpawner {
    frames: Vec<Rc<str>>,
    fall_speed: f32,
    wait: u32,
}

impl DebrisSpawner {
    pub fn new(frames: Vec<Rc<str>>, fall_speed: f32) -> Self {
        Self {
            frames,
            fall_speed,
            wait: 0,
        }
    }
}

/// Random leftmost column keeping a `width`-wide shape inside the border
fn pick_column(rng: &mut impl Rng, columns: i32, width: i32) -> i32 {
    let max = (columns - width - 1).max(1);
    rng.random_range(1..=max)
}

impl Behavior for DebrisSpawner {
    fn name(&self) -> &'static str {
        "spawner"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        if self.wait > 0 {
            self.wait -= 1;
            return Ok(Step::Suspend);
        }

        let Some(delay) = cx.world.timeline.spawn_delay() else {
            self.wait = SPAWN_RETRY_TICKS;
            return Ok(Step::Suspend);
        };

        if let Some(frame) = self.frames.choose(&mut cx.world.rng).cloned() {
            let (rows, columns) = frame_size(&frame);
            if rows == 0 {
                log::debug!("skipping blank debris frame");
            } else {
                let (_, width) = cx.bounds();
                let column = pick_column(&mut cx.world.rng, width, columns);
                let debris = FallingDebris::new(&cx.world.obstacles, frame, 0.0, column as f32, self.fall_speed);
                cx.spawn(debris);
            }
        }

        // This step already counts as the first tick of the delay
        self.wait = delay.saturating_sub(1);
        Ok(Step::Suspend)
    }
}
