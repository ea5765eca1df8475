//! Behaviors and the context they run in
//!
//! Every animated thing on screen is a [`Behavior`]: a small state machine
//! the scheduler advances by exactly one [`Behavior::step`] per tick. Where a
//! coroutine would yield, a behavior returns [`Step::Suspend`] and picks up
//! from its stored state on the next call.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{CollisionChannel, ObstacleRegistry};
use super::timeline::Timeline;
use crate::error::SimError;
use crate::renderer::Canvas;

/// Player input sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 up, 1 down
    pub rows_direction: i8,
    /// -1 left, 1 right
    pub columns_direction: i8,
    /// Fire button pressed since the last tick
    pub fire: bool,
}

/// Distinguished completion value that switches the whole game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    GameOver,
}

/// Outcome of one behavior step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep me scheduled; step me again next tick
    Suspend,
    /// Finished. `Some` carries a sentinel for the scheduler.
    Complete(Option<Sentinel>),
}

impl Step {
    pub const DONE: Step = Step::Complete(None);
    pub const GAME_OVER: Step = Step::Complete(Some(Sentinel::GameOver));
}

/// A resumable unit of per-tick logic
pub trait Behavior {
    /// Short name for logs and error reports
    fn name(&self) -> &'static str;

    /// Advance by one tick
    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError>;
}

/// Session state shared by all behaviors
pub struct World {
    pub timeline: Timeline,
    pub obstacles: ObstacleRegistry,
    pub hits: CollisionChannel,
    pub input: TickInput,
    pub rng: Pcg32,
    /// Audible alerts enabled
    pub sound: bool,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self::with_timeline(seed, Timeline::default())
    }

    pub fn with_timeline(seed: u64, timeline: Timeline) -> Self {
        Self {
            timeline,
            obstacles: ObstacleRegistry::new(),
            hits: CollisionChannel::new(),
            input: TickInput::default(),
            rng: Pcg32::seed_from_u64(seed),
            sound: true,
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("timeline", &self.timeline)
            .field("obstacles", &self.obstacles.len())
            .field("hits", &self.hits)
            .field("input", &self.input)
            .field("sound", &self.sound)
            .finish_non_exhaustive()
    }
}

/// What a behavior sees during its step.
///
/// New behaviors go into a buffer owned by the scheduler and only join the
/// active set once the current tick is over.
pub struct StepCtx<'a> {
    pub world: &'a mut World,
    pub canvas: &'a mut dyn Canvas,
    spawned: &'a mut Vec<Box<dyn Behavior>>,
}

impl<'a> StepCtx<'a> {
    pub fn new(
        world: &'a mut World,
        canvas: &'a mut dyn Canvas,
        spawned: &'a mut Vec<Box<dyn Behavior>>,
    ) -> Self {
        Self {
            world,
            canvas,
            spawned,
        }
    }

    /// Schedule a behavior starting next tick
    pub fn spawn(&mut self, behavior: impl Behavior + 'static) {
        log::debug!("spawning {}", behavior.name());
        self.spawned.push(Box::new(behavior));
    }

    /// Playfield size as (rows, columns)
    pub fn bounds(&self) -> (i32, i32) {
        self.canvas.size()
    }

    /// Audible alert, unless muted
    pub fn beep(&mut self) {
        if self.world.sound {
            self.canvas.beep();
        }
    }
}

/// Step a behavior once outside the scheduler. Spawned behaviors are
/// returned instead of scheduled.
#[cfg(test)]
pub(crate) fn step_once(
    behavior: &mut dyn Behavior,
    world: &mut World,
    canvas: &mut dyn Canvas,
) -> (Result<Step, SimError>, Vec<Box<dyn Behavior>>) {
    let mut spawned = Vec::new();
    let step = {
        let mut cx = StepCtx::new(world, canvas, &mut spawned);
        behavior.step(&mut cx)
    };
    (step, spawned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Grid;

    struct Beeper;

    impl Behavior for Beeper {
        fn name(&self) -> &'static str {
            "beeper"
        }

        fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
            cx.beep();
            cx.spawn(Beeper);
            Ok(Step::DONE)
        }
    }

    #[test]
    fn test_spawn_goes_to_buffer() {
        let mut world = World::new(1);
        let mut grid = Grid::new(4, 4);
        let (step, spawned) = step_once(&mut Beeper, &mut world, &mut grid);
        assert_eq!(step, Ok(Step::DONE));
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].name(), "beeper");
        assert_eq!(grid.beeps(), 1);
    }

    #[test]
    fn test_muted_world_does_not_beep() {
        let mut world = World::new(1);
        world.sound = false;
        let mut grid = Grid::new(4, 4);
        let _ = step_once(&mut Beeper, &mut world, &mut grid);
        assert_eq!(grid.beeps(), 0);
    }
}
