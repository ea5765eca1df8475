//! Cooperative scheduler
//!
//! Holds every live behavior and advances each by one step per tick.
//!
//! Ordering rules:
//! - A tick iterates a snapshot of the active set taken when the tick
//!   starts. Behaviors spawned during the tick are buffered and first step
//!   on the following tick.
//! - Completed behaviors are dropped immediately, which releases anything
//!   they own (obstacle leases in particular).
//! - A [`Sentinel::GameOver`] completion discards the whole set, including
//!   the rest of the snapshot and this tick's spawns, installs the game-over
//!   behavior and ends the tick on the spot.

use serde::{Deserialize, Serialize};

use super::task::{Behavior, Sentinel, Step, StepCtx, World};
use crate::error::SimError;
use crate::renderer::Canvas;

/// Global game mode. `Playing` → `GameOver` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Playing,
    GameOver,
}

/// Scheduler-assigned task identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

struct Task {
    id: TaskId,
    behavior: Box<dyn Behavior>,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Behaviors stepped
    pub stepped: usize,
    /// Behaviors that completed normally and were removed
    pub completed: usize,
    /// Behaviors spawned (scheduled for next tick)
    pub spawned: usize,
    /// The game-over sentinel fired this tick
    pub game_over: bool,
}

type GameOverFactory = Box<dyn Fn() -> Box<dyn Behavior>>;

pub struct Scheduler {
    active: Vec<Task>,
    next_id: u64,
    mode: GameMode,
    game_over: GameOverFactory,
}

impl Scheduler {
    /// Create an empty scheduler. `game_over` builds the single behavior that
    /// replaces everything once the sentinel fires.
    pub fn new<F>(game_over: F) -> Self
    where
        F: Fn() -> Box<dyn Behavior> + 'static,
    {
        Self {
            active: Vec::new(),
            next_id: 0,
            mode: GameMode::Playing,
            game_over: Box::new(game_over),
        }
    }

    fn allocate(&mut self, behavior: Box<dyn Behavior>) -> Task {
        self.next_id += 1;
        Task {
            id: TaskId(self.next_id),
            behavior,
        }
    }

    /// Register a behavior. It is first stepped by the next `tick()`.
    pub fn spawn(&mut self, behavior: impl Behavior + 'static) -> TaskId {
        self.spawn_boxed(Box::new(behavior))
    }

    pub fn spawn_boxed(&mut self, behavior: Box<dyn Behavior>) -> TaskId {
        let task = self.allocate(behavior);
        let id = task.id;
        self.active.push(task);
        id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Number of live behaviors
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Names of live behaviors in scheduling order
    pub fn task_names(&self) -> Vec<&'static str> {
        self.active.iter().map(|task| task.behavior.name()).collect()
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.active.iter().map(|task| task.id).collect()
    }

    /// Step every behavior in the tick-start snapshot once.
    ///
    /// A behavior error is fatal: it is returned (tagged with the behavior's
    /// name) and the tick's spawns are dropped.
    pub fn tick(&mut self, world: &mut World, canvas: &mut dyn Canvas) -> Result<TickReport, SimError> {
        let snapshot = std::mem::take(&mut self.active);
        let mut survivors = Vec::with_capacity(snapshot.len());
        let mut spawned: Vec<Box<dyn Behavior>> = Vec::new();
        let mut report = TickReport::default();

        let mut pending = snapshot.into_iter();
        while let Some(mut task) = pending.next() {
            let step = {
                let mut cx = StepCtx::new(world, canvas, &mut spawned);
                task.behavior.step(&mut cx)
            };
            report.stepped += 1;

            match step {
                Ok(Step::Suspend) => survivors.push(task),
                Ok(Step::Complete(None)) => {
                    log::trace!("{} {:?} completed", task.behavior.name(), task.id);
                    report.completed += 1;
                }
                Ok(Step::Complete(Some(Sentinel::GameOver))) => {
                    log::info!(
                        "{} signalled game over; discarding {} live tasks",
                        task.behavior.name(),
                        survivors.len() + pending.len() + spawned.len()
                    );
                    // Releases every obstacle lease still held
                    drop(task);
                    drop(pending);
                    drop(survivors);
                    drop(spawned);
                    world.hits.clear();

                    let banner = (self.game_over)();
                    let banner = self.allocate(banner);
                    self.active = vec![banner];
                    self.mode = GameMode::GameOver;
                    report.game_over = true;
                    return Ok(report);
                }
                Err(err) => {
                    let err = err.in_task(task.behavior.name());
                    log::error!("{err}");
                    survivors.push(task);
                    survivors.extend(pending);
                    self.active = survivors;
                    return Err(err);
                }
            }
        }

        report.spawned = spawned.len();
        for behavior in spawned {
            let task = self.allocate(behavior);
            survivors.push(task);
        }
        self.active = survivors;
        Ok(report)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("mode", &self.mode)
            .field("tasks", &self.task_names())
            .finish_non_exhaustive()
    }
}
