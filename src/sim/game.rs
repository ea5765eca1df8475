//! One play session: the world, the scheduler and the behaviors that make
//! up a fresh game

use rand::Rng;
use rand::seq::IndexedRandom;

use super::effects::{GameOverBanner, ObstacleOutlines, Star, StatusLine};
use super::scheduler::{GameMode, Scheduler, TickReport};
use super::ship::{ShipController, ShipTuning};
use super::spawner::DebrisSpawner;
use super::task::{Behavior, TickInput, World};
use crate::assets::Assets;
use crate::consts::{DEBRIS_FALL_SPEED, STAR_MAX_START_DELAY};
use crate::error::SimError;
use crate::renderer::Canvas;
use crate::settings::Settings;

#[derive(Debug)]
pub struct Game {
    world: World,
    scheduler: Scheduler,
    seed: u64,
}

impl Game {
    /// Build a session for a playfield of `bounds` (rows, columns)
    pub fn new(settings: &Settings, assets: &Assets, bounds: (i32, i32), seed: u64) -> Self {
        let (rows, columns) = bounds;
        let mut world = World::new(seed);
        world.sound = settings.sound;

        let banner = assets.game_over.clone();
        let mut scheduler = Scheduler::new(move || -> Box<dyn Behavior> {
            Box::new(GameOverBanner::new(banner.clone()))
        });

        // Stars need at least one cell inside the border
        if rows > 2 && columns > 2 {
            let glyphs = settings.star_glyphs();
            for _ in 0..settings.star_count {
                let row = world.rng.random_range(1..rows - 1);
                let column = world.rng.random_range(1..columns - 1);
                let symbol = glyphs.choose(&mut world.rng).copied().unwrap_or('*');
                let delay = world.rng.random_range(0..=STAR_MAX_START_DELAY);
                scheduler.spawn(Star::new(row, column, symbol, delay));
            }
        }

        if settings.show_obstacle_outlines {
            scheduler.spawn(ObstacleOutlines::new());
        }

        scheduler.spawn(DebrisSpawner::new(assets.debris.clone(), DEBRIS_FALL_SPEED));

        let (ship_rows, ship_columns) = assets.ship_footprint();
        let start_row = rows / 2 - ship_rows / 2;
        let start_column = columns / 2 - ship_columns / 2;
        scheduler.spawn(ShipController::new(
            start_row as f32,
            start_column as f32,
            assets.rocket.clone(),
            ShipTuning::default(),
        ));

        scheduler.spawn(StatusLine::new());

        log::info!(
            "New game on {rows}x{columns} with seed {seed}, {} tasks",
            scheduler.len()
        );
        Self {
            world,
            scheduler,
            seed,
        }
    }

    /// Run one tick: publish `input`, step every behavior, advance the year
    pub fn tick(&mut self, canvas: &mut dyn Canvas, input: TickInput) -> Result<TickReport, SimError> {
        self.world.input = input;
        let report = self.scheduler.tick(&mut self.world, canvas)?;
        self.world.timeline.advance();
        Ok(report)
    }

    pub fn mode(&self) -> GameMode {
        self.scheduler.mode()
    }

    pub fn year(&self) -> u32 {
        self.world.timeline.year()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
