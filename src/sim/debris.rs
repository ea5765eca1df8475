//! Falling space debris

use std::rc::Rc;

use super::collision::{Obstacle, ObstacleId, ObstacleLease, ObstacleRegistry};
use super::effects::Explosion;
use super::task::{Behavior, Step, StepCtx};
use crate::error::SimError;
use crate::renderer::{draw_frame, frame_size};

/// A piece of debris drifting down the screen.
///
/// Its bounding box is registered for its whole life. The lease is released
/// when the behavior finishes and, failing that, when it is dropped.
#[derive(Debug)]
pub struct FallingDebris {
    frame: Rc<str>,
    row: f32,
    column: f32,
    speed: f32,
    rows: i32,
    lease: Option<ObstacleLease>,
    drawn: bool,
}

impl FallingDebris {
    pub fn new(obstacles: &ObstacleRegistry, frame: Rc<str>, row: f32, column: f32, speed: f32) -> Self {
        let (rows, columns) = frame_size(&frame);
        let lease = obstacles.register(Obstacle::new(row, column, rows, columns));
        Self {
            frame,
            row,
            column,
            speed,
            rows,
            lease: Some(lease),
            drawn: false,
        }
    }

    /// Registry identity, `None` once finished
    pub fn id(&self) -> Option<ObstacleId> {
        self.lease.as_ref().map(ObstacleLease::id)
    }

    pub fn row(&self) -> f32 {
        self.row
    }

    fn erase(&mut self, cx: &mut StepCtx<'_>) {
        if self.drawn {
            draw_frame(cx.canvas, self.row, self.column, &self.frame, true);
            self.drawn = false;
        }
    }

    fn finish(&mut self, cx: &mut StepCtx<'_>) -> Step {
        self.erase(cx);
        self.lease = None;
        Step::DONE
    }
}

impl Behavior for FallingDebris {
    fn name(&self) -> &'static str {
        "debris"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        let Some(id) = self.id() else {
            return Ok(Step::DONE);
        };

        if cx.world.hits.take(id) {
            let (center_row, center_column) = self
                .lease
                .as_ref()
                .and_then(ObstacleLease::obstacle)
                .map_or((self.row, self.column), |obstacle| obstacle.center());
            log::debug!("{id} destroyed at row {:.1}", self.row);
            cx.spawn(Explosion::new(center_row, center_column));
            return Ok(self.finish(cx));
        }

        self.erase(cx);
        self.row += self.speed;
        if let Some(lease) = &self.lease {
            lease.set_row(self.row);
        }

        let (rows, _) = cx.bounds();
        let bottom = (rows - self.rows - 1) as f32;
        if self.row >= bottom {
            return Ok(self.finish(cx));
        }

        draw_frame(cx.canvas, self.row, self.column, &self.frame, false);
        self.drawn = true;
        Ok(Step::Suspend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Grid;
    use crate::sim::task::{World, step_once};

    const TRASH: &str = "[#]\n[#]\n";

    #[test]
    fn test_falls_to_bottom_and_deregisters() {
        let mut world = World::new(1);
        let mut grid = Grid::new(20, 30);
        let mut debris = FallingDebris::new(&world.obstacles, Rc::from(TRASH), 3.0, 4.0, 0.5);
        assert_eq!(world.obstacles.len(), 1);

        // footprint 2 rows: bottom is row 17, reached after (19 - 2 - 3) / 0.5 ticks
        let expected = ((19.0f32 - 2.0 - 3.0) / 0.5).ceil() as usize;
        let mut ticks = 0;
        loop {
            let (step, spawned) = step_once(&mut debris, &mut world, &mut grid);
            assert!(spawned.is_empty());
            ticks += 1;
            if step.unwrap() == Step::DONE {
                break;
            }
            assert!(grid.count('#') > 0);
        }
        assert_eq!(ticks, expected);
        assert!(debris.row() >= 17.0);
        assert!(world.obstacles.is_empty());
        assert_eq!(grid.count('#'), 0);
    }

    #[test]
    fn test_registry_follows_fall() {
        let mut world = World::new(1);
        let mut grid = Grid::new(20, 30);
        let mut debris = FallingDebris::new(&world.obstacles, Rc::from(TRASH), 0.0, 4.0, 0.5);
        let id = debris.id().unwrap();

        for _ in 0..4 {
            let _ = step_once(&mut debris, &mut world, &mut grid);
        }
        assert_eq!(world.obstacles.get(id).map(|o| o.row), Some(2.0));
    }

    #[test]
    fn test_hit_explodes_and_consumes_signal() {
        let mut world = World::new(1);
        let mut grid = Grid::new(20, 30);
        let mut debris = FallingDebris::new(&world.obstacles, Rc::from(TRASH), 2.0, 4.0, 0.5);
        let id = debris.id().unwrap();

        let _ = step_once(&mut debris, &mut world, &mut grid);
        world.hits.signal(id);

        let (step, spawned) = step_once(&mut debris, &mut world, &mut grid);
        assert_eq!(step, Ok(Step::DONE));
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].name(), "explosion");
        assert!(world.hits.is_empty());
        assert!(world.obstacles.is_empty());
        assert_eq!(grid.count('#'), 0);
    }

    #[test]
    fn test_drop_mid_flight_releases_lease() {
        let mut world = World::new(1);
        let mut grid = Grid::new(20, 30);
        let mut debris = FallingDebris::new(&world.obstacles, Rc::from(TRASH), 0.0, 4.0, 0.5);
        let _ = step_once(&mut debris, &mut world, &mut grid);
        assert_eq!(world.obstacles.len(), 1);
        drop(debris);
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_ignores_other_obstacles_hits() {
        let mut world = World::new(1);
        let mut grid = Grid::new(20, 30);
        let mut debris = FallingDebris::new(&world.obstacles, Rc::from(TRASH), 0.0, 4.0, 0.5);
        let other = world.obstacles.register(Obstacle::new(0.0, 20.0, 1, 1));
        world.hits.signal(other.id());

        let (step, _) = step_once(&mut debris, &mut world, &mut grid);
        assert_eq!(step, Ok(Step::Suspend));
        assert!(world.hits.contains(other.id()));
    }
}
