//! Plasma shot fired by the ship

use super::collision::Rect;
use super::task::{Behavior, Step, StepCtx};
use crate::consts::{PROJECTILE_COLUMN_SPEED, PROJECTILE_ROW_SPEED};
use crate::error::SimError;
use crate::renderer::{Style, draw_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Muzzle spark, first tick
    Spark,
    /// Muzzle flash, second tick
    Flash,
    Flight,
}

/// A projectile travelling in a straight line.
///
/// After every advance it checks the registry; on the first overlapping
/// obstacle it reports the hit on the collision channel and stops. The
/// obstacle's own behavior handles the explosion.
#[derive(Debug, Clone)]
pub struct Projectile {
    row: f32,
    column: f32,
    row_speed: f32,
    column_speed: f32,
    phase: Phase,
    drawn: Option<(i32, i32)>,
}

impl Projectile {
    /// Shot heading straight up at the default speed
    pub fn new(row: f32, column: f32) -> Self {
        Self::with_speed(row, column, PROJECTILE_ROW_SPEED, PROJECTILE_COLUMN_SPEED)
    }

    pub fn with_speed(row: f32, column: f32, row_speed: f32, column_speed: f32) -> Self {
        Self {
            row,
            column,
            row_speed,
            column_speed,
            phase: Phase::Spark,
            drawn: None,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.row, self.column)
    }

    fn symbol(&self) -> char {
        if self.column_speed != 0.0 { '-' } else { '|' }
    }

    fn draw(&mut self, cx: &mut StepCtx<'_>, ch: char) {
        let cell = (self.row.round() as i32, self.column.round() as i32);
        draw_text(cx.canvas, cell.0, cell.1, &ch.to_string(), Style::Normal);
        self.drawn = Some(cell);
    }
}

impl Behavior for Projectile {
    fn name(&self) -> &'static str {
        "projectile"
    }

    fn step(&mut self, cx: &mut StepCtx<'_>) -> Result<Step, SimError> {
        if let Some((row, column)) = self.drawn.take() {
            draw_text(cx.canvas, row, column, " ", Style::Normal);
        }

        match self.phase {
            Phase::Spark => {
                cx.beep();
                self.draw(cx, '*');
                self.phase = Phase::Flash;
            }
            Phase::Flash => {
                self.draw(cx, 'O');
                self.phase = Phase::Flight;
            }
            Phase::Flight => {
                self.row += self.row_speed;
                self.column += self.column_speed;

                let (rows, columns) = cx.bounds();
                let (max_row, max_column) = ((rows - 1) as f32, (columns - 1) as f32);
                let inside = 0.0 < self.row
                    && self.row < max_row
                    && 0.0 < self.column
                    && self.column < max_column;
                if !inside {
                    return Ok(Step::DONE);
                }

                let here = Rect::cell(self.row, self.column);
                if let Some(id) = cx.world.obstacles.first_overlap(&here) {
                    log::debug!("projectile hit {id}");
                    cx.world.hits.signal(id);
                    return Ok(Step::DONE);
                }

                let symbol = self.symbol();
                self.draw(cx, symbol);
            }
        }
        Ok(Step::Suspend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Grid;
    use crate::sim::collision::Obstacle;
    use crate::sim::task::{World, step_once};

    fn run(shot: &mut Projectile, world: &mut World, grid: &mut Grid) -> Step {
        let (step, spawned) = step_once(shot, world, grid);
        assert!(spawned.is_empty());
        step.unwrap()
    }

    #[test]
    fn test_muzzle_flash_then_flight() {
        let mut world = World::new(1);
        let mut grid = Grid::new(20, 10);
        let mut shot = Projectile::with_speed(10.0, 5.0, -1.0, 0.0);

        run(&mut shot, &mut world, &mut grid);
        assert_eq!(grid.char_at(10, 5), '*');
        assert_eq!(grid.beeps(), 1);

        run(&mut shot, &mut world, &mut grid);
        assert_eq!(grid.char_at(10, 5), 'O');

        run(&mut shot, &mut world, &mut grid);
        assert_eq!(grid.char_at(10, 5), ' ');
        assert_eq!(grid.char_at(9, 5), '|');
    }

    #[test]
    fn test_leaves_playfield() {
        let mut world = World::new(1);
        let mut grid = Grid::new(6, 10);
        let mut shot = Projectile::with_speed(3.0, 5.0, -1.0, 0.0);

        let mut steps = 0;
        while run(&mut shot, &mut world, &mut grid) == Step::Suspend {
            steps += 1;
            assert!(steps < 20, "projectile never left");
        }
        // spark, flash, rows 2 and 1, then row 0 is out
        assert_eq!(steps, 4);
        assert_eq!(grid.count(' '), 60);
        assert!(world.hits.is_empty());
    }

    #[test]
    fn test_hit_signals_obstacle_once() {
        let mut world = World::new(1);
        let mut grid = Grid::new(20, 10);
        let lease = world.obstacles.register(Obstacle::new(4.0, 4.0, 2, 3));
        let mut shot = Projectile::with_speed(9.0, 5.0, -1.0, 0.0);

        let mut steps = 0;
        while run(&mut shot, &mut world, &mut grid) == Step::Suspend {
            steps += 1;
        }
        // spark, flash, rows 8, 7, 6; row 5 overlaps
        assert_eq!(steps, 5);
        assert_eq!(shot.position().0, 5.0);
        assert_eq!(world.hits.len(), 1);
        assert!(world.hits.take(lease.id()));
        assert_eq!(grid.count('|'), 0);
    }

    #[test]
    fn test_horizontal_symbol() {
        let mut world = World::new(1);
        let mut grid = Grid::new(10, 20);
        let mut shot = Projectile::with_speed(5.0, 5.0, 0.0, 1.0);
        for _ in 0..3 {
            run(&mut shot, &mut world, &mut grid);
        }
        assert_eq!(grid.char_at(5, 6), '-');
    }
}
