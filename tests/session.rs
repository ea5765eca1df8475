//! Whole-session behavior through the public API

use std::rc::Rc;

use space_debris::consts::WEAPON_YEAR;
use space_debris::renderer::Grid;
use space_debris::sim::{
    FallingDebris, Game, GameMode, Scheduler, ShipController, ShipTuning, Star, TickInput, Timeline, World,
};
use space_debris::{Assets, Settings};

const SHIP: &str = " ^ \n/#\\\n";

fn scheduler() -> Scheduler {
    Scheduler::new(|| -> Box<dyn space_debris::sim::Behavior> {
        Box::new(space_debris::sim::GameOverBanner::new(Rc::from("GAME OVER")))
    })
}

fn ship(row: f32, column: f32) -> ShipController {
    ShipController::new(row, column, vec![Rc::from(SHIP)], ShipTuning::default())
}

#[test]
fn crash_replaces_every_task_with_banner() {
    let mut world = World::new(7);
    let mut grid = Grid::new(24, 60);
    let mut scheduler = scheduler();

    scheduler.spawn(Star::new(3, 3, '*', 0));
    scheduler.spawn(ship(10.0, 20.0));
    // Parked right on top of the ship, and queued after it
    scheduler.spawn(FallingDebris::new(&world.obstacles, Rc::from("XX\nXX"), 10.0, 21.0, 0.0));
    scheduler.spawn(Star::new(4, 4, '+', 0));
    assert_eq!(world.obstacles.len(), 1);

    let report = scheduler.tick(&mut world, &mut grid).unwrap();
    assert!(report.game_over);
    // Star and ship ran; the debris and second star never did
    assert_eq!(report.stepped, 2);
    assert_eq!(grid.char_at(4, 4), ' ');
    assert_eq!(scheduler.mode(), GameMode::GameOver);
    assert_eq!(scheduler.task_names(), ["game-over"]);
    assert!(world.obstacles.is_empty());
    assert!(world.hits.is_empty());

    for _ in 0..5 {
        let report = scheduler.tick(&mut world, &mut grid).unwrap();
        assert_eq!(report.stepped, 1);
        assert!(!report.game_over);
    }
    assert!(grid.row_text(11).contains("GAME OVER"));
}

#[test]
fn gun_unlocks_in_weapon_year() {
    let mut world = World::with_timeline(1, Timeline::new(WEAPON_YEAR - 1, 15));
    let mut grid = Grid::new(40, 40);
    let mut scheduler = scheduler();
    scheduler.spawn(ship(30.0, 20.0));

    let fire = TickInput {
        fire: true,
        ..TickInput::default()
    };
    let mut first_shot_year = None;
    for _ in 0..30 {
        world.input = fire;
        let report = scheduler.tick(&mut world, &mut grid).unwrap();
        if report.spawned > 0 && first_shot_year.is_none() {
            assert_eq!(report.spawned, 1);
            first_shot_year = Some(world.timeline.year());
        }
        world.timeline.advance();
    }
    assert_eq!(first_shot_year, Some(WEAPON_YEAR));
    assert!(scheduler.task_names().contains(&"projectile"));
}

#[test]
fn registry_tracks_live_debris() {
    let settings = Settings {
        star_count: 10,
        ..Settings::default()
    };
    let mut game = Game::new(&settings, &Assets::builtin(), (40, 100), 11);
    let mut grid = Grid::new(40, 100);

    let mut saw_debris = false;
    // Through 1961 and into the faster 1969 cadence
    for _ in 0..(13 * 15) {
        game.tick(&mut grid, TickInput::default()).unwrap();
        let debris = game
            .scheduler()
            .task_names()
            .iter()
            .filter(|name| **name == "debris")
            .count();
        assert_eq!(game.world().obstacles.len(), debris);
        saw_debris |= debris > 0;
        if game.mode() == GameMode::GameOver {
            assert!(game.world().obstacles.is_empty());
            break;
        }
    }
    assert!(saw_debris);
}

#[test]
fn same_seed_same_screen() {
    let settings = Settings::default();
    let assets = Assets::builtin();
    let run = || {
        let mut game = Game::new(&settings, &assets, (30, 80), 99);
        let mut grid = Grid::new(30, 80);
        for _ in 0..120 {
            game.tick(&mut grid, TickInput::default()).unwrap();
        }
        grid
    };
    assert_eq!(run(), run());
}
