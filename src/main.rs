//! Space Debris entry point
//!
//! Parses the command line, sets up the terminal and runs the real-time
//! loop: poll keys, tick the game, draw the border, present, sleep.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use space_debris::platform::{TerminalSession, poll_controls};
use space_debris::renderer::{TerminalCanvas, draw_border};
use space_debris::sim::{Game, GameMode};
use space_debris::{Assets, Settings};

#[derive(Parser, Debug)]
#[command(name = "space-debris")]
#[command(about = "Dodge and shoot falling space junk in your terminal")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
    /// Directory with frame files to use instead of the built-in ones
    #[arg(long)]
    frames_dir: Option<PathBuf>,
    /// Outline every obstacle's bounding box
    #[arg(long, default_value_t = false)]
    show_outlines: bool,
    /// Disable the terminal bell
    #[arg(long, default_value_t = false)]
    mute: bool,
    /// Print the effective settings as JSON and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,
}

impl Cli {
    /// Settings file (or defaults) with command-line overrides applied
    fn settings(&self) -> Settings {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::default(),
        };
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.frames_dir.is_some() {
            settings.frames_dir = self.frames_dir.clone();
        }
        if self.show_outlines {
            settings.show_obstacle_outlines = true;
        }
        if self.mute {
            settings.sound = false;
        }
        settings
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = cli.settings();

    if cli.dump_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let assets = match &settings.frames_dir {
        Some(dir) => Assets::load_dir(dir)
            .with_context(|| format!("loading frames from {}", dir.display()))?,
        None => Assets::builtin(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Space Debris starting with seed {seed}");

    run(&settings, &assets, seed)
}

fn run(settings: &Settings, assets: &Assets, seed: u64) -> Result<()> {
    let session = TerminalSession::enter().context("failed to prepare the terminal")?;
    let (rows, columns) = session.size().context("failed to read terminal size")?;
    let mut canvas: TerminalCanvas<Stdout> = TerminalCanvas::new(io::stdout(), rows, columns);
    let mut game = Game::new(settings, assets, (i32::from(rows), i32::from(columns)), seed);
    let tick = settings.tick_duration();

    loop {
        let started = Instant::now();

        let controls = poll_controls().context("failed to read input")?;
        if controls.quit {
            break;
        }
        if controls.toggle_sound {
            let world = game.world_mut();
            world.sound = !world.sound;
            log::info!("sound {}", if world.sound { "on" } else { "muted" });
        }
        if let Some((rows, columns)) = controls.resized {
            log::debug!("terminal resized to {rows}x{columns}");
            canvas.resize(rows, columns);
        }

        let report = game.tick(&mut canvas, controls.input)?;
        if report.game_over {
            log::info!("Game over in {}", game.year());
        }
        draw_border(&mut canvas);
        canvas.present().context("failed to draw")?;

        if let Some(rest) = tick.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    drop(session);
    let outcome = match game.mode() {
        GameMode::Playing => "quit while playing",
        GameMode::GameOver => "quit after game over",
    };
    log::info!("Session ended in year {} ({outcome})", game.year());
    Ok(())
}
