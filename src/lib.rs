//! Space Debris - a terminal arcade game
//!
//! Core modules:
//! - `sim`: Cooperative task scheduler, timeline and every game behavior
//! - `renderer`: Character canvas and the crossterm-backed terminal surface
//! - `platform`: Keyboard polling and terminal mode management
//! - `assets`: Frame text for the ship, debris and banners
//! - `settings`: Runtime settings loaded from JSON

pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::Assets;
pub use error::{AssetError, SettingsError, SimError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Wall-clock length of one simulation tick in milliseconds
    pub const TICK_MS: u64 = 100;

    /// Timeline
    pub const START_YEAR: u32 = 1957;
    /// Ticks per calendar year (1.5 s at the default tick length)
    pub const TICKS_PER_YEAR: u32 = 15;
    /// First year the ship's gun works
    pub const WEAPON_YEAR: u32 = 2020;

    /// Ship handling
    pub const SHIP_SPEED_LIMIT: f32 = 2.0;
    /// Velocity multiplier applied every tick before acceleration
    pub const SHIP_FADING: f32 = 0.8;
    /// Peak per-tick acceleration (applied when the ship is at rest)
    pub const SHIP_ACCELERATION: f32 = 0.75;
    /// Below this, an axis without input snaps to zero velocity
    pub const SHIP_STOP_THRESHOLD: f32 = 0.1;

    /// Debris
    pub const DEBRIS_FALL_SPEED: f32 = 0.5;
    /// Spawner back-off while the timeline reports no debris
    pub const SPAWN_RETRY_TICKS: u32 = 10;

    /// Projectile speed (rows per tick, negative is up)
    pub const PROJECTILE_ROW_SPEED: f32 = -0.3;
    pub const PROJECTILE_COLUMN_SPEED: f32 = 0.0;

    /// Stars wait up to this many ticks before their first blink
    pub const STAR_MAX_START_DELAY: u32 = 20;
}
