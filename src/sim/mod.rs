//! Simulation module
//!
//! All gameplay logic lives here. It draws through the [`Canvas`] trait and
//! reads input from [`World`], so it runs the same against a terminal or an
//! in-memory grid:
//! - One step per behavior per tick
//! - Seeded RNG only
//! - Stable scheduling order (spawn order)
//!
//! [`Canvas`]: crate::renderer::Canvas

pub mod collision;
pub mod debris;
pub mod effects;
pub mod game;
pub mod physics;
pub mod projectile;
pub mod scenario;
pub mod scheduler;
pub mod ship;
pub mod spawner;
pub mod task;
pub mod timeline;

pub use collision::{CollisionChannel, Obstacle, ObstacleId, ObstacleLease, ObstacleRegistry, Rect};
pub use debris::FallingDebris;
pub use effects::{Explosion, GameOverBanner, ObstacleOutlines, Star, StatusLine};
pub use game::Game;
pub use physics::update_velocity;
pub use projectile::Projectile;
pub use scheduler::{GameMode, Scheduler, TaskId, TickReport};
pub use ship::{ShipController, ShipState, ShipTuning};
pub use spawner::DebrisSpawner;
pub use task::{Behavior, Sentinel, Step, StepCtx, TickInput, World};
pub use timeline::Timeline;
