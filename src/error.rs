//! Error types
//!
//! Out-of-bounds drawing is not an error (the canvas clips), and a blank
//! frame is just a zero-size shape. What remains are genuine defects in the
//! simulation and failures loading frames from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Axis of a directional input or velocity component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// A defect inside the simulation. Any of these halts the driver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("{axis} direction must be -1, 0 or 1, got {value}")]
    InvalidDirection { axis: Axis, value: i8 },
    #[error("fading must be within [0, 1], got {fading}")]
    InvalidFading { fading: f32 },
    #[error("speed limit must be positive and finite, got {limit}")]
    InvalidSpeedLimit { limit: f32 },
    #[error("task {task} failed: {source}")]
    Task {
        task: &'static str,
        #[source]
        source: Box<SimError>,
    },
}

impl SimError {
    /// Attach the name of the failing task
    pub fn in_task(self, task: &'static str) -> Self {
        match self {
            already @ SimError::Task { .. } => already,
            other => SimError::Task {
                task,
                source: Box::new(other),
            },
        }
    }
}

/// Failure loading frame files from a directory
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("frame file not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure writing or parsing a settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}
