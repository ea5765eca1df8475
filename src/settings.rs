//! Runtime settings
//!
//! Stored as a JSON file. Missing fields take their defaults, so a partial
//! file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;
use crate::error::SettingsError;

/// Used when `star_symbols` is empty
const FALLBACK_STAR: char = '.';

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Wall-clock length of one tick in milliseconds
    pub tick_ms: u64,

    // === Display ===
    /// Number of stars in the background
    pub star_count: usize,
    /// Glyphs stars are drawn with, picked at random
    pub star_symbols: String,
    /// Outline every registered obstacle (debug overlay)
    pub show_obstacle_outlines: bool,

    // === Audio ===
    /// Terminal bell on shots and explosions
    pub sound: bool,

    // === Session ===
    /// RNG seed; `None` derives one from the clock
    pub seed: Option<u64>,
    /// Directory with frame files; `None` uses the built-in frames
    pub frames_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,

            star_count: 100,
            star_symbols: "+*.:".to_string(),
            show_obstacle_outlines: false,

            sound: true,

            seed: None,
            frames_dir: None,
        }
    }
}

impl Settings {
    /// Tick length, never zero
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Star glyphs as a list, never empty
    pub fn star_glyphs(&self) -> Vec<char> {
        let glyphs: Vec<char> = self
            .star_symbols
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        if glyphs.is_empty() {
            vec![FALLBACK_STAR]
        } else {
            glyphs
        }
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a settings file, falling back to defaults if it can't be used
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write settings as pretty-printed JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
