//! Free-running game calendar
//!
//! Counts driver ticks and turns them into a year. Nothing resets it: a game
//! over leaves the calendar running.

use serde::{Deserialize, Serialize};

use super::scenario;
use crate::consts::{START_YEAR, TICKS_PER_YEAR, WEAPON_YEAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    ticks: u64,
    start_year: u32,
    ticks_per_year: u32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(START_YEAR, TICKS_PER_YEAR)
    }
}

impl Timeline {
    pub fn new(start_year: u32, ticks_per_year: u32) -> Self {
        Self {
            ticks: 0,
            start_year,
            ticks_per_year: ticks_per_year.max(1),
        }
    }

    /// Advance by one driver tick
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    /// Ticks elapsed since the calendar started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn year(&self) -> u32 {
        let elapsed = self.ticks / u64::from(self.ticks_per_year);
        self.start_year
            .saturating_add(u32::try_from(elapsed).unwrap_or(u32::MAX))
    }

    /// Ticks between debris spawns this year, `None` if no debris yet
    pub fn spawn_delay(&self) -> Option<u32> {
        scenario::debris_delay(self.year())
    }

    /// Commentary for the current year (may be empty)
    pub fn phrase(&self) -> &'static str {
        scenario::phrase(self.year())
    }

    /// The gun only works from [`WEAPON_YEAR`] on
    pub fn weapon_unlocked(&self) -> bool {
        self.year() >= WEAPON_YEAR
    }
}
