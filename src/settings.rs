//! Driver settings
//!
//! Game rules are fixed constants; these only control how the headless
//! session is run. Read from an optional JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation rate
    pub tick_hz: u32,
    /// Stop after this many ticks even if nobody has won
    pub max_ticks: u64,
    /// Button the autoplayer clicks on the start menu
    pub difficulty: Difficulty,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,
    /// Seed for the scripted player
    pub autoplay_seed: u64,
    /// Log a status line every N ticks (0 = never)
    pub status_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: crate::consts::TICK_HZ,
            max_ticks: 36_000,
            difficulty: Difficulty::Easy,
            realtime: false,
            autoplay_seed: 7,
            status_every: 600,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `path`, falling back to defaults when the file is missing or
    /// malformed
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Can't read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }
}
