//! Data-driven game balance
//!
//! Every gameplay number that is a balance decision rather than a structural
//! constant lives here, so a tuning pass is a JSON edit instead of a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Snake base speed, cells per second
    pub base_speed: f32,
    /// Score per food consumed
    pub food_score: u64,
    /// Instant bonus for the ExtraPoints power-up
    pub extra_points_bonus: u64,
    /// Speed multiplier while SpeedBoost is active
    pub speed_boost_factor: f32,
    /// Active effect duration in cell ticks
    pub power_up_duration_ticks: u32,
    /// Cell ticks an uncollected power-up stays on the grid
    pub power_up_despawn_ticks: u32,
    /// Maximum simultaneous uncollected power-ups
    pub power_up_cap: usize,
    /// Chance of a power-up spawning on food consumption
    pub power_up_spawn_chance: f64,
    /// Currency balance at session creation
    pub starting_coins: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: consts::BASE_SPEED,
            food_score: consts::FOOD_SCORE,
            extra_points_bonus: consts::EXTRA_POINTS_BONUS,
            speed_boost_factor: consts::SPEED_BOOST_FACTOR,
            power_up_duration_ticks: consts::POWER_UP_DURATION_TICKS,
            power_up_despawn_ticks: consts::POWER_UP_DESPAWN_TICKS,
            power_up_cap: consts::POWER_UP_CAP,
            power_up_spawn_chance: consts::POWER_UP_SPAWN_CHANCE,
            starting_coins: consts::STARTING_COINS,
        }
    }
}

impl Tuning {
    /// Load from a JSON file; any failure degrades to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("malformed tuning file {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no tuning file at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current values as pretty JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("failed to save tuning to {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("failed to serialize tuning: {e}"),
        }
    }
}
