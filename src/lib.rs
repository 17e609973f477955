//! Neon Snake - a neon-styled arcade snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid math, entities, cell ticks)
//! - `screens`: Screen state machine and input routing
//! - `shop`: Item catalog, purchases, coin packages
//! - `highscores`: Leaderboard with JSON file persistence
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod screens;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use screens::{Input, Screen, ScreenFlow};
pub use tuning::Tuning;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// World dimensions in pixels
    pub const WORLD_W: i32 = 1280;
    pub const WORLD_H: i32 = 720;
    /// Grid cell side in pixels; all entity positions are cell-aligned
    pub const CELL: i32 = 24;

    /// Frame loop rate driving the time accumulator
    pub const NOMINAL_TICK_RATE: u32 = 60;

    /// Snake base speed in cells per second
    pub const BASE_SPEED: f32 = 5.0;
    /// Score awarded per food consumed
    pub const FOOD_SCORE: u64 = 10;
    /// Instant bonus for the ExtraPoints power-up
    pub const EXTRA_POINTS_BONUS: u64 = 50;

    /// Speed multiplier while SpeedBoost is active
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    /// Active effect duration: 30 seconds of cell ticks at the nominal rate
    pub const POWER_UP_DURATION_TICKS: u32 = 30 * NOMINAL_TICK_RATE;
    /// Cell ticks an uncollected power-up stays on the grid
    pub const POWER_UP_DESPAWN_TICKS: u32 = 600;
    /// Maximum simultaneous uncollected power-ups
    pub const POWER_UP_CAP: usize = 2;
    /// Chance of a power-up spawning on food consumption
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.3;

    /// Currency balance at session creation
    pub const STARTING_COINS: u32 = 300;

    /// Intro screen duration (wall seconds) before the menu
    pub const INTRO_DURATION_SECS: f32 = 3.0;
    /// Payment processing sub-state duration (wall seconds)
    pub const PAYMENT_PROCESSING_SECS: f32 = 2.0;
    /// Maximum high-score name length
    pub const NAME_MAX_LEN: usize = 12;
}

/// Wrap a pixel position onto the toroidal world (both axes)
#[inline]
pub fn wrap_position(pos: IVec2) -> IVec2 {
    IVec2::new(
        pos.x.rem_euclid(consts::WORLD_W),
        pos.y.rem_euclid(consts::WORLD_H),
    )
}

/// Snap a wrapped pixel position down to its enclosing cell's top-left corner
#[inline]
pub fn snap_to_cell(pos: IVec2) -> IVec2 {
    IVec2::new(
        pos.x / consts::CELL * consts::CELL,
        pos.y / consts::CELL * consts::CELL,
    )
}
