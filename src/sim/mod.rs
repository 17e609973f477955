//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed cell ticks only (the frame loop owns the time accumulator)
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! One cell tick advances the snake by exactly one grid cell, interpolated in
//! single-pixel sub-steps so food can be detected mid-cell.

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::{Direction, random_cell};
pub use state::{
    Food, GameEvent, GameSession, Inventory, InventoryItem, PowerUp, PowerUpKind, Snake, Snapshot,
};
pub use tick::{advance, check_collision, check_power_up_pickup};
