//! Toroidal grid math and movement directions
//!
//! The world is a fixed pixel plane partitioned into square cells. Entity
//! positions are the top-left pixel of their cell except mid-tick, where the
//! head interpolates in single-pixel sub-steps. Exiting one edge re-enters
//! the opposite edge on both axes.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL, WORLD_H, WORLD_W};

/// A committed movement heading (one cell per tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit pixel vector for this heading (screen coordinates, +y is down)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// True if this heading is the exact reverse of `committed`
    ///
    /// A zero committed vector (no movement selected yet) reverses nothing.
    pub fn is_reverse_of(self, committed: IVec2) -> bool {
        committed != IVec2::ZERO && self.delta() == -committed
    }
}

/// Uniformly random cell-aligned position
///
/// Deliberately does not exclude cells occupied by the snake body; a spawn
/// "inside" the snake is allowed.
pub fn random_cell<R: Rng>(rng: &mut R) -> IVec2 {
    let cols = WORLD_W / CELL;
    let rows = WORLD_H / CELL;
    IVec2::new(rng.random_range(0..cols) * CELL, rng.random_range(0..rows) * CELL)
}
