//! Game state and core simulation types
//!
//! The session owns every mutable entity; there are no ambient globals. The
//! single game thread mutates it between frames, and the presentation layer
//! reads a [`Snapshot`] plus drained [`GameEvent`]s instead of live state.

use std::collections::HashSet;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL, WORLD_H, WORLD_W};
use crate::tuning::Tuning;

use super::grid::{self, Direction};

/// Power-up types
///
/// SlowDown and ReverseControls are declared (they spawn, render, and occupy
/// the slot machinery) but have no wired gameplay effect yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    SlowDown,
    ReverseControls,
    ExtraPoints,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowDown,
        PowerUpKind::ReverseControls,
        PowerUpKind::ExtraPoints,
        PowerUpKind::Shield,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::SlowDown => "Slow Down",
            PowerUpKind::ReverseControls => "Reverse Controls",
            PowerUpKind::ExtraPoints => "Extra Points",
            PowerUpKind::Shield => "Shield",
        }
    }
}

/// An uncollected power-up on the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Cell-aligned top-left corner
    pub position: IVec2,
    /// Cell ticks until it despawns unpicked
    pub despawn_ticks: u32,
}

/// The single active food pellet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub position: IVec2,
}

impl Food {
    /// Move to a uniformly random cell (no occupancy exclusion)
    pub fn respawn(&mut self, rng: &mut Pcg32) {
        self.position = grid::random_cell(rng);
    }
}

/// The player snake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Occupied cells, head first
    pub body: Vec<IVec2>,
    /// Committed heading for the current tick (zero before first input)
    pub direction: IVec2,
    /// Pending heading, adopted at the start of the next tick
    pub next_direction: IVec2,
    /// Target segment count; `body` is trimmed lazily toward it
    pub length: usize,
    /// Cells per second
    pub speed: f32,
    pub score: u64,
    /// At most one timed effect occupies the slot at a time
    pub active: Option<PowerUpKind>,
    /// Cell ticks until the active effect wears off
    pub power_up_timer: u32,
    /// Suppresses self-collision failure while set
    pub shield: bool,
    /// Armed by the Extra Life inventory item; not consumed by anything yet
    pub extra_life_armed: bool,
}

impl Snake {
    /// One-segment snake at the world's center cell, not yet moving
    pub fn new(tuning: &Tuning) -> Self {
        let start = IVec2::new(WORLD_W / CELL / 2 * CELL, WORLD_H / CELL / 2 * CELL);
        Self {
            body: vec![start],
            direction: IVec2::ZERO,
            next_direction: IVec2::ZERO,
            length: 1,
            speed: tuning.base_speed,
            score: 0,
            active: None,
            power_up_timer: 0,
            shield: false,
            extra_life_armed: false,
        }
    }

    /// Request a heading change; reversals onto the committed heading are
    /// rejected here, at input time
    pub fn steer(&mut self, dir: Direction) {
        if dir.is_reverse_of(self.direction) {
            return;
        }
        self.next_direction = dir.delta();
    }

    /// Activate a power-up effect, fully reverting any active one first
    pub fn apply_power_up(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        if self.active.is_some() {
            self.clear_power_up(tuning);
        }
        match kind {
            PowerUpKind::SpeedBoost => {
                self.speed *= tuning.speed_boost_factor;
                self.active = Some(PowerUpKind::SpeedBoost);
                self.power_up_timer = tuning.power_up_duration_ticks;
            }
            PowerUpKind::Shield => {
                self.shield = true;
                self.active = Some(PowerUpKind::Shield);
                self.power_up_timer = tuning.power_up_duration_ticks;
            }
            // Instantaneous; the bonus is awarded at the pickup site
            PowerUpKind::ExtraPoints => {}
            // Declared but not wired into movement/input yet
            PowerUpKind::SlowDown | PowerUpKind::ReverseControls => {}
        }
    }

    /// Exactly revert the active effect and clear the slot
    pub fn clear_power_up(&mut self, tuning: &Tuning) {
        match self.active {
            Some(PowerUpKind::SpeedBoost) => self.speed /= tuning.speed_boost_factor,
            Some(PowerUpKind::Shield) => self.shield = false,
            _ => {}
        }
        self.active = None;
        self.power_up_timer = 0;
    }

    /// Explicit repeated-coordinate pass over the body
    pub fn has_duplicate_segment(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        self.body.iter().any(|cell| !seen.insert(*cell))
    }
}

/// Inventory item slots usable mid-round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryItem {
    Shield,
    SpeedBoost,
    ExtraLife,
}

impl InventoryItem {
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryItem::Shield => "Shield",
            InventoryItem::SpeedBoost => "Speed Boost",
            InventoryItem::ExtraLife => "Extra Life",
        }
    }
}

/// Owned item counts, persisted across rounds within a process lifetime
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub shield: u32,
    pub speed_boost: u32,
    pub extra_life: u32,
}

impl Inventory {
    pub fn count(&self, item: InventoryItem) -> u32 {
        match item {
            InventoryItem::Shield => self.shield,
            InventoryItem::SpeedBoost => self.speed_boost,
            InventoryItem::ExtraLife => self.extra_life,
        }
    }

    pub fn add(&mut self, item: InventoryItem) {
        match item {
            InventoryItem::Shield => self.shield += 1,
            InventoryItem::SpeedBoost => self.speed_boost += 1,
            InventoryItem::ExtraLife => self.extra_life += 1,
        }
    }

    /// Consume one of `item`; false (and no change) when none are owned
    pub fn take(&mut self, item: InventoryItem) -> bool {
        let slot = match item {
            InventoryItem::Shield => &mut self.shield,
            InventoryItem::SpeedBoost => &mut self.speed_boost,
            InventoryItem::ExtraLife => &mut self.extra_life,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

/// Discrete notifications for the presentation layer (sound, particles)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    FoodEaten { at: IVec2 },
    PowerUpSpawned { kind: PowerUpKind, at: IVec2 },
    PowerUpPicked { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    PowerUpWoreOff { kind: PowerUpKind },
    Collision { at: IVec2 },
    RoundEnded { score: u64 },
}

/// Read-only state copy handed to the renderer each frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub body: Vec<IVec2>,
    pub food: IVec2,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    pub coins: u32,
    pub inventory: Inventory,
    pub shield: bool,
    pub speed: f32,
}

/// One game session: entities, currency, inventory, RNG, pending events
///
/// Created once at program start; [`GameSession::reset`] re-initializes the
/// round without discarding coins or inventory.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Food,
    pub power_ups: Vec<PowerUp>,
    pub coins: u32,
    pub inventory: Inventory,
    pub tuning: Tuning,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let food = Food {
            position: grid::random_cell(&mut rng),
        };
        log::info!("session created (seed {seed})");
        Self {
            snake: Snake::new(&tuning),
            food,
            power_ups: Vec::new(),
            coins: tuning.starting_coins,
            inventory: Inventory::default(),
            tuning,
            seed,
            rng,
            events: Vec::new(),
        }
    }

    /// Fresh round: snake, food, and power-ups reset; coins, inventory, and
    /// high scores (owned elsewhere) persist
    pub fn reset(&mut self) {
        self.snake = Snake::new(&self.tuning);
        self.food.respawn(&mut self.rng);
        self.power_ups.clear();
        self.events.clear();
        log::debug!("session reset");
    }

    /// Use an inventory item; out-of-stock use is silently ignored
    pub fn use_item(&mut self, item: InventoryItem) {
        if !self.inventory.take(item) {
            return;
        }
        match item {
            InventoryItem::Shield => self.snake.apply_power_up(PowerUpKind::Shield, &self.tuning),
            InventoryItem::SpeedBoost => {
                self.snake.apply_power_up(PowerUpKind::SpeedBoost, &self.tuning)
            }
            InventoryItem::ExtraLife => {
                // Activation goes through the same revert-first path as the
                // timed effects, so an active shield or boost is cancelled
                self.snake.clear_power_up(&self.tuning);
                self.snake.extra_life_armed = true;
            }
        }
        log::debug!("used inventory item: {}", item.as_str());
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.snake.body.clone(),
            food: self.food.position,
            power_ups: self.power_ups.clone(),
            score: self.snake.score,
            coins: self.coins,
            inventory: self.inventory,
            shield: self.snake.shield,
            speed: self.snake.speed,
        }
    }
}
