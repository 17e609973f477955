//! Fixed cell-tick advancement
//!
//! One tick moves the snake exactly one grid cell, interpolated in
//! single-pixel sub-steps so food is sampled mid-cell. The frame loop decides
//! when a tick is due (time accumulator against `1/speed`); nothing here
//! knows about wall time.

use glam::IVec2;
use rand::Rng;

use crate::consts::CELL;
use crate::{snap_to_cell, wrap_position};

use super::grid;
use super::state::{GameEvent, GameSession, PowerUp, PowerUpKind};

/// Advance the session by one cell tick
///
/// Timer bookkeeping (steps 1-2) runs even when no heading has been selected
/// yet; movement, food sampling, and body growth are skipped in that case.
pub fn advance(session: &mut GameSession) {
    // 1. Active effect countdown; revert exactly once on expiry
    if session.snake.power_up_timer > 0 {
        session.snake.power_up_timer -= 1;
        if session.snake.power_up_timer == 0 {
            if let Some(kind) = session.snake.active {
                session.snake.clear_power_up(&session.tuning);
                session.push_event(GameEvent::PowerUpWoreOff { kind });
                log::debug!("power-up wore off: {}", kind.as_str());
            }
        }
    }

    // 2. Uncollected power-ups time out
    let mut expired = Vec::new();
    for pu in &mut session.power_ups {
        pu.despawn_ticks = pu.despawn_ticks.saturating_sub(1);
        if pu.despawn_ticks == 0 {
            expired.push(pu.kind);
        }
    }
    if !expired.is_empty() {
        session.power_ups.retain(|pu| pu.despawn_ticks > 0);
        for kind in expired {
            session.push_event(GameEvent::PowerUpExpired { kind });
        }
    }

    // 3. Adopt the pending heading; a stationary snake is a no-op tick
    session.snake.direction = session.snake.next_direction;
    let dir = session.snake.direction;
    if dir == IVec2::ZERO {
        return;
    }

    // 4. Interpolate the head one pixel at a time, wrapping each axis and
    //    sampling the enclosing cell for food. The latch keeps consumption
    //    at once per tick no matter how many sub-steps land in the cell.
    let mut pos = session.snake.body[0];
    let mut eaten_at: Option<IVec2> = None;
    for _ in 0..CELL {
        pos = wrap_position(pos + dir);
        let cell = snap_to_cell(pos);
        if eaten_at.is_none() && cell == session.food.position {
            eaten_at = Some(cell);
        }
    }

    if let Some(at) = eaten_at {
        consume_food(session, at);
    }

    // 5. Snap the final sub-pixel position to its cell and grow at the head
    session.snake.body.insert(0, snap_to_cell(pos));

    // 6. Lazy tail trim; length was already bumped if food was consumed, so
    //    the tail survives one extra tick after eating (grow-by-one)
    if session.snake.body.len() > session.snake.length.max(1) {
        session.snake.body.pop();
    }
}

/// Food consumption side effects, at most once per tick
fn consume_food(session: &mut GameSession, at: IVec2) {
    session.snake.length += 1;
    session.snake.score += session.tuning.food_score;
    session.food.respawn(&mut session.rng);
    session.push_event(GameEvent::FoodEaten { at });

    // The spawn roll is drawn unconditionally; the cap rejects it afterwards
    let roll = session.rng.random_bool(session.tuning.power_up_spawn_chance);
    if roll && session.power_ups.len() < session.tuning.power_up_cap {
        spawn_power_up(session);
    }
}

/// Spawn one power-up of uniformly random kind at a uniformly random cell
fn spawn_power_up(session: &mut GameSession) {
    let kind = PowerUpKind::ALL[session.rng.random_range(0..PowerUpKind::ALL.len())];
    let at = grid::random_cell(&mut session.rng);
    session.power_ups.push(PowerUp {
        kind,
        position: at,
        despawn_ticks: session.tuning.power_up_despawn_ticks,
    });
    session.push_event(GameEvent::PowerUpSpawned { kind, at });
    log::debug!("power-up spawned: {} at {at}", kind.as_str());
}

/// Compare the head cell to every uncollected power-up; apply and consume on
/// an exact match
pub fn check_power_up_pickup(session: &mut GameSession) {
    let head = session.snake.body[0];
    let mut picked = Vec::new();
    session.power_ups.retain(|pu| {
        if pu.position == head {
            picked.push(pu.kind);
            false
        } else {
            true
        }
    });
    for kind in picked {
        session.snake.apply_power_up(kind, &session.tuning);
        if kind == PowerUpKind::ExtraPoints {
            session.snake.score += session.tuning.extra_points_bonus;
        }
        session.push_event(GameEvent::PowerUpPicked { kind });
        log::debug!("power-up picked: {}", kind.as_str());
    }
}

/// True iff the body holds a duplicate cell and no shield is active
///
/// Exact positional equality only; no near-miss tolerance.
pub fn check_collision(session: &GameSession) -> bool {
    !session.snake.shield && session.snake.has_duplicate_segment()
}

impl GameSession {
    /// One fixed-timestep update: advance, power-up pickup, collision check.
    /// Returns true when the round has ended.
    pub fn tick(&mut self) -> bool {
        advance(self);
        check_power_up_pickup(self);
        if check_collision(self) {
            let at = self.snake.body[0];
            let score = self.snake.score;
            self.push_event(GameEvent::Collision { at });
            self.push_event(GameEvent::RoundEnded { score });
            log::info!("round over: collision at {at}, score {score}");
            return true;
        }
        false
    }
}
