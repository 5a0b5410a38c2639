//! Physics Constants
//!
//! The single constants table shared by the live game loop and the replay
//! validator. Any divergence between the two call sites breaks anti-cheat,
//! so there is exactly one instance: [`PHYSICS`].
//!
//! ## Units
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Positions: logical pixels (500 x 500 world)                │
//! │  Speeds:    pixels per tick                                 │
//! │  Accels:    pixels per tick per tick                        │
//! │  Time:      one tick = 16.67 ms (60 Hz)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use serde::{Serialize, Deserialize};

// =============================================================================
// WORLD
// =============================================================================

/// Logical world width.
pub const WORLD_WIDTH: f64 = 500.0;

/// Logical world height.
pub const WORLD_HEIGHT: f64 = 500.0;

/// Height of the UI chrome strip at the bottom of the world.
pub const FLOOR_CHROME_HEIGHT: f64 = 140.0;

/// Top of the UI chrome strip: the hard floor (500 - 140 = 360).
pub const HARD_FLOOR_Y: f64 = WORLD_HEIGHT - FLOOR_CHROME_HEIGHT;

// =============================================================================
// ACTOR
// =============================================================================

/// Actor width.
pub const ACTOR_WIDTH: f64 = 25.0;

/// Actor height.
pub const ACTOR_HEIGHT: f64 = 20.0;

/// Canonical spawn X: floor(500 / 2) - floor(25 / 2) = 238.
pub const SPAWN_X: f64 = 238.0;

/// Canonical spawn Y: 500 - 150 - 20 = 330.
pub const SPAWN_Y: f64 = WORLD_HEIGHT - 150.0 - ACTOR_HEIGHT;

// =============================================================================
// TIMING
// =============================================================================

/// Fixed simulation step in milliseconds.
pub const TICK_MS: f64 = 16.67;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// =============================================================================
// PHYSICS TABLE
// =============================================================================

/// Physics tuning for one simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConstants {
    /// Lateral acceleration per held direction per tick.
    pub accel: f64,
    /// Lateral speed clamp.
    pub max_speed: f64,
    /// Downward acceleration per tick.
    pub gravity: f64,
    /// Vertical speed set by a jump impulse (negative is up).
    pub jump_speed: f64,
    /// Lateral friction factor with no direction held.
    pub base_friction: f64,
    /// Lateral friction factor while a direction is held.
    pub moving_friction: f64,
    /// Speeds below this magnitude snap to zero.
    pub dead_zone: f64,
    /// Actor width.
    pub actor_width: f64,
    /// Actor height.
    pub actor_height: f64,
    /// World width.
    pub world_width: f64,
    /// World height.
    pub world_height: f64,
    /// Hard floor Y (top of the UI chrome).
    pub floor_y: f64,
}

/// The one physics table. Both the live loop and the validator read this.
pub const PHYSICS: PhysicsConstants = PhysicsConstants {
    accel: 0.5,
    max_speed: 12.0,
    gravity: 0.8,
    jump_speed: -10.0,
    base_friction: 0.8,
    moving_friction: 0.95,
    dead_zone: 0.1,
    actor_width: ACTOR_WIDTH,
    actor_height: ACTOR_HEIGHT,
    world_width: WORLD_WIDTH,
    world_height: WORLD_HEIGHT,
    floor_y: HARD_FLOOR_Y,
};

/// Number of ticks needed to cover `duration_ms` of simulated time.
#[inline]
pub fn ticks_for_duration(duration_ms: u64) -> u32 {
    (duration_ms as f64 / TICK_MS).ceil() as u32
}

/// Tick boundary nearest to a timestamp (ms since run start).
#[inline]
pub fn nearest_tick(t_ms: u64) -> u32 {
    (t_ms as f64 / TICK_MS).round() as u32
}
