//! Simulation State
//!
//! The actor and the per-run simulation that owns it. One `Simulation` per
//! running instance (live game or validator); they never share an actor.

use serde::{Serialize, Deserialize};

use crate::core::constants::PhysicsConstants;
use crate::core::hash::{StateHash, StateHasher};
use crate::core::rect::Rect;
use crate::game::input::JumpLatch;
use crate::game::level::{Block, Spawn};

// =============================================================================
// ACTOR
// =============================================================================

/// The player-controlled rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (constant for the run).
    pub width: f64,
    /// Height (constant for the run).
    pub height: f64,
    /// Horizontal speed, pixels per tick.
    pub lateral_speed: f64,
    /// Vertical speed, pixels per tick (positive is down).
    pub vertical_speed: f64,
    /// Resting on a block or the floor after the last tick.
    pub on_ground: bool,
}

impl Actor {
    /// Create a stationary actor at a position.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            lateral_speed: 0.0,
            vertical_speed: 0.0,
            on_ground: false,
        }
    }

    /// Create an actor at a spawn point, sized by the physics table.
    pub fn spawn(spawn: Spawn, physics: &PhysicsConstants) -> Self {
        Self::new(spawn.x, spawn.y, physics.actor_width, physics.actor_height)
    }

    /// Current bounding box.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Add this actor to a state hash.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_f64(self.x);
        hasher.update_f64(self.y);
        hasher.update_f64(self.lateral_speed);
        hasher.update_f64(self.vertical_speed);
        hasher.update_bool(self.on_ground);
    }
}

// =============================================================================
// SIMULATION CONTEXT
// =============================================================================

/// Read-only inputs to every tick: the constants table and the block set.
///
/// Passed explicitly into kinematics, collision and the step function.
#[derive(Clone, Copy, Debug)]
pub struct SimContext<'a> {
    /// Physics tuning.
    pub physics: &'a PhysicsConstants,
    /// Level blocks, in editor order.
    pub blocks: &'a [Block],
}

impl<'a> SimContext<'a> {
    /// Create a context over a block set.
    pub fn new(physics: &'a PhysicsConstants, blocks: &'a [Block]) -> Self {
        Self { physics, blocks }
    }
}

// =============================================================================
// SIMULATION
// =============================================================================

/// Mutable state of one running simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// The actor.
    pub actor: Actor,
    /// Jump press latch.
    pub latch: JumpLatch,
    /// Ticks simulated so far.
    pub tick: u32,
}

impl Simulation {
    /// Start a simulation with a fresh actor at `spawn`.
    pub fn new(spawn: Spawn, physics: &PhysicsConstants) -> Self {
        Self::with_actor(Actor::spawn(spawn, physics))
    }

    /// Start a simulation from an explicit actor.
    pub fn with_actor(actor: Actor) -> Self {
        Self {
            actor,
            latch: JumpLatch::new(),
            tick: 0,
        }
    }

    /// Deterministic digest of the full simulation state.
    pub fn state_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_simulation();
        hasher.update_u32(self.tick);
        self.actor.hash_into(&mut hasher);
        hasher.update_bool(self.latch.is_used());
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::PHYSICS;

    #[test]
    fn test_spawn_uses_physics_size() {
        let sim = Simulation::new(Spawn::default(), &PHYSICS);
        assert_eq!(sim.actor.rect(), Rect::new(238.0, 330.0, 25.0, 20.0));
        assert_eq!(sim.actor.bottom(), 350.0);
        assert!(!sim.actor.on_ground);
        assert_eq!(sim.tick, 0);
    }

    #[test]
    fn test_state_hash_tracks_changes() {
        let a = Simulation::new(Spawn::default(), &PHYSICS);
        let mut b = a.clone();
        assert_eq!(a.state_hash(), b.state_hash());

        b.actor.x += 0.5;
        assert_ne!(a.state_hash(), b.state_hash());
    }
}
