//! Authoritative Simulation Step
//!
//! The one per-tick update shared by the live game loop and the replay
//! validator. Same code path, same constants table: any divergence between
//! the two breaks anti-cheat.
//!
//! ## Order (load-bearing)
//!
//! 1. Kinematics: lateral accel + clamp, gravity
//! 2. Horizontal pass (discrete solids)
//! 3. Vertical pass (discrete solids) + trigger sweep
//! 4. Friction + dead-zone
//! 5. World bounds (hard floor wins)
//! 6. Jump, only if the actor is grounded and its Y did not change this tick
//!
//! Landing re-arms the jump latch, so a held key hops again one tick after
//! each landing.

use crate::core::hash::{StateHash, StateHasher};
use crate::game::collision::{clamp_to_world, resolve};
use crate::game::events::{SimEvent, SimEventKind};
use crate::game::input::InputFlags;
use crate::game::kinematics::{accelerate, apply_friction, apply_gravity, apply_jump};
use crate::game::state::{SimContext, Simulation};

/// Result of a tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Trigger events generated this tick
    pub events: Vec<SimEvent>,
    /// A jump impulse was applied this tick
    pub jumped: bool,
    /// The actor landed (block or floor) this tick
    pub landed: bool,
}

impl StepResult {
    /// Whether a goal block was touched this tick.
    pub fn goal_reached(&self) -> bool {
        self.events.iter().any(|e| e.kind == SimEventKind::GoalReached)
    }

    /// Whether a hazard block was touched this tick.
    pub fn hazard_hit(&self) -> bool {
        self.events.iter().any(|e| e.kind == SimEventKind::HazardHit)
    }
}

/// Run one simulation tick.
///
/// Mutates only `sim`; the block set in `ctx` is read-only.
pub fn step(ctx: &SimContext<'_>, sim: &mut Simulation, input: &InputFlags) -> StepResult {
    let physics = ctx.physics;
    let mut result = StepResult::default();

    sim.tick += 1;
    sim.latch.observe(input);
    let old_y = sim.actor.y;

    // 1. Kinematics
    accelerate(&mut sim.actor, input, physics);
    apply_gravity(&mut sim.actor, physics);

    // 2-3. Collision
    let outcome = resolve(ctx, &sim.actor);
    let actor = &mut sim.actor;
    actor.x = outcome.x;
    actor.y = outcome.y;
    actor.lateral_speed = outcome.lateral_speed;
    actor.vertical_speed = outcome.vertical_speed;
    let mut landed = outcome.landed;

    // 4. Friction
    apply_friction(actor, input, physics);

    // 5. World bounds
    clamp_to_world(actor, &mut landed, physics);
    actor.on_ground = landed;

    // 6. Jump on a confirmed rest
    sim.latch.reset_on_landing(landed);
    let resting = landed && actor.y == old_y;
    if sim.latch.try_fire(input, resting) {
        apply_jump(actor, physics);
        result.jumped = true;
    }

    result.landed = landed;
    if outcome.touched_goal {
        result.events.push(SimEvent::goal_reached(sim.tick));
    }
    if outcome.touched_hazard {
        result.events.push(SimEvent::hazard_hit(sim.tick));
    }

    result
}

// =============================================================================
// TRAJECTORY DIGEST
// =============================================================================

/// Running digest of a whole trajectory, one entry per tick.
///
/// Two runs with bit-identical trajectories produce identical digests.
pub struct TrajectoryDigest {
    hasher: StateHasher,
}

impl TrajectoryDigest {
    /// Start an empty digest.
    pub fn new() -> Self {
        Self {
            hasher: StateHasher::for_trajectory(),
        }
    }

    /// Fold the post-tick simulation state into the digest.
    pub fn record(&mut self, sim: &Simulation) {
        self.hasher.update_u32(sim.tick);
        sim.actor.hash_into(&mut self.hasher);
    }

    /// Finish and return the digest.
    pub fn finish(self) -> StateHash {
        self.hasher.finalize()
    }
}

impl Default for TrajectoryDigest {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a scripted run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Final simulation state.
    pub sim: Simulation,
    /// All trigger events, in tick order.
    pub events: Vec<SimEvent>,
    /// Number of jump impulses applied.
    pub jumps: u32,
    /// Digest of every post-tick state.
    pub trajectory_hash: StateHash,
}

/// Drive `sim` through a per-tick input script.
pub fn run_inputs(ctx: &SimContext<'_>, mut sim: Simulation, inputs: &[InputFlags]) -> RunSummary {
    let mut digest = TrajectoryDigest::new();
    let mut events = Vec::new();
    let mut jumps = 0;

    for input in inputs {
        let result = step(ctx, &mut sim, input);
        if result.jumped {
            jumps += 1;
        }
        events.extend(result.events);
        digest.record(&sim);
    }

    RunSummary {
        sim,
        events,
        jumps,
        trajectory_hash: digest.finish(),
    }
}
