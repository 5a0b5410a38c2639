//! Kinematics
//!
//! Per-tick speed integration before collision resolution, plus the
//! friction pass that runs after it.

use crate::core::constants::PhysicsConstants;
use crate::game::input::InputFlags;
use crate::game::state::Actor;

/// Apply held directions to lateral speed, then clamp.
///
/// Both directions held cancel out.
#[inline]
pub fn accelerate(actor: &mut Actor, input: &InputFlags, physics: &PhysicsConstants) {
    if input.left_held {
        actor.lateral_speed -= physics.accel;
    }
    if input.right_held {
        actor.lateral_speed += physics.accel;
    }
    actor.lateral_speed = actor.lateral_speed.clamp(-physics.max_speed, physics.max_speed);
}

/// Add one tick of gravity. Unconditional.
#[inline]
pub fn apply_gravity(actor: &mut Actor, physics: &PhysicsConstants) {
    actor.vertical_speed += physics.gravity;
}

/// Apply a jump impulse and leave the ground.
#[inline]
pub fn apply_jump(actor: &mut Actor, physics: &PhysicsConstants) {
    actor.vertical_speed = physics.jump_speed;
    actor.on_ground = false;
}

/// Friction factor for this tick's input.
#[inline]
pub fn friction_factor(input: &InputFlags, physics: &PhysicsConstants) -> f64 {
    if input.has_direction() {
        physics.moving_friction
    } else {
        physics.base_friction
    }
}

/// Apply lateral friction and snap tiny speeds to zero.
///
/// Runs after all positional resolution for the tick.
#[inline]
pub fn apply_friction(actor: &mut Actor, input: &InputFlags, physics: &PhysicsConstants) {
    actor.lateral_speed *= friction_factor(input, physics);

    // Stop micro-drift
    if actor.lateral_speed.abs() < physics.dead_zone {
        actor.lateral_speed = 0.0;
    }
    if actor.vertical_speed.abs() < physics.dead_zone {
        actor.vertical_speed = 0.0;
    }
}
