//! Collision Resolution
//!
//! Two strategies against the static block set:
//!
//! - **Discrete solid resolution** (`resolve_horizontal`, `resolve_vertical`):
//!   axis-separated, horizontal first, then vertical at the resolved X.
//! - **Swept trigger detection** (`sweep_triggers`): end/kill blocks are
//!   tested against the union of the old and new boxes so a fast actor
//!   cannot tunnel through a thin trigger within one tick.
//!
//! World bounds are applied separately by `clamp_to_world`. Resolution never
//! fails; malformed blocks are skipped.

use crate::core::constants::PhysicsConstants;
use crate::core::rect::{Rect, swept_rect};
use crate::game::level::{Block, BlockKind};
use crate::game::state::{Actor, SimContext};

/// Result of resolving one tick's movement against the block set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Corrected left edge.
    pub x: f64,
    /// Corrected top edge.
    pub y: f64,
    /// Corrected lateral speed.
    pub lateral_speed: f64,
    /// Corrected vertical speed.
    pub vertical_speed: f64,
    /// Landed on a block top (or the floor) this tick.
    pub landed: bool,
    /// Swept box touched a goal block.
    pub touched_goal: bool,
    /// Swept box touched a hazard block.
    pub touched_hazard: bool,
}

/// Solid blocks that can collide, in editor order.
fn solids<'a>(blocks: &'a [Block]) -> impl Iterator<Item = &'a Rect> + 'a {
    blocks
        .iter()
        .filter(|b| b.kind.is_solid() && b.is_well_formed())
        .map(|b| &b.rect)
}

// =============================================================================
// DISCRETE SOLID RESOLUTION
// =============================================================================

/// Resolve a horizontal move from `actor.x` to `new_x`.
///
/// Only blocks overlapping the actor's pre-move vertical band are considered.
/// Blocks are visited in editor order and each one still overlapping the
/// running position clamps it, so the last overlapping block wins.
///
/// Returns the resolved X and whether the move was blocked.
pub fn resolve_horizontal(actor: &Actor, new_x: f64, blocks: &[Block]) -> (f64, bool) {
    let direction = actor.lateral_speed;
    let mut x = new_x;
    let mut blocked = false;

    for block in solids(blocks) {
        if !block.overlaps_y_span(actor.y, actor.height) {
            continue;
        }
        if !block.overlaps_x_span(x, actor.width) {
            continue;
        }

        if direction > 0.0 {
            x = block.x - actor.width;
        } else if direction < 0.0 {
            x = block.right();
        }
        blocked = true;
    }

    (x, blocked)
}

/// Resolved vertical movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalOutcome {
    /// Resolved top edge.
    pub y: f64,
    /// Resolved vertical speed.
    pub vertical_speed: f64,
    /// Landed on a block top.
    pub landed: bool,
}

/// Resolve a vertical move from `old_y` to `new_y` at the resolved `x`.
///
/// Falling: crossing a block top snaps onto it and lands.
/// Rising: crossing a block bottom snaps below it (head bump).
/// Crossings are tested against the running position, so the nearest block
/// along the direction of travel ends up winning regardless of order.
pub fn resolve_vertical(
    x: f64,
    old_y: f64,
    new_y: f64,
    vertical_speed: f64,
    width: f64,
    height: f64,
    blocks: &[Block],
) -> VerticalOutcome {
    let mut outcome = VerticalOutcome {
        y: new_y,
        vertical_speed,
        landed: false,
    };

    for block in solids(blocks) {
        if !block.overlaps_x_span(x, width) {
            continue;
        }

        if vertical_speed > 0.0 {
            let crossed_top = old_y + height <= block.y && outcome.y + height >= block.y;
            if crossed_top {
                outcome.y = block.y - height;
                outcome.vertical_speed = 0.0;
                outcome.landed = true;
            }
        } else if vertical_speed < 0.0 {
            let crossed_bottom = old_y >= block.bottom() && outcome.y <= block.bottom();
            if crossed_bottom {
                outcome.y = block.bottom();
                outcome.vertical_speed = 0.0;
            }
        }
    }

    outcome
}

// =============================================================================
// SWEPT TRIGGER DETECTION
// =============================================================================

/// Trigger blocks touched during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerHits {
    /// A goal block was touched.
    pub goal: bool,
    /// A hazard block was touched.
    pub hazard: bool,
}

/// Test trigger blocks against the box swept from `old` to `new`.
///
/// Overlap is inclusive: grazing an edge counts as touching.
pub fn sweep_triggers(old: &Rect, new: &Rect, blocks: &[Block]) -> TriggerHits {
    let swept = swept_rect(old.x, old.y, new.x, new.y, old.width, old.height);
    let mut hits = TriggerHits::default();

    for block in blocks.iter().filter(|b| b.kind.is_trigger() && b.is_well_formed()) {
        if !swept.touches(&block.rect) {
            continue;
        }
        match block.kind {
            BlockKind::End => hits.goal = true,
            BlockKind::Kill => hits.hazard = true,
            BlockKind::Solid => {}
        }
    }

    hits
}

// =============================================================================
// COMPOSITION
// =============================================================================

/// Resolve an actor whose speeds have already been integrated this tick.
///
/// Runs the horizontal pass, the vertical pass at the resolved X, then the
/// trigger sweep between the old and resolved boxes. World bounds are not
/// applied here.
pub fn resolve(ctx: &SimContext<'_>, actor: &Actor) -> CollisionOutcome {
    let old = actor.rect();

    let (x, blocked) = resolve_horizontal(actor, actor.x + actor.lateral_speed, ctx.blocks);
    let lateral_speed = if blocked { 0.0 } else { actor.lateral_speed };

    let vertical = resolve_vertical(
        x,
        actor.y,
        actor.y + actor.vertical_speed,
        actor.vertical_speed,
        actor.width,
        actor.height,
        ctx.blocks,
    );

    let new = Rect::new(x, vertical.y, actor.width, actor.height);
    let hits = sweep_triggers(&old, &new, ctx.blocks);

    CollisionOutcome {
        x,
        y: vertical.y,
        lateral_speed,
        vertical_speed: vertical.vertical_speed,
        landed: vertical.landed,
        touched_goal: hits.goal,
        touched_hazard: hits.hazard,
    }
}

/// Clamp a resolved actor into the world.
///
/// The hard floor always wins over block collision and counts as landing.
/// The top edge stops upward motion. X stays within the world width. The
/// world bottom is a final safety net.
pub fn clamp_to_world(actor: &mut Actor, landed: &mut bool, physics: &PhysicsConstants) {
    if actor.y + actor.height > physics.floor_y {
        actor.y = physics.floor_y - actor.height;
        actor.vertical_speed = 0.0;
        *landed = true;
    }
    if actor.y < 0.0 {
        actor.y = 0.0;
        actor.vertical_speed = 0.0;
    }

    if actor.x < 0.0 {
        actor.x = 0.0;
    }
    if actor.x + actor.width > physics.world_width {
        actor.x = physics.world_width - actor.width;
    }

    if actor.y + actor.height > physics.world_height {
        actor.y = physics.world_height - actor.height;
        actor.vertical_speed = 0.0;
        *landed = true;
    }
}
