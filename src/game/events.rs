//! Simulation Events
//!
//! Trigger events produced by the step function, for the live loop and for
//! replay diagnostics.

use serde::{Serialize, Deserialize};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimEventKind {
    /// The actor touched a goal block.
    GoalReached,
    /// The actor touched a hazard block.
    HazardHit,
}

/// A trigger event with the tick it happened on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimEvent {
    /// Tick when the event occurred (1-based: the tick that produced it).
    pub tick: u32,
    /// Event kind.
    pub kind: SimEventKind,
}

impl SimEvent {
    /// Create goal reached event.
    pub fn goal_reached(tick: u32) -> Self {
        Self { tick, kind: SimEventKind::GoalReached }
    }

    /// Create hazard hit event.
    pub fn hazard_hit(tick: u32) -> Self {
        Self { tick, kind: SimEventKind::HazardHit }
    }
}
