//! Core deterministic primitives.
//!
//! Geometry, the physics constants table and hashing. Nothing in here holds
//! state between calls.

pub mod constants;
pub mod rect;
pub mod hash;

// Re-export core types
pub use constants::{PhysicsConstants, PHYSICS, TICK_MS, TICK_RATE};
pub use rect::{Rect, swept_rect};
pub use hash::{StateHash, StateHasher, security_hash};
