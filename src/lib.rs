//! # Pixel Perfect Platformer Core
//!
//! Deterministic platformer physics and replay-based anti-cheat for Pixel
//! Perfect Platformer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PIXEL PERFECT CORE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Deterministic primitives                │
//! │  ├── constants.rs  - The one physics constants table         │
//! │  ├── rect.rs       - AABB overlap and swept boxes            │
//! │  └── hash.rs       - Trajectory digests, security hash       │
//! │                                                              │
//! │  game/             - Simulation (deterministic)              │
//! │  ├── level.rs      - Blocks and spawn                        │
//! │  ├── input.rs      - Input flags and jump latch              │
//! │  ├── state.rs      - Actor and simulation state              │
//! │  ├── kinematics.rs - Speed integration, friction             │
//! │  ├── collision.rs  - Solid resolution, trigger sweep         │
//! │  ├── tick.rs       - Authoritative step function             │
//! │  └── session.rs    - Live run (wall clock, recorder)         │
//! │                                                              │
//! │  replay/           - Anti-cheat                              │
//! │  ├── log.rs        - Replay log and codecs                   │
//! │  ├── recorder.rs   - Input recorder                          │
//! │  ├── validate.rs   - Re-simulation and cross-checks          │
//! │  └── submission.rs - Leaderboard submission gate             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The live run and the validator call the same `game::tick::step` with the
//! same `PHYSICS` table:
//! - No global mutable state (context and simulation are passed explicitly)
//! - Blocks visited in editor order
//! - No wall clock inside the step function
//!
//! Given identical inputs and blocks, two runs produce bit-identical
//! trajectories.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod replay;

// Re-export commonly used types
pub use crate::core::constants::{PhysicsConstants, PHYSICS, TICK_MS, TICK_RATE};
pub use game::input::InputFlags;
pub use game::level::{Block, BlockKind, Level};
pub use game::state::{Actor, SimContext, Simulation};
pub use game::tick::step;
pub use replay::{ReplayLog, ReplayValidator, SubmissionGate, ValidationResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
