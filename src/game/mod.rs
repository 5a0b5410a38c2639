//! Game Logic Module
//!
//! The platformer simulation. Deterministic given the same inputs and block
//! set.
//!
//! ## Module Structure
//!
//! - `level`: Blocks, spawn point, level JSON
//! - `input`: Per-tick input flags and the jump latch
//! - `state`: Actor, simulation context, simulation state
//! - `kinematics`: Speed integration and friction
//! - `collision`: Discrete solid resolution, swept triggers, world bounds
//! - `tick`: The authoritative step function
//! - `events`: Goal/hazard events
//! - `session`: The live run driving `tick` and the recorder

pub mod level;
pub mod input;
pub mod state;
pub mod kinematics;
pub mod collision;
pub mod tick;
pub mod events;
pub mod session;

// Re-export key types
pub use level::{Block, BlockKind, Level, Spawn};
pub use input::{InputFlags, JumpLatch};
pub use state::{Actor, SimContext, Simulation};
pub use tick::{step, StepResult};
pub use events::{SimEvent, SimEventKind};
pub use session::{Clock, LiveRun, RunPhase, SteppedClock, SystemClock};
