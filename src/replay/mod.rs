//! Replay Module
//!
//! Anti-cheat for submitted runs.
//!
//! ## Pipeline
//!
//! ```text
//! LiveRun ──► InputRecorder ──► ReplayLog (JSON) ──► ReplayValidator ──► SubmissionGate
//!                                                    (re-simulates with      (range checks,
//!                                                     game::tick::step)       security hash)
//! ```

pub mod log;
pub mod recorder;
pub mod validate;
pub mod submission;

pub use log::{InputEvent, InputKind, ReplayError, ReplayLog, REPLAY_FORMAT_VERSION};
pub use recorder::InputRecorder;
pub use validate::{
    ReplayValidator, Resimulation, SuspiciousPattern, ValidationError, ValidationReport,
    ValidationResult, ValidationThresholds,
};
pub use submission::{ScoreClaim, ScoreRecord, SubmissionError, SubmissionGate, SubmissionLimits};
