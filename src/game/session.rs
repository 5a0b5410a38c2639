//! Live Run
//!
//! The interactive call site of the step function: one `frame` per displayed
//! frame, feeding the input recorder as it goes. When the goal is reached the
//! run produces a score claim for the submission gate.

use thiserror::Error;
use tracing::{debug, info};

use crate::core::constants::{PHYSICS, TICK_MS};
use crate::game::input::InputFlags;
use crate::game::level::Level;
use crate::game::state::{SimContext, Simulation};
use crate::game::tick::{step, StepResult};
use crate::replay::log::{InputKind, ReplayLog};
use crate::replay::recorder::InputRecorder;
use crate::replay::submission::ScoreClaim;

// =============================================================================
// CLOCKS
// =============================================================================

/// Wall-clock source in milliseconds since the epoch.
pub trait Clock {
    /// Current time.
    fn now_ms(&self) -> i64;
}

/// The real clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that advances exactly one tick per `advance`.
///
/// For scripted runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct SteppedClock {
    origin_ms: i64,
    ticks: u32,
}

impl SteppedClock {
    /// Start at `origin_ms`.
    pub fn new(origin_ms: i64) -> Self {
        Self { origin_ms, ticks: 0 }
    }

    /// Move forward one tick.
    pub fn advance(&mut self) {
        self.ticks += 1;
    }
}

impl Clock for SteppedClock {
    fn now_ms(&self) -> i64 {
        self.origin_ms + (f64::from(self.ticks) * TICK_MS).round() as i64
    }
}

// =============================================================================
// LIVE RUN
// =============================================================================

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Accepting frames.
    Running,
    /// Goal reached.
    Completed,
    /// Hazard touched.
    Failed,
}

/// Errors building a score claim.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Only completed runs can be submitted.
    #[error("Run is not complete (phase: {0:?})")]
    NotCompleted(RunPhase),

    /// The replay could not be encoded.
    #[error("Failed to encode replay: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One play-through of a level.
#[derive(Debug, Clone)]
pub struct LiveRun {
    level_index: u32,
    level: Level,
    sim: Simulation,
    recorder: InputRecorder,
    jumps: u32,
    phase: RunPhase,
    start_ms: i64,
    end_ms: i64,
}

impl LiveRun {
    /// Spawn a fresh actor and start recording.
    pub fn start(level_index: u32, level: Level, clock: &impl Clock) -> Self {
        let now = clock.now_ms();
        let sim = Simulation::new(level.spawn_point(), &PHYSICS);
        let mut recorder = InputRecorder::new();
        recorder.start(now);

        info!("Starting run on level {} ('{}')", level_index, level.name);

        Self {
            level_index,
            level,
            sim,
            recorder,
            jumps: 0,
            phase: RunPhase::Running,
            start_ms: now,
            end_ms: now,
        }
    }

    /// Advance one tick with this frame's input.
    ///
    /// Jumps are recorded on the tick their impulse is applied. Frames after
    /// the run ends are ignored.
    pub fn frame(&mut self, input: &InputFlags, clock: &impl Clock) -> StepResult {
        if self.phase != RunPhase::Running {
            return StepResult::default();
        }

        let now = clock.now_ms();
        let ctx = SimContext::new(&PHYSICS, &self.level.blocks);
        let result = step(&ctx, &mut self.sim, input);

        if result.jumped {
            self.jumps += 1;
            self.recorder.record_input(InputKind::Jump, now);
        }
        self.recorder.record_frame();

        if result.hazard_hit() {
            self.finish(RunPhase::Failed, now);
        } else if result.goal_reached() {
            self.finish(RunPhase::Completed, now);
        }

        result
    }

    fn finish(&mut self, phase: RunPhase, now: i64) {
        self.phase = phase;
        self.end_ms = now;
        self.recorder.stop();

        match phase {
            RunPhase::Completed => info!(
                "Level {} completed in {:.2}s with {} jumps",
                self.level_index,
                self.elapsed_secs(),
                self.jumps
            ),
            _ => debug!("Run on level {} ended at tick {}", self.level_index, self.sim.tick),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Simulation state.
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Jumps applied so far.
    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    /// Run time in seconds (frozen once the run ends).
    pub fn elapsed_secs(&self) -> f64 {
        (self.end_ms - self.start_ms) as f64 / 1000.0
    }

    /// Replay of the run up to its end.
    pub fn replay(&self) -> ReplayLog {
        self.recorder.replay(self.level_index, self.end_ms)
    }

    /// Score claim for a completed run.
    pub fn claim(&self, user_id: impl Into<String>) -> Result<ScoreClaim, SessionError> {
        if self.phase != RunPhase::Completed {
            return Err(SessionError::NotCompleted(self.phase));
        }

        Ok(ScoreClaim {
            user_id: user_id.into(),
            level_index: self.level_index,
            time: self.elapsed_secs(),
            jumps: self.jumps,
            replay: self.replay().to_json()?,
        })
    }
}
