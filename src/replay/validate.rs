//! Replay Validator
//!
//! Verify a claimed run by deterministic re-simulation.
//!
//! The validator rebuilds the run from a fresh actor using the same step
//! function and constants table as the live game, then cross-checks the
//! claim:
//!
//! 1. Structure: inputs present, ordered, run not absurdly long
//! 2. Re-simulation: every tick checked for unreachable speeds
//! 3. Timing: replay duration vs claimed time, inputs after completion
//! 4. Jump count vs claim
//! 5. Statistical suspicion (reported, never fatal)
//!
//! Every call owns its own `Simulation`; nothing is shared between calls.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::core::constants::{nearest_tick, ticks_for_duration, PhysicsConstants, PHYSICS};
use crate::core::hash::StateHash;
use crate::game::events::{SimEvent, SimEventKind};
use crate::game::input::InputFlags;
use crate::game::level::{Block, Spawn};
use crate::game::state::{Actor, SimContext, Simulation};
use crate::game::tick::{step, TrajectoryDigest};
use crate::replay::log::{ReplayError, ReplayLog};

// =============================================================================
// THRESHOLDS
// =============================================================================

/// Tolerances for the cross-checks.
///
/// These are heuristics, so they are configurable. Missing fields in a JSON
/// config take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    /// Allowed gap between replay duration and claimed time (seconds).
    pub time_tolerance_secs: f64,
    /// Inputs may trail the duration by this much (ms).
    pub late_input_tolerance_ms: u64,
    /// Allowed difference between recorded and claimed jumps.
    pub jump_count_tolerance: u32,
    /// Lateral speed limit as a multiple of max speed.
    pub lateral_speed_factor: f64,
    /// Upward speed limit as a multiple of jump speed.
    pub vertical_speed_factor: f64,
    /// Jump-interval variance below this (ms²) is suspicious.
    pub min_jump_interval_variance: f64,
    /// Intervals needed before variance is judged.
    pub min_jump_intervals: usize,
    /// Human-plausible input rate ceiling.
    pub max_inputs_per_second: f64,
    /// Longest run the validator will simulate (ms).
    pub max_duration_ms: u64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            time_tolerance_secs: 0.1,
            late_input_tolerance_ms: 100,
            jump_count_tolerance: 1,
            lateral_speed_factor: 1.1,
            vertical_speed_factor: 1.5,
            min_jump_interval_variance: 10.0,
            min_jump_intervals: 5,
            max_inputs_per_second: 30.0,
            max_duration_ms: 3_600_000, // 1 hour
        }
    }
}

impl ValidationThresholds {
    /// Load thresholds from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// A hard validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The payload could not be read or failed structural checks.
    #[error("{0}")]
    Structural(String),

    /// Lateral speed beyond anything input can produce.
    #[error("Impossible lateral speed at tick {tick}: {speed}")]
    ImpossibleLateralSpeed {
        /// Tick index (0-based).
        tick: u32,
        /// Observed speed.
        speed: f64,
    },

    /// Upward speed beyond anything a jump can produce.
    #[error("Impossible vertical speed at tick {tick}: {speed}")]
    ImpossibleVerticalSpeed {
        /// Tick index (0-based).
        tick: u32,
        /// Observed speed.
        speed: f64,
    },

    /// Replay duration disagrees with the claimed time.
    #[error("Time mismatch: replay {replay_secs}s, submitted {claimed_secs}s")]
    TimeMismatch {
        /// Duration from the replay.
        replay_secs: f64,
        /// Claimed time.
        claimed_secs: f64,
    },

    /// Inputs timestamped after the run ended.
    #[error("Inputs recorded after level completion")]
    InputsAfterCompletion {
        /// Latest input timestamp.
        last_input_ms: u64,
        /// Replay duration.
        duration_ms: u64,
    },

    /// Recorded jumps disagree with the claim.
    #[error("Jump count mismatch: recorded {recorded}, submitted {claimed}")]
    JumpCountMismatch {
        /// Jumps in the replay.
        recorded: u32,
        /// Claimed jumps.
        claimed: u32,
    },
}

impl From<ReplayError> for ValidationError {
    fn from(err: ReplayError) -> Self {
        Self::Structural(err.to_string())
    }
}

/// Suspicious but possible input behaviour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuspiciousPattern {
    /// Jump intervals with near-zero jitter.
    #[error("Suspiciously consistent jump timing")]
    ConsistentJumpTiming {
        /// Interval variance (ms²).
        variance: f64,
    },

    /// More inputs per second than a human produces.
    #[error("Excessive input frequency: {inputs_per_second:.1} inputs/second")]
    ExcessiveInputFrequency {
        /// Average rate over the run.
        inputs_per_second: f64,
    },
}

/// Outcome of validating one replay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    /// No hard check failed.
    pub is_valid: bool,
    /// Hard failures.
    pub errors: Vec<ValidationError>,
    /// Soft flags, reported even for valid runs.
    pub suspicious_patterns: Vec<SuspiciousPattern>,
}

/// Wire shape of a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// No hard check failed.
    pub is_valid: bool,
    /// Error messages.
    pub errors: Vec<String>,
    /// Suspicion messages.
    pub suspicious_patterns: Vec<String>,
}

impl ValidationResult {
    /// Build a result; validity follows from the error list.
    pub fn new(errors: Vec<ValidationError>, suspicious_patterns: Vec<SuspiciousPattern>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            suspicious_patterns,
        }
    }

    /// A single structural failure.
    pub fn structural(err: impl Into<ValidationError>) -> Self {
        Self::new(vec![err.into()], Vec::new())
    }

    /// String form for transmission.
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            is_valid: self.is_valid,
            errors: self.errors.iter().map(ToString::to_string).collect(),
            suspicious_patterns: self.suspicious_patterns.iter().map(ToString::to_string).collect(),
        }
    }

    /// Serialize the report to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.report())
    }
}

/// Everything the re-simulation observed.
#[derive(Debug, Clone)]
pub struct Resimulation {
    /// Ticks simulated.
    pub ticks: u32,
    /// Actor after the last tick.
    pub final_actor: Actor,
    /// Trigger events, in tick order.
    pub events: Vec<SimEvent>,
    /// Jump impulses actually applied.
    pub jumps_applied: u32,
    /// Kinematic violations, in tick order.
    pub violations: Vec<ValidationError>,
    /// Digest of every post-tick state.
    pub trajectory_hash: StateHash,
}

impl Resimulation {
    /// Whether the re-simulated actor reached a goal block.
    pub fn reached_goal(&self) -> bool {
        self.events.iter().any(|e| e.kind == SimEventKind::GoalReached)
    }
}

// =============================================================================
// VALIDATOR
// =============================================================================

/// Re-simulates replays and cross-checks claims.
///
/// Plain data: `Send + Sync`, cheap to clone, safe to run on a worker.
#[derive(Debug, Clone)]
pub struct ReplayValidator {
    physics: PhysicsConstants,
    thresholds: ValidationThresholds,
    spawn: Spawn,
}

impl Default for ReplayValidator {
    fn default() -> Self {
        Self::new(ValidationThresholds::default())
    }
}

impl ReplayValidator {
    /// Create a validator using the shared physics table.
    pub fn new(thresholds: ValidationThresholds) -> Self {
        Self {
            physics: PHYSICS,
            thresholds,
            spawn: Spawn::default(),
        }
    }

    /// Start re-simulations from a level-specific spawn.
    pub fn with_spawn(mut self, spawn: Spawn) -> Self {
        self.spawn = spawn;
        self
    }

    /// Active thresholds.
    pub fn thresholds(&self) -> &ValidationThresholds {
        &self.thresholds
    }

    /// Validate a raw JSON submission.
    ///
    /// Decode failures become a structural result; this never panics on input.
    pub fn validate_json(
        &self,
        payload: &str,
        blocks: &[Block],
        claimed_time_secs: f64,
        claimed_jumps: u32,
    ) -> ValidationResult {
        match ReplayLog::parse(payload) {
            Ok(log) => self.validate(&log, blocks, claimed_time_secs, claimed_jumps),
            Err(err) => {
                debug!("Rejecting replay payload: {}", err);
                ValidationResult::structural(err)
            }
        }
    }

    /// Validate a decoded replay against a claim.
    pub fn validate(
        &self,
        log: &ReplayLog,
        blocks: &[Block],
        claimed_time_secs: f64,
        claimed_jumps: u32,
    ) -> ValidationResult {
        if let Err(err) = self.check_structure(log) {
            debug!("Rejecting replay structure: {}", err);
            return ValidationResult::structural(err);
        }

        let resim = self.resimulate(log, blocks);
        let mut errors = resim.violations;
        errors.extend(self.check_timing(log, claimed_time_secs));
        errors.extend(self.check_jump_count(log, claimed_jumps));

        let patterns = self.detect_patterns(log);

        debug!(
            "Validated replay: {} ticks, {} errors, {} patterns, trajectory {}",
            resim.ticks,
            errors.len(),
            patterns.len(),
            hex::encode(&resim.trajectory_hash[..8])
        );

        ValidationResult::new(errors, patterns)
    }

    /// Structural checks that short-circuit validation.
    pub fn check_structure(&self, log: &ReplayLog) -> Result<(), ReplayError> {
        log.check_order()?;
        if log.duration > self.thresholds.max_duration_ms {
            return Err(ReplayError::TooLong {
                duration: log.duration,
                max: self.thresholds.max_duration_ms,
            });
        }
        Ok(())
    }

    /// Re-run the replay through the step function.
    ///
    /// Runs `ceil(duration / tick)` ticks from a fresh actor, with the duration
    /// capped at `max_duration_ms`. Each jump is
    /// applied at the tick nearest its timestamp as a fresh press, then held
    /// until it fires. Kinematic violations are collected; the run always
    /// completes.
    pub fn resimulate(&self, log: &ReplayLog, blocks: &[Block]) -> Resimulation {
        let ctx = SimContext::new(&self.physics, blocks);
        let mut sim = Simulation::new(self.spawn, &self.physics);
        let mut digest = TrajectoryDigest::new();

        let total_ticks = ticks_for_duration(log.duration.min(self.thresholds.max_duration_ms));
        let mut jump_ticks = log.jumps().map(|input| nearest_tick(input.t)).peekable();

        let lateral_limit = self.physics.max_speed * self.thresholds.lateral_speed_factor;
        let vertical_limit = self.physics.jump_speed * self.thresholds.vertical_speed_factor;

        let mut events = Vec::new();
        let mut violations = Vec::new();
        let mut jumps_applied = 0;
        let mut pending_jump = false;

        for tick in 0..total_ticks {
            let mut pressed = false;
            while jump_ticks.next_if(|&at| at <= tick).is_some() {
                pressed = true;
            }

            let input = if pressed {
                pending_jump = true;
                InputFlags::jump_press()
            } else if pending_jump {
                InputFlags { jump_held: true, ..InputFlags::IDLE }
            } else {
                InputFlags::IDLE
            };

            let result = step(&ctx, &mut sim, &input);
            if result.jumped {
                pending_jump = false;
                jumps_applied += 1;
            }
            events.extend(result.events);

            let actor = &sim.actor;
            if actor.lateral_speed.abs() > lateral_limit {
                violations.push(ValidationError::ImpossibleLateralSpeed {
                    tick,
                    speed: actor.lateral_speed,
                });
            }
            if actor.vertical_speed < vertical_limit {
                violations.push(ValidationError::ImpossibleVerticalSpeed {
                    tick,
                    speed: actor.vertical_speed,
                });
            }

            #[cfg(feature = "debug-tracing")]
            trace!(
                "tick {}: pos=({:.2}, {:.2}) speed=({:.2}, {:.2}) ground={}",
                tick,
                actor.x,
                actor.y,
                actor.lateral_speed,
                actor.vertical_speed,
                actor.on_ground
            );

            digest.record(&sim);
        }

        Resimulation {
            ticks: total_ticks,
            final_actor: sim.actor,
            events,
            jumps_applied,
            violations,
            trajectory_hash: digest.finish(),
        }
    }

    /// Duration vs claim, and inputs after completion.
    pub fn check_timing(&self, log: &ReplayLog, claimed_time_secs: f64) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let replay_secs = log.duration as f64 / 1000.0;
        let difference = (replay_secs - claimed_time_secs).abs();
        // Written so a NaN claim fails
        if !(difference <= self.thresholds.time_tolerance_secs) {
            errors.push(ValidationError::TimeMismatch {
                replay_secs,
                claimed_secs: claimed_time_secs,
            });
        }

        if let Some(last_input_ms) = log.last_input_time() {
            let latest_allowed = log
                .duration
                .saturating_add(self.thresholds.late_input_tolerance_ms);
            if last_input_ms > latest_allowed {
                errors.push(ValidationError::InputsAfterCompletion {
                    last_input_ms,
                    duration_ms: log.duration,
                });
            }
        }

        errors
    }

    /// Recorded jumps vs claim.
    pub fn check_jump_count(&self, log: &ReplayLog, claimed_jumps: u32) -> Option<ValidationError> {
        let recorded = u32::try_from(log.jump_count()).unwrap_or(u32::MAX);
        if recorded.abs_diff(claimed_jumps) > self.thresholds.jump_count_tolerance {
            Some(ValidationError::JumpCountMismatch {
                recorded,
                claimed: claimed_jumps,
            })
        } else {
            None
        }
    }

    /// Statistical flags. Never errors.
    pub fn detect_patterns(&self, log: &ReplayLog) -> Vec<SuspiciousPattern> {
        let mut patterns = Vec::new();

        let jump_times: Vec<u64> = log.jumps().map(|input| input.t).collect();
        let intervals: Vec<f64> = jump_times
            .windows(2)
            .map(|pair| pair[1].saturating_sub(pair[0]) as f64)
            .collect();

        if !intervals.is_empty() && intervals.len() >= self.thresholds.min_jump_intervals {
            let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
            let variance = intervals
                .iter()
                .map(|interval| (interval - mean).powi(2))
                .sum::<f64>()
                / intervals.len() as f64;

            if variance < self.thresholds.min_jump_interval_variance {
                patterns.push(SuspiciousPattern::ConsistentJumpTiming { variance });
            }
        }

        if !log.inputs.is_empty() {
            // Whole run, falling back to the last input, then one second
            let span_ms = if log.duration > 0 {
                log.duration
            } else {
                log.last_input_time().unwrap_or(0)
            };
            let seconds = if span_ms > 0 { span_ms as f64 / 1000.0 } else { 1.0 };
            let inputs_per_second = log.inputs.len() as f64 / seconds;

            if inputs_per_second > self.thresholds.max_inputs_per_second {
                patterns.push(SuspiciousPattern::ExcessiveInputFrequency { inputs_per_second });
            }
        }

        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::log::InputEvent;

    fn floor_level() -> Vec<Block> {
        vec![Block::solid(0.0, 350.0, 500.0, 10.0)]
    }

    fn jumps_at(times: &[u64], duration: u64) -> ReplayLog {
        let inputs = times.iter().map(|&t| InputEvent::jump(t, nearest_tick(t))).collect();
        ReplayLog::new(inputs, duration)
    }

    #[test]
    fn test_clean_run_is_valid() {
        let validator = ReplayValidator::default();
        let log = jumps_at(&[400, 1300, 2900], 4000);

        let result = validator.validate(&log, &floor_level(), 4.0, 3);
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
        assert!(result.suspicious_patterns.is_empty());
    }

    #[test]
    fn test_time_mismatch() {
        let validator = ReplayValidator::default();
        let log = jumps_at(&[], 5000);

        let result = validator.validate(&log, &floor_level(), 5.5, 0);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![ValidationError::TimeMismatch { replay_secs: 5.0, claimed_secs: 5.5 }]
        );
        assert_eq!(result.report().errors, vec!["Time mismatch: replay 5s, submitted 5.5s"]);

        // Within tolerance
        assert!(validator.validate(&log, &floor_level(), 5.05, 0).is_valid);
        // NaN claim never passes
        assert!(!validator.validate(&log, &floor_level(), f64::NAN, 0).is_valid);
    }

    #[test]
    fn test_consistent_jump_timing_flagged() {
        let validator = ReplayValidator::default();
        let log = jumps_at(&[0, 500, 1000, 1500, 2000, 2500], 5000);

        let result = validator.validate(&log, &floor_level(), 5.0, 6);
        assert!(result.is_valid, "{:?}", result.errors);
        assert_eq!(
            result.suspicious_patterns,
            vec![SuspiciousPattern::ConsistentJumpTiming { variance: 0.0 }]
        );
        assert_eq!(result.report().suspicious_patterns, vec!["Suspiciously consistent jump timing"]);
    }

    #[test]
    fn test_four_intervals_not_enough_for_variance() {
        let validator = ReplayValidator::default();
        let log = jumps_at(&[0, 500, 1000, 1500, 2000], 5000);
        assert!(validator.detect_patterns(&log).is_empty());
    }

    #[test]
    fn test_excessive_input_frequency() {
        let validator = ReplayValidator::default();
        let times: Vec<u64> = (0..200).map(|i| i * 25).collect();
        let log = jumps_at(&times, 5000);

        let patterns = validator.detect_patterns(&log);
        let messages: Vec<String> = patterns.iter().map(ToString::to_string).collect();
        assert!(messages.contains(&"Excessive input frequency: 40.0 inputs/second".to_string()));
    }

    #[test]
    fn test_frequency_falls_back_to_last_input() {
        let validator = ReplayValidator::default();
        // Zero duration: rate measured over the last input time (0.2s)
        let times: Vec<u64> = (1..=20).map(|i| i * 10).collect();
        let log = jumps_at(&times, 0);

        let patterns = validator.detect_patterns(&log);
        assert!(patterns.contains(&SuspiciousPattern::ExcessiveInputFrequency { inputs_per_second: 100.0 }));
    }

    #[test]
    fn test_structural_errors() {
        let validator = ReplayValidator::default();
        let blocks = floor_level();

        let result = validator.validate_json(r#"{"duration":5000}"#, &blocks, 5.0, 0);
        assert!(!result.is_valid);
        assert_eq!(result.report().errors, vec!["Invalid replay structure"]);
        assert!(result.suspicious_patterns.is_empty());

        let result = validator.validate_json("garbage", &blocks, 5.0, 0);
        assert_eq!(result.errors.len(), 1);
        assert!(result.report().errors[0].starts_with("Replay parsing error"));

        let result = validator.validate_json(
            r#"{"inputs":[{"t":300,"type":"jump"},{"t":100,"type":"jump"}],"duration":5000}"#,
            &blocks,
            5.0,
            2,
        );
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_overlong_run_rejected_before_simulation() {
        let validator = ReplayValidator::new(ValidationThresholds {
            max_duration_ms: 10_000,
            ..ValidationThresholds::default()
        });
        let log = jumps_at(&[], 10_001);

        let result = validator.validate(&log, &floor_level(), 10.0, 0);
        assert!(!result.is_valid);
        assert_eq!(
            result.report().errors,
            vec!["Replay duration 10001ms exceeds maximum 10000ms"]
        );
    }

    #[test]
    fn test_resimulate_caps_duration() {
        let validator = ReplayValidator::new(ValidationThresholds {
            max_duration_ms: 1_000,
            ..ValidationThresholds::default()
        });
        let log = jumps_at(&[], u64::MAX);

        let resim = validator.resimulate(&log, &floor_level());
        assert_eq!(resim.ticks, ticks_for_duration(1_000));
        assert_eq!(resim.ticks, 60);
    }

    #[test]
    fn test_inputs_after_completion() {
        let validator = ReplayValidator::default();

        // Within the 100ms tolerance
        let log = jumps_at(&[1000, 2100], 2000);
        assert!(validator.check_timing(&log, 2.0).is_empty());

        let log = jumps_at(&[1000, 2101], 2000);
        let result = validator.validate(&log, &floor_level(), 2.0, 2);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![ValidationError::InputsAfterCompletion { last_input_ms: 2101, duration_ms: 2000 }]
        );
        assert_eq!(result.report().errors, vec!["Inputs recorded after level completion"]);
    }

    #[test]
    fn test_jump_count_tolerance() {
        let validator = ReplayValidator::default();
        let log = jumps_at(&[300, 1200, 2500], 4000);

        assert!(validator.validate(&log, &floor_level(), 4.0, 2).is_valid);
        assert!(validator.validate(&log, &floor_level(), 4.0, 4).is_valid);

        let result = validator.validate(&log, &floor_level(), 4.0, 5);
        assert_eq!(
            result.report().errors,
            vec!["Jump count mismatch: recorded 3, submitted 5"]
        );
    }

    #[test]
    fn test_unknown_inputs_do_not_count_as_jumps() {
        let validator = ReplayValidator::default();
        let result = validator.validate_json(
            r#"{"inputs":[{"t":100,"type":"left"},{"t":200,"type":"right"},{"t":300,"type":"jump"}],"duration":1000}"#,
            &floor_level(),
            1.0,
            3,
        );
        assert_eq!(
            result.errors,
            vec![ValidationError::JumpCountMismatch { recorded: 1, claimed: 3 }]
        );
    }

    #[test]
    fn test_kinematic_violation_reported_with_tick() {
        // Tighten the upward limit below the real jump speed
        let validator = ReplayValidator::new(ValidationThresholds {
            vertical_speed_factor: 0.5,
            ..ValidationThresholds::default()
        });
        let log = jumps_at(&[500], 2000);

        let resim = validator.resimulate(&log, &floor_level());
        assert_eq!(resim.jumps_applied, 1);
        assert!(!resim.violations.is_empty());

        // Simulation ran to completion despite the violations
        assert_eq!(resim.ticks, 120);
        assert!(resim.final_actor.on_ground);

        let first = &resim.violations[0];
        match first {
            ValidationError::ImpossibleVerticalSpeed { tick, speed } => {
                assert_eq!(*tick, 30);
                assert_eq!(*speed, -10.0);
            }
            other => panic!("unexpected violation: {}", other),
        }

        let result = validator.validate(&log, &floor_level(), 2.0, 1);
        assert!(!result.is_valid);
        assert!(result.report().errors[0].starts_with("Impossible vertical speed at tick 30"));
    }

    #[test]
    fn test_early_jump_buffered_until_landing() {
        let validator = ReplayValidator::default();
        // Spawn is mid-air; the t=0 press must wait for the landing
        let log = jumps_at(&[0], 1000);

        let resim = validator.resimulate(&log, &[]);
        assert_eq!(resim.jumps_applied, 1);
        assert!(resim.violations.is_empty());
    }

    #[test]
    fn test_resimulation_reaches_goal() {
        let validator = ReplayValidator::default();
        let blocks = vec![
            Block::solid(0.0, 350.0, 500.0, 10.0),
            Block::end(240.0, 290.0, 20.0, 10.0),
        ];
        // Jump straight up from the spawn into the goal above it
        let log = jumps_at(&[200], 1500);

        let resim = validator.resimulate(&log, &blocks);
        assert!(resim.reached_goal());
        assert!(!validator.resimulate(&jumps_at(&[], 1500), &blocks).reached_goal());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let validator = ReplayValidator::default();
        let log = jumps_at(&[0, 500, 1000, 1500, 2000, 2500, 2600], 4200);
        let blocks = floor_level();

        let first = validator.validate(&log, &blocks, 4.5, 9);
        let second = validator.validate(&log, &blocks, 4.5, 9);
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

        let a = validator.resimulate(&log, &blocks);
        let b = validator.resimulate(&log, &blocks);
        assert_eq!(a.trajectory_hash, b.trajectory_hash);
        assert_eq!(a.events, b.events);
    }

    #[test]
    fn test_report_json_shape() {
        let result = ValidationResult::new(
            vec![ValidationError::JumpCountMismatch { recorded: 1, claimed: 4 }],
            vec![SuspiciousPattern::ConsistentJumpTiming { variance: 0.0 }],
        );
        assert_eq!(
            result.to_json().unwrap(),
            r#"{"isValid":false,"errors":["Jump count mismatch: recorded 1, submitted 4"],"suspiciousPatterns":["Suspiciously consistent jump timing"]}"#
        );
    }

    #[test]
    fn test_thresholds_from_partial_json() {
        let thresholds = ValidationThresholds::from_json(r#"{"jump_count_tolerance":3}"#).unwrap();
        assert_eq!(thresholds.jump_count_tolerance, 3);
        assert_eq!(thresholds.time_tolerance_secs, 0.1);
        assert_eq!(thresholds.max_inputs_per_second, 30.0);
    }

    #[test]
    fn test_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReplayValidator>();
        assert_send_sync::<ValidationResult>();
    }
}
