//! Score Submission Gate
//!
//! The last step before a leaderboard write: range checks on the claim,
//! replay validation, then the tamper-evident score record. Storage and
//! transport are the caller's business.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::hash::security_hash;
use crate::game::level::Level;
use crate::replay::validate::{ReplayValidator, ValidationThresholds};

/// Range limits on claimed scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionLimits {
    /// Fastest believable time (seconds).
    pub min_time_secs: f64,
    /// Slowest accepted time (seconds).
    pub max_time_secs: f64,
    /// Most jumps accepted.
    pub max_jumps: u32,
    /// Shortest replay payload accepted (bytes).
    pub min_replay_len: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            min_time_secs: 0.5,
            max_time_secs: 3600.0,
            max_jumps: 10_000,
            min_replay_len: 10,
        }
    }
}

/// A completed run as submitted by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreClaim {
    /// Authenticated user id.
    pub user_id: String,
    /// Level played.
    pub level_index: u32,
    /// Claimed completion time (seconds).
    pub time: f64,
    /// Claimed jump count.
    pub jumps: u32,
    /// Raw replay JSON.
    pub replay: String,
}

/// An accepted score, ready to store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// User id.
    pub user_id: String,
    /// Level played.
    pub level_index: u32,
    /// Completion time rounded to hundredths.
    pub time: f64,
    /// Jump count.
    pub jumps: u32,
    /// Acceptance time (ms since epoch).
    pub timestamp: i64,
    /// Raw replay JSON.
    pub replay: String,
    /// Rolling hash over the score fields.
    pub security_hash: String,
    /// Version of the accepting build.
    pub client_version: String,
    /// Flags raised during validation, kept for moderation.
    pub suspicious_patterns: Vec<String>,
}

/// Why a submission was refused.
#[derive(Debug, Error, PartialEq)]
pub enum SubmissionError {
    /// Time or jumps outside the accepted range.
    #[error("Invalid score data")]
    InvalidScore {
        /// Claimed time.
        time: f64,
        /// Claimed jumps.
        jumps: u32,
    },

    /// Replay payload missing or too short.
    #[error("Invalid replay data")]
    InvalidReplay,

    /// The replay did not back up the claim.
    #[error("Replay validation failed: {}", .errors.join("; "))]
    ValidationFailed {
        /// Validator error messages.
        errors: Vec<String>,
    },
}

/// Gate between a claimed run and the leaderboard.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    validator: ReplayValidator,
    limits: SubmissionLimits,
    client_version: String,
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::new(ValidationThresholds::default(), SubmissionLimits::default())
    }
}

impl SubmissionGate {
    /// Create a gate stamping records with this crate's version.
    pub fn new(thresholds: ValidationThresholds, limits: SubmissionLimits) -> Self {
        Self {
            validator: ReplayValidator::new(thresholds),
            limits,
            client_version: crate::VERSION.to_string(),
        }
    }

    /// Stamp records with a different client version.
    pub fn with_client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = version.into();
        self
    }

    /// Check a claim and build its score record.
    pub fn review(
        &self,
        claim: &ScoreClaim,
        level: &Level,
        now_ms: i64,
    ) -> Result<ScoreRecord, SubmissionError> {
        let limits = &self.limits;
        let time_in_range =
            claim.time >= limits.min_time_secs && claim.time <= limits.max_time_secs;
        if !time_in_range || claim.jumps > limits.max_jumps {
            warn!(
                "Rejecting score from {}: time {}s, {} jumps out of range",
                claim.user_id, claim.time, claim.jumps
            );
            return Err(SubmissionError::InvalidScore {
                time: claim.time,
                jumps: claim.jumps,
            });
        }

        if claim.replay.len() < limits.min_replay_len {
            warn!("Rejecting score from {}: replay too short", claim.user_id);
            return Err(SubmissionError::InvalidReplay);
        }

        let skipped = level.malformed_block_count();
        if skipped > 0 {
            warn!("Level '{}' has {} malformed blocks; they are ignored", level.name, skipped);
        }

        let validator = self.validator.clone().with_spawn(level.spawn_point());
        let result = validator.validate_json(&claim.replay, &level.blocks, claim.time, claim.jumps);
        let report = result.report();

        if !report.is_valid {
            warn!(
                "Replay validation failed for {} on level {}: {:?}",
                claim.user_id, claim.level_index, report.errors
            );
            return Err(SubmissionError::ValidationFailed { errors: report.errors });
        }

        if !report.suspicious_patterns.is_empty() {
            warn!(
                "Suspicious patterns for {} on level {}: {:?}",
                claim.user_id, claim.level_index, report.suspicious_patterns
            );
        }

        let hash = security_hash(
            claim.level_index,
            claim.time,
            claim.jumps,
            now_ms,
            &claim.user_id,
        );
        info!(
            "Accepted score for {} on level {}: {:.2}s, {} jumps (hash {})",
            claim.user_id, claim.level_index, claim.time, claim.jumps, hash
        );

        Ok(ScoreRecord {
            user_id: claim.user_id.clone(),
            level_index: claim.level_index,
            time: round_hundredths(claim.time),
            jumps: claim.jumps,
            timestamp: now_ms,
            replay: claim.replay.clone(),
            security_hash: hash,
            client_version: self.client_version.clone(),
            suspicious_patterns: report.suspicious_patterns,
        })
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::Block;

    fn level() -> Level {
        Level::new("flat", vec![Block::solid(0.0, 350.0, 500.0, 10.0)])
    }

    fn claim(time: f64, jumps: u32, replay: &str) -> ScoreClaim {
        ScoreClaim {
            user_id: "user-1".to_string(),
            level_index: 0,
            time,
            jumps,
            replay: replay.to_string(),
        }
    }

    const TWO_JUMPS: &str = r#"{"inputs":[{"t":300,"type":"jump"},{"t":1700,"type":"jump"}],"duration":3456}"#;

    #[test]
    fn test_accepts_valid_claim() {
        let gate = SubmissionGate::default();
        let record = gate.review(&claim(3.456, 2, TWO_JUMPS), &level(), 1_700_000_000_000).unwrap();

        assert_eq!(record.time, 3.46);
        assert_eq!(record.jumps, 2);
        assert_eq!(record.timestamp, 1_700_000_000_000);
        assert_eq!(record.client_version, crate::VERSION);
        assert!(record.suspicious_patterns.is_empty());
        assert_eq!(
            record.security_hash,
            security_hash(0, 3.456, 2, 1_700_000_000_000, "user-1")
        );
    }

    #[test]
    fn test_range_checks() {
        let gate = SubmissionGate::default();
        for (time, jumps) in [(0.4, 0), (3600.5, 0), (5.0, 10_001), (f64::NAN, 0)] {
            let err = gate.review(&claim(time, jumps, TWO_JUMPS), &level(), 0).unwrap_err();
            assert!(matches!(err, SubmissionError::InvalidScore { .. }), "{} {}", time, jumps);
            assert_eq!(err.to_string(), "Invalid score data");
        }
    }

    #[test]
    fn test_short_replay_rejected() {
        let gate = SubmissionGate::default();
        let err = gate.review(&claim(3.0, 0, "{}"), &level(), 0).unwrap_err();
        assert_eq!(err, SubmissionError::InvalidReplay);
    }

    #[test]
    fn test_failed_validation_rejected() {
        let gate = SubmissionGate::default();
        let err = gate.review(&claim(5.0, 2, TWO_JUMPS), &level(), 0).unwrap_err();

        match err {
            SubmissionError::ValidationFailed { errors } => {
                assert_eq!(errors, vec!["Time mismatch: replay 3.456s, submitted 5s"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_suspicious_run_accepted_with_flags() {
        let gate = SubmissionGate::default();
        let replay = r#"{"inputs":[{"t":0,"type":"jump"},{"t":500,"type":"jump"},{"t":1000,"type":"jump"},{"t":1500,"type":"jump"},{"t":2000,"type":"jump"},{"t":2500,"type":"jump"}],"duration":5000}"#;

        let record = gate.review(&claim(5.0, 6, replay), &level(), 0).unwrap();
        assert_eq!(record.suspicious_patterns, vec!["Suspiciously consistent jump timing"]);
    }

    #[test]
    fn test_limits_are_configurable() {
        let limits = SubmissionLimits {
            min_time_secs: 5.0,
            ..SubmissionLimits::default()
        };
        let gate = SubmissionGate::new(ValidationThresholds::default(), limits).with_client_version("web-2.1");

        assert!(gate.review(&claim(3.456, 2, TWO_JUMPS), &level(), 0).is_err());

        let gate = SubmissionGate::default().with_client_version("web-2.1");
        let record = gate.review(&claim(3.456, 2, TWO_JUMPS), &level(), 0).unwrap();
        assert_eq!(record.client_version, "web-2.1");
    }

    #[test]
    fn test_record_json_shape() {
        let gate = SubmissionGate::default();
        let record = gate.review(&claim(3.456, 2, TWO_JUMPS), &level(), 42).unwrap();
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains(r#""userId":"user-1""#));
        assert!(json.contains(r#""levelIndex":0"#));
        assert!(json.contains(r#""securityHash":""#));
        assert!(json.contains(r#""clientVersion":""#));
    }
}
