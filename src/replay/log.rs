//! Replay Log
//!
//! The timestamped input log captured during a live run, and its wire codecs.
//!
//! JSON is the submission format (camelCase field names, matching the browser
//! client). Binary (bincode) is for compact storage.
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "inputs": [{ "t": 1200, "type": "jump", "frame": 72 }],
//!   "duration": 5000,
//!   "levelIndex": 0,
//!   "frameCount": 300,
//!   "avgFrameTime": 16.67,
//!   "startTimestamp": 1700000000000,
//!   "endTimestamp": 1700000005000,
//!   "version": "1.0.0"
//! }
//! ```
//!
//! Only `inputs` and `duration` are required.

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Replay format version written by the recorder.
pub const REPLAY_FORMAT_VERSION: &str = "1.0.0";

// =============================================================================
// ERRORS
// =============================================================================

/// Structural problems with a replay payload.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The payload is not valid JSON or a field has the wrong shape.
    #[error("Replay parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The binary payload could not be decoded.
    #[error("Replay decoding error: {0}")]
    Binary(#[from] bincode::Error),

    /// `inputs` is missing or not an array.
    #[error("Invalid replay structure")]
    MissingInputs,

    /// An input timestamp is earlier than the one before it.
    #[error("Input timestamps out of order at index {index}: {t}ms after {previous}ms")]
    OutOfOrder {
        /// Index of the offending input.
        index: usize,
        /// Timestamp of the previous input.
        previous: u64,
        /// Timestamp of the offending input.
        t: u64,
    },

    /// The run is longer than the validator will simulate.
    #[error("Replay duration {duration}ms exceeds maximum {max}ms")]
    TooLong {
        /// Claimed duration.
        duration: u64,
        /// Configured maximum.
        max: u64,
    },
}

// =============================================================================
// INPUT EVENTS
// =============================================================================

/// Kind of a recorded input.
///
/// Only jumps affect the simulation. Unknown kinds decode as `Other` and are
/// ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Jump key press.
    #[default]
    Jump,
    /// Anything else.
    #[serde(other)]
    Other,
}

/// One recorded input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Milliseconds since run start.
    pub t: u64,
    /// Input kind.
    #[serde(rename = "type")]
    pub kind: InputKind,
    /// Frame counter when the input was recorded.
    #[serde(default)]
    pub frame: u32,
}

impl InputEvent {
    /// A jump press at `t` ms.
    pub fn jump(t: u64, frame: u32) -> Self {
        Self { t, kind: InputKind::Jump, frame }
    }

    /// Whether this is a jump press.
    #[inline]
    pub fn is_jump(&self) -> bool {
        self.kind == InputKind::Jump
    }
}

// =============================================================================
// REPLAY LOG
// =============================================================================

/// A complete replay of one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayLog {
    /// Recorded inputs in timestamp order.
    pub inputs: Vec<InputEvent>,
    /// Run length in milliseconds.
    pub duration: u64,
    /// Level the run was played on.
    #[serde(default)]
    pub level_index: u32,
    /// Frames rendered during the run.
    #[serde(default)]
    pub frame_count: u32,
    /// Average frame time in milliseconds.
    #[serde(default)]
    pub avg_frame_time: f64,
    /// Wall-clock start (ms since epoch).
    #[serde(default)]
    pub start_timestamp: i64,
    /// Wall-clock end (ms since epoch).
    #[serde(default)]
    pub end_timestamp: i64,
    /// Format version.
    #[serde(default)]
    pub version: String,
}

impl ReplayLog {
    /// Create a minimal log (the submission payload shape).
    pub fn new(inputs: Vec<InputEvent>, duration: u64) -> Self {
        Self {
            inputs,
            duration,
            level_index: 0,
            frame_count: 0,
            avg_frame_time: 0.0,
            start_timestamp: 0,
            end_timestamp: 0,
            version: REPLAY_FORMAT_VERSION.to_string(),
        }
    }

    /// Jump presses only.
    pub fn jumps(&self) -> impl Iterator<Item = &InputEvent> + '_ {
        self.inputs.iter().filter(|input| input.is_jump())
    }

    /// Number of jump presses.
    pub fn jump_count(&self) -> usize {
        self.jumps().count()
    }

    /// Latest input timestamp, if any.
    pub fn last_input_time(&self) -> Option<u64> {
        self.inputs.iter().map(|input| input.t).max()
    }

    /// Check timestamps are non-decreasing.
    pub fn check_order(&self) -> Result<(), ReplayError> {
        for (index, pair) in self.inputs.windows(2).enumerate() {
            if pair[1].t < pair[0].t {
                return Err(ReplayError::OutOfOrder {
                    index: index + 1,
                    previous: pair[0].t,
                    t: pair[1].t,
                });
            }
        }
        Ok(())
    }

    /// Parse and structure-check a submitted JSON payload.
    ///
    /// Unlike `from_json`, a missing or non-array `inputs` field is reported
    /// as `MissingInputs` rather than a generic decode error, and input order
    /// is checked.
    pub fn parse(payload: &str) -> Result<Self, ReplayError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        let has_inputs = value
            .get("inputs")
            .map(serde_json::Value::is_array)
            .unwrap_or(false);
        if !has_inputs {
            return Err(ReplayError::MissingInputs);
        }

        let log: ReplayLog = serde_json::from_value(value)?;
        log.check_order()?;
        Ok(log)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize to binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submission_payload() {
        let log = ReplayLog::parse(r#"{"inputs":[{"t":0,"type":"jump"},{"t":450,"type":"jump"}],"duration":5000}"#)
            .unwrap();

        assert_eq!(log.duration, 5000);
        assert_eq!(log.jump_count(), 2);
        assert_eq!(log.inputs[1], InputEvent::jump(450, 0));
        assert_eq!(log.level_index, 0);
        assert!(log.version.is_empty());
    }

    #[test]
    fn test_unknown_input_kinds_ignored_for_jumps() {
        let log = ReplayLog::parse(
            r#"{"inputs":[{"t":0,"type":"left","value":1},{"t":10,"type":"jump","frame":1}],"duration":100}"#,
        )
        .unwrap();

        assert_eq!(log.inputs.len(), 2);
        assert_eq!(log.inputs[0].kind, InputKind::Other);
        assert_eq!(log.jump_count(), 1);
    }

    #[test]
    fn test_missing_inputs_is_structural() {
        for payload in [r#"{"duration":5000}"#, r#"{"inputs":{},"duration":5000}"#, r#"[1,2,3]"#] {
            let err = ReplayLog::parse(payload).unwrap_err();
            assert!(matches!(err, ReplayError::MissingInputs), "{}", payload);
            assert_eq!(err.to_string(), "Invalid replay structure");
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ReplayLog::parse("{not json").unwrap_err();
        assert!(matches!(err, ReplayError::Json(_)));
        assert!(err.to_string().starts_with("Replay parsing error: "));

        // Negative timestamp does not fit the schema
        let err = ReplayLog::parse(r#"{"inputs":[{"t":-5,"type":"jump"}],"duration":100}"#).unwrap_err();
        assert!(matches!(err, ReplayError::Json(_)));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let err = ReplayLog::parse(
            r#"{"inputs":[{"t":100,"type":"jump"},{"t":100,"type":"jump"},{"t":50,"type":"jump"}],"duration":500}"#,
        )
        .unwrap_err();

        match err {
            ReplayError::OutOfOrder { index, previous, t } => {
                assert_eq!(index, 2);
                assert_eq!(previous, 100);
                assert_eq!(t, 50);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_json_uses_camel_case() {
        let mut log = ReplayLog::new(vec![InputEvent::jump(16, 1)], 1000);
        log.level_index = 3;
        log.frame_count = 60;

        let json = log.to_json().unwrap();
        assert!(json.contains(r#""levelIndex":3"#));
        assert!(json.contains(r#""frameCount":60"#));
        assert!(json.contains(r#""type":"jump""#));
        assert!(json.contains(r#""version":"1.0.0""#));

        assert_eq!(ReplayLog::from_json(&json).unwrap(), log);
    }

    #[test]
    fn test_binary_codec() {
        let log = ReplayLog::new(vec![InputEvent::jump(16, 1), InputEvent::jump(900, 54)], 2000);
        let bytes = log.to_bytes().unwrap();
        assert_eq!(ReplayLog::from_bytes(&bytes).unwrap(), log);
    }

    #[test]
    fn test_last_input_time() {
        assert_eq!(ReplayLog::new(vec![], 100).last_input_time(), None);
        let log = ReplayLog::new(vec![InputEvent::jump(5, 0), InputEvent::jump(70, 4)], 100);
        assert_eq!(log.last_input_time(), Some(70));
    }
}
