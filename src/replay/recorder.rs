//! Input Recorder
//!
//! Captures timestamped inputs during a live run. Capture only: nothing here
//! checks what it records.

use crate::replay::log::{InputEvent, InputKind, ReplayLog, REPLAY_FORMAT_VERSION};

/// Records inputs and frame counts for one run at a time.
///
/// Timestamps are wall-clock milliseconds supplied by the caller.
#[derive(Debug, Default, Clone)]
pub struct InputRecorder {
    inputs: Vec<InputEvent>,
    start_ms: i64,
    frame_count: u32,
    active: bool,
}

impl InputRecorder {
    /// Create an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the log and set the timestamp origin.
    pub fn start(&mut self, now_ms: i64) {
        self.inputs.clear();
        self.start_ms = now_ms;
        self.frame_count = 0;
        self.active = true;
    }

    /// Stop recording. Later inputs and frames are dropped.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Append an input at `now_ms`. No-op when idle.
    pub fn record_input(&mut self, kind: InputKind, now_ms: i64) {
        if !self.active {
            return;
        }
        self.inputs.push(InputEvent {
            t: self.elapsed(now_ms),
            kind,
            frame: self.frame_count,
        });
    }

    /// Count one rendered frame. No-op when idle.
    pub fn record_frame(&mut self) {
        if self.active {
            self.frame_count += 1;
        }
    }

    /// Inputs recorded so far.
    pub fn inputs(&self) -> &[InputEvent] {
        &self.inputs
    }

    /// Frames recorded so far.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Build the replay log for the current recording.
    pub fn replay(&self, level_index: u32, now_ms: i64) -> ReplayLog {
        let duration = self.elapsed(now_ms);
        let avg_frame_time = if self.frame_count > 0 {
            duration as f64 / f64::from(self.frame_count)
        } else {
            0.0
        };

        ReplayLog {
            inputs: self.inputs.clone(),
            duration,
            level_index,
            frame_count: self.frame_count,
            avg_frame_time,
            start_timestamp: self.start_ms,
            end_timestamp: now_ms,
            version: REPLAY_FORMAT_VERSION.to_string(),
        }
    }

    /// Milliseconds since the origin; a clock that runs backwards reads as zero.
    fn elapsed(&self, now_ms: i64) -> u64 {
        u64::try_from(now_ms.saturating_sub(self.start_ms)).unwrap_or(0)
    }
}
