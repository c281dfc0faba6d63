//! [`FrameClock`] – how much hold time one tracker callback is worth.
//!
//! In [`ClockMode::Frame`] every callback advances the hold timers by the
//! same fixed tick, so confirmation latency scales with the tracker's frame
//! rate.  [`ClockMode::Timestamp`] measures the gap between successive frame
//! timestamps instead and falls back to the fixed tick whenever that gap is
//! unknown, not positive, or longer than the maximum gap.  A tracker stall
//! therefore never confirms a hold in a single callback.

use serde::{Deserialize, Serialize};

/// Nominal callback period at ~60 Hz.
pub const DEFAULT_FRAME_TICK_MS: f32 = 16.0;

/// Longest timestamp gap credited as real hold time.
pub const DEFAULT_MAX_FRAME_GAP_MS: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    #[default]
    Frame,
    Timestamp,
}

impl std::str::FromStr for ClockMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frame" => Ok(ClockMode::Frame),
            "timestamp" => Ok(ClockMode::Timestamp),
            other => Err(format!("unknown clock mode {other:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: ClockMode,
    tick_ms: f32,
    max_gap_ms: f32,
    last_timestamp: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(ClockMode::Frame, DEFAULT_FRAME_TICK_MS)
    }
}

impl FrameClock {
    pub fn new(mode: ClockMode, tick_ms: f32) -> Self {
        Self {
            mode,
            tick_ms,
            max_gap_ms: DEFAULT_MAX_FRAME_GAP_MS,
            last_timestamp: None,
        }
    }

    /// Gaps longer than `max_gap_ms` are credited as one fixed tick.
    pub fn with_max_gap(mut self, max_gap_ms: f32) -> Self {
        self.max_gap_ms = max_gap_ms;
        self
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Milliseconds of hold time to credit for the frame stamped `timestamp_ms`.
    pub fn advance(&mut self, timestamp_ms: Option<f64>) -> f32 {
        match self.mode {
            ClockMode::Frame => self.tick_ms,
            ClockMode::Timestamp => {
                let delta = match (self.last_timestamp, timestamp_ms) {
                    (Some(prev), Some(now)) if now > prev => {
                        let gap = (now - prev) as f32;
                        if gap <= self.max_gap_ms { gap } else { self.tick_ms }
                    }
                    _ => self.tick_ms,
                };
                if timestamp_ms.is_some() {
                    self.last_timestamp = timestamp_ms;
                }
                delta
            }
        }
    }

    /// Forget the previous timestamp.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_mode_ignores_timestamps() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(Some(0.0)), 16.0);
        assert_eq!(clock.advance(Some(100.0)), 16.0);
        assert_eq!(clock.advance(None), 16.0);
    }

    #[test]
    fn timestamp_mode_measures_gaps() {
        let mut clock = FrameClock::new(ClockMode::Timestamp, 16.0);
        // first frame has nothing to measure against
        assert_eq!(clock.advance(Some(1000.0)), 16.0);
        assert_eq!(clock.advance(Some(1033.0)), 33.0);
        assert_eq!(clock.advance(Some(1040.5)), 7.5);
    }

    #[test]
    fn timestamp_mode_falls_back_on_missing_or_stale_stamp() {
        let mut clock = FrameClock::new(ClockMode::Timestamp, 20.0);
        clock.advance(Some(500.0));
        assert_eq!(clock.advance(None), 20.0);
        // the missing stamp did not overwrite the last good one
        assert_eq!(clock.advance(Some(540.0)), 40.0);
        assert_eq!(clock.advance(Some(540.0)), 20.0);
        assert_eq!(clock.advance(Some(100.0)), 20.0);
    }

    #[test]
    fn stalled_tracker_is_credited_one_tick() {
        let mut clock = FrameClock::new(ClockMode::Timestamp, 16.0);
        clock.advance(Some(0.0));
        assert_eq!(clock.advance(Some(100.0)), 100.0);
        assert_eq!(clock.advance(Some(3100.0)), 16.0);
        // measuring resumes from the stamp after the stall
        assert_eq!(clock.advance(Some(3130.0)), 30.0);

        let mut tight = FrameClock::new(ClockMode::Timestamp, 16.0).with_max_gap(20.0);
        tight.advance(Some(0.0));
        assert_eq!(tight.advance(Some(25.0)), 16.0);
    }

    #[test]
    fn reset_forgets_last_stamp() {
        let mut clock = FrameClock::new(ClockMode::Timestamp, 16.0);
        clock.advance(Some(0.0));
        clock.reset();
        assert_eq!(clock.advance(Some(900.0)), 16.0);
    }

    #[test]
    fn clock_mode_parses_and_serializes_lowercase() {
        assert_eq!("Timestamp".parse::<ClockMode>().unwrap(), ClockMode::Timestamp);
        assert_eq!(" frame ".parse::<ClockMode>().unwrap(), ClockMode::Frame);
        assert!("wall".parse::<ClockMode>().is_err());
        assert_eq!(serde_json::to_string(&ClockMode::Timestamp).unwrap(), "\"timestamp\"");
    }
}
