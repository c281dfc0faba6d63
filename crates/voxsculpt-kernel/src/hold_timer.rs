//! Hold-Confirmation Timers.
//!
//! A [`HoldTimer`] turns an instantaneous classifier result into a debounced
//! activation: it accumulates time while the condition holds, snaps back to
//! zero the instant it does not, and confirms once the accumulated time
//! reaches the hold duration.  Elapsed time saturates at the hold duration,
//! so `progress` never exceeds 1.
//!
//! What happens *after* confirmation is set per gesture by [`Rearm`]:
//!
//! | Policy | After confirming | Used by |
//! |---|---|---|
//! | [`Rearm::Sustain`] | stays confirmed every frame the condition holds | grab, build, erase, rotate |
//! | [`Rearm::Restart`] | restarts from zero | reset |
//! | [`Rearm::OnRelease`] | disarmed until the condition goes false | cycle |
//!
//! # Example
//!
//! ```rust
//! use voxsculpt_kernel::hold_timer::{HoldTimer, Rearm};
//!
//! let mut t = HoldTimer::new(48.0, Rearm::Sustain);
//! assert!(!t.tick(true, 16.0).confirmed);
//! assert!(!t.tick(true, 16.0).confirmed);
//! let third = t.tick(true, 16.0);
//! assert!(third.confirmed);
//! assert_eq!(third.progress, 1.0);
//!
//! // any false frame drops straight back to zero
//! assert_eq!(t.tick(false, 16.0).elapsed_ms, 0.0);
//! ```

use std::collections::HashMap;

use voxsculpt_types::Gesture;

/// Result of advancing a timer by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimerTick {
    pub elapsed_ms: f32,
    /// `min(elapsed / hold, 1)`.
    pub progress: f32,
    pub confirmed: bool,
}

/// Post-confirmation behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rearm {
    Sustain,
    Restart,
    OnRelease,
}

#[derive(Debug, Clone)]
pub struct HoldTimer {
    hold_ms: f32,
    elapsed_ms: f32,
    rearm: Rearm,
    armed: bool,
}

impl HoldTimer {
    pub fn new(hold_ms: f32, rearm: Rearm) -> Self {
        Self {
            hold_ms,
            elapsed_ms: 0.0,
            rearm,
            armed: true,
        }
    }

    pub fn hold_ms(&self) -> f32 {
        self.hold_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// False only while an [`Rearm::OnRelease`] timer waits for release.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance by `dt_ms` if `condition` holds, otherwise zero and re-arm.
    pub fn tick(&mut self, condition: bool, dt_ms: f32) -> TimerTick {
        if !condition {
            self.elapsed_ms = 0.0;
            self.armed = true;
            return TimerTick::default();
        }
        if !self.armed {
            return TimerTick::default();
        }

        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.hold_ms);
        let confirmed = self.elapsed_ms >= self.hold_ms;
        let tick = TimerTick {
            elapsed_ms: self.elapsed_ms,
            progress: self.progress(),
            confirmed,
        };

        if confirmed {
            match self.rearm {
                Rearm::Sustain => {}
                Rearm::Restart => self.elapsed_ms = 0.0,
                Rearm::OnRelease => {
                    self.elapsed_ms = 0.0;
                    self.armed = false;
                }
            }
        }
        tick
    }

    /// Zero the timer because another gesture claimed the frame.
    ///
    /// `condition` is this gesture's own classifier result; a false value
    /// counts as a release and re-arms the timer.
    pub fn suppress(&mut self, condition: bool) {
        self.elapsed_ms = 0.0;
        if !condition {
            self.armed = true;
        }
    }

    /// Zero the timer and re-arm it.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.armed = true;
    }

    pub fn progress(&self) -> f32 {
        if self.hold_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.hold_ms).min(1.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GestureTimers
// ────────────────────────────────────────────────────────────────────────────

/// Hold durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldDurations {
    pub grab_ms: f32,
    /// Shared by build and erase.
    pub intent_ms: f32,
    pub rotate_ms: f32,
    pub reset_ms: f32,
    pub cycle_ms: f32,
}

impl Default for HoldDurations {
    fn default() -> Self {
        Self {
            grab_ms: 500.0,
            intent_ms: 500.0,
            rotate_ms: 1000.0,
            reset_ms: 1000.0,
            cycle_ms: 500.0,
        }
    }
}

/// One [`HoldTimer`] per [`Gesture`].
#[derive(Debug, Clone)]
pub struct GestureTimers {
    timers: HashMap<Gesture, HoldTimer>,
}

impl Default for GestureTimers {
    fn default() -> Self {
        Self::new(HoldDurations::default())
    }
}

impl GestureTimers {
    pub fn new(durations: HoldDurations) -> Self {
        let timers = Gesture::ALL
            .into_iter()
            .map(|g| {
                let timer = match g {
                    Gesture::Grab => HoldTimer::new(durations.grab_ms, Rearm::Sustain),
                    Gesture::Build | Gesture::Erase => {
                        HoldTimer::new(durations.intent_ms, Rearm::Sustain)
                    }
                    Gesture::Rotate => HoldTimer::new(durations.rotate_ms, Rearm::Sustain),
                    Gesture::Reset => HoldTimer::new(durations.reset_ms, Rearm::Restart),
                    Gesture::Cycle => HoldTimer::new(durations.cycle_ms, Rearm::OnRelease),
                };
                (g, timer)
            })
            .collect();
        Self { timers }
    }

    fn timer_mut(&mut self, gesture: Gesture) -> &mut HoldTimer {
        self.timers
            .entry(gesture)
            .or_insert_with(|| HoldTimer::new(0.0, Rearm::Sustain))
    }

    pub fn tick(&mut self, gesture: Gesture, condition: bool, dt_ms: f32) -> TimerTick {
        self.timer_mut(gesture).tick(condition, dt_ms)
    }

    pub fn suppress(&mut self, gesture: Gesture, condition: bool) {
        self.timer_mut(gesture).suppress(condition);
    }

    pub fn reset(&mut self, gesture: Gesture) {
        self.timer_mut(gesture).reset();
    }

    pub fn reset_all(&mut self) {
        for timer in self.timers.values_mut() {
            timer.reset();
        }
    }

    pub fn elapsed_ms(&self, gesture: Gesture) -> f32 {
        self.timers.get(&gesture).map_or(0.0, HoldTimer::elapsed_ms)
    }

    pub fn progress(&self, gesture: Gesture) -> f32 {
        self.timers.get(&gesture).map_or(0.0, HoldTimer::progress)
    }

    pub fn is_armed(&self, gesture: Gesture) -> bool {
        self.timers.get(&gesture).is_none_or(HoldTimer::is_armed)
    }

    /// True when no timer has accumulated any time.
    pub fn all_zero(&self) -> bool {
        self.timers.values().all(|t| t.elapsed_ms() == 0.0)
    }
}
