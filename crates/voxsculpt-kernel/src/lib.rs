//! `voxsculpt-kernel` – debouncing and arbitration.
//!
//! Turns per-frame classifier results into time-gated, mutually exclusive
//! intents.  Nothing here touches the voxel grid or the scene transform.
//!
//! # Modules
//!
//! - [`clock`] – [`FrameClock`][clock::FrameClock]: fixed-tick or
//!   timestamp-driven hold time per frame.
//! - [`hold_timer`] – [`HoldTimer`][hold_timer::HoldTimer] and the
//!   per-gesture [`GestureTimers`][hold_timer::GestureTimers].
//! - [`arbiter`] – [`GestureArbiter`][arbiter::GestureArbiter]: ordered
//!   `Reset > Rotate > Cycle` tiers, plus right-hand intent resolution.

pub mod arbiter;
pub mod clock;
pub mod hold_timer;

pub use arbiter::{
    Claim, ExclusiveGesture, GestureArbiter, PosePair, RightHandIntent, Tier, resolve_right_hand,
};
pub use clock::{ClockMode, FrameClock};
pub use hold_timer::{GestureTimers, HoldDurations, HoldTimer, Rearm, TimerTick};
