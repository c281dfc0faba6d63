//! [`GestureArbiter`] – ordered resolution of competing gesture intents.
//!
//! The two-hand and color-cycle gestures form a strict priority list of
//! [`ExclusiveGesture`] tiers.  Each frame the tiers are evaluated top-down;
//! the first whose condition holds *claims* the frame:
//!
//! - its timer advances,
//! - every tier above it saw a false condition and is zeroed,
//! - every tier below it, and every single-hand timer, is suppressed.
//!
//! When no tier claims the frame the single-hand gestures run: left-hand
//! grab, then right-hand erase/build via [`resolve_right_hand`].
//!
//! The tier set is closed: [`Tier`] lists every exclusive gesture, in
//! priority order `Reset > Rotate > Cycle`.

use voxsculpt_perception::HandPose;
use voxsculpt_types::Gesture;

use crate::hold_timer::{GestureTimers, TimerTick};

/// Classifier results for both hands in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PosePair {
    pub left: HandPose,
    pub right: HandPose,
}

impl PosePair {
    pub fn new(left: HandPose, right: HandPose) -> Self {
        Self { left, right }
    }

    /// Left-hand fist, the grab condition.
    pub fn grab_condition(&self) -> bool {
        self.left.fist
    }
}

/// Timers for the gestures that only run when no tier claims the frame.
pub const SINGLE_HAND_GESTURES: [Gesture; 3] = [Gesture::Grab, Gesture::Erase, Gesture::Build];

// ────────────────────────────────────────────────────────────────────────────
// Tiers
// ────────────────────────────────────────────────────────────────────────────

/// Every exclusive gesture, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Reset,
    Rotate,
    Cycle,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Reset, Tier::Rotate, Tier::Cycle];

    pub fn gesture(self) -> Gesture {
        match self {
            Tier::Reset => Gesture::Reset,
            Tier::Rotate => Gesture::Rotate,
            Tier::Cycle => Gesture::Cycle,
        }
    }
}

/// A gesture that, while its condition holds, blocks every gesture below it.
pub trait ExclusiveGesture: Send + Sync {
    fn tier(&self) -> Tier;

    fn holds(&self, poses: &PosePair) -> bool;
}

/// Both hands closed: hard reset.
pub struct BothFists;

impl ExclusiveGesture for BothFists {
    fn tier(&self) -> Tier {
        Tier::Reset
    }

    fn holds(&self, poses: &PosePair) -> bool {
        poses.left.fist && poses.right.fist
    }
}

/// Both hands open: global rotate.
pub struct BothPalms;

impl ExclusiveGesture for BothPalms {
    fn tier(&self) -> Tier {
        Tier::Rotate
    }

    fn holds(&self, poses: &PosePair) -> bool {
        poses.left.palm && poses.right.palm
    }
}

/// Peace sign on either hand: color cycle.
pub struct EitherPeace;

impl ExclusiveGesture for EitherPeace {
    fn tier(&self) -> Tier {
        Tier::Cycle
    }

    fn holds(&self, poses: &PosePair) -> bool {
        poses.left.peace || poses.right.peace
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GestureArbiter
// ────────────────────────────────────────────────────────────────────────────

/// The tier that won the frame and its timer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Claim {
    pub tier: Tier,
    pub tick: TimerTick,
}

impl Claim {
    pub fn gesture(&self) -> Gesture {
        self.tier.gesture()
    }
}

/// The exclusive tiers in priority order.
///
/// # Example
///
/// ```
/// use voxsculpt_kernel::arbiter::{GestureArbiter, PosePair};
/// use voxsculpt_kernel::hold_timer::GestureTimers;
/// use voxsculpt_perception::HandPose;
/// use voxsculpt_types::Gesture;
///
/// let arbiter = GestureArbiter::standard();
/// let mut timers = GestureTimers::default();
///
/// let fist = HandPose { present: true, fist: true, ..HandPose::absent() };
/// let claim = arbiter
///     .arbitrate(&PosePair::new(fist, fist), &mut timers, 16.0)
///     .unwrap();
/// assert_eq!(claim.gesture(), Gesture::Reset);
/// ```
pub struct GestureArbiter {
    tiers: Vec<Box<dyn ExclusiveGesture>>,
}

impl Default for GestureArbiter {
    fn default() -> Self {
        Self::standard()
    }
}

impl GestureArbiter {
    /// `Reset > Rotate > Cycle`.
    pub fn standard() -> Self {
        Self {
            tiers: vec![Box::new(BothFists), Box::new(BothPalms), Box::new(EitherPeace)],
        }
    }

    /// Tiers in priority order.
    pub fn order(&self) -> Vec<Tier> {
        self.tiers.iter().map(|t| t.tier()).collect()
    }

    /// Evaluate the tiers for one frame and update `timers` accordingly.
    ///
    /// Returns the claiming tier, or `None` when the single-hand gestures
    /// should run.
    pub fn arbitrate(
        &self,
        poses: &PosePair,
        timers: &mut GestureTimers,
        dt_ms: f32,
    ) -> Option<Claim> {
        let mut claim: Option<Claim> = None;
        for entry in &self.tiers {
            let tier = entry.tier();
            let gesture = tier.gesture();
            let condition = entry.holds(poses);
            match claim {
                Some(_) => timers.suppress(gesture, condition),
                None if condition => {
                    let tick = timers.tick(gesture, true, dt_ms);
                    claim = Some(Claim { tier, tick });
                }
                None => {
                    timers.tick(gesture, false, dt_ms);
                }
            }
        }

        if let Some(c) = &claim {
            for gesture in SINGLE_HAND_GESTURES {
                timers.reset(gesture);
            }
            tracing::trace!(
                gesture = c.gesture().as_str(),
                progress = c.tick.progress,
                "exclusive gesture claimed frame"
            );
        }
        claim
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Right hand
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightHandIntent {
    Erase,
    Build,
}

impl RightHandIntent {
    pub fn gesture(self) -> Gesture {
        match self {
            RightHandIntent::Erase => Gesture::Erase,
            RightHandIntent::Build => Gesture::Build,
        }
    }
}

/// Which right-hand intent, if any, qualifies this frame.
///
/// Nothing qualifies while a grab is active.  Erase (left pinch plus right
/// point) outranks build (right pinch); an open right palm disqualifies both.
pub fn resolve_right_hand(poses: &PosePair, grabbing: bool) -> Option<RightHandIntent> {
    let right = &poses.right;
    if grabbing || !right.present || right.palm {
        return None;
    }
    if poses.left.pinching && right.pointing {
        Some(RightHandIntent::Erase)
    } else if right.pinching {
        Some(RightHandIntent::Build)
    } else {
        None
    }
}
