//! Gesture Classifiers.
//!
//! Pure, frame-local predicates over one hand's smoothed landmarks.  Image
//! space `y` grows downward, so a finger is *extended* when its tip is above
//! (smaller `y` than) its PIP joint and *curled* when the tip is below it.
//!
//! | Predicate | Rule |
//! |---|---|
//! | [`is_fist`] | index, middle and ring curled |
//! | [`is_palm`] | index, middle and pinky extended |
//! | [`is_pointing`] | index extended, middle curled |
//! | [`is_peace`] | index and middle extended, ring and pinky curled |
//! | [`PinchDetector::is_pinching`] | thumb tip within threshold of index tip (image plane unless depth is enabled) |
//!
//! Every predicate returns `false` for an absent hand.

use crate::hand::{Finger, Hand};

/// Default thumb-to-index distance, in normalized image units.
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.05;

pub fn is_fist(hand: Option<&Hand>) -> bool {
    hand.is_some_and(|h| {
        h.is_curled(Finger::Index) && h.is_curled(Finger::Middle) && h.is_curled(Finger::Ring)
    })
}

/// Open-hand heuristic.  Thumb and ring are not consulted.
pub fn is_palm(hand: Option<&Hand>) -> bool {
    hand.is_some_and(|h| {
        h.is_extended(Finger::Index)
            && h.is_extended(Finger::Middle)
            && h.is_extended(Finger::Pinky)
    })
}

pub fn is_pointing(hand: Option<&Hand>) -> bool {
    hand.is_some_and(|h| h.is_extended(Finger::Index) && h.is_curled(Finger::Middle))
}

pub fn is_peace(hand: Option<&Hand>) -> bool {
    hand.is_some_and(|h| {
        h.is_extended(Finger::Index)
            && h.is_extended(Finger::Middle)
            && h.is_curled(Finger::Ring)
            && h.is_curled(Finger::Pinky)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Pinch
// ────────────────────────────────────────────────────────────────────────────

/// Thumb/index proximity test with a configurable threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchDetector {
    /// Maximum thumb-to-index distance that counts as a pinch.
    pub threshold: f32,
    /// Include the relative depth coordinate in the distance.  Off by
    /// default.
    pub use_depth: bool,
}

impl Default for PinchDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PINCH_THRESHOLD,
            use_depth: false,
        }
    }
}

impl PinchDetector {
    pub fn new(threshold: f32, use_depth: bool) -> Self {
        Self {
            threshold,
            use_depth,
        }
    }

    /// Euclidean thumb-to-index distance, or `None` for an absent hand.
    pub fn distance(&self, hand: Option<&Hand>) -> Option<f32> {
        let h = hand?;
        let (a, b) = (h.thumb_tip(), h.index_tip());
        let (dx, dy) = (a.x - b.x, a.y - b.y);
        let dz = if self.use_depth { a.z - b.z } else { 0.0 };
        Some((dx * dx + dy * dy + dz * dz).sqrt())
    }

    pub fn is_pinching(&self, hand: Option<&Hand>) -> bool {
        self.distance(hand).is_some_and(|d| d < self.threshold)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HandPose
// ────────────────────────────────────────────────────────────────────────────

/// Every classifier result for one hand in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandPose {
    pub present: bool,
    pub fist: bool,
    pub palm: bool,
    pub pointing: bool,
    pub peace: bool,
    pub pinching: bool,
}

impl HandPose {
    pub fn classify(hand: Option<&Hand>, pinch: &PinchDetector) -> Self {
        Self {
            present: hand.is_some(),
            fist: is_fist(hand),
            palm: is_palm(hand),
            pointing: is_pointing(hand),
            peace: is_peace(hand),
            pinching: pinch.is_pinching(hand),
        }
    }

    /// The pose of a hand that is not in view.
    pub fn absent() -> Self {
        Self::default()
    }
}
