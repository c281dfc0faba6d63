//! Landmark Smoother.
//!
//! First-order IIR (exponential moving average) filter applied per hand, per
//! landmark, per coordinate, before any gesture test runs:
//!
//! ```text
//! s ← s + (raw − s) · α
//! ```
//!
//! Lateral coordinates (`x`, `y`) use a high blend factor for low-latency
//! tracking; depth (`z`) is noisier and uses a much lower one.  The first
//! time a label is seen (or the first time after it was forgotten) the raw
//! landmarks are copied verbatim.
//!
//! # Example
//!
//! ```rust
//! use voxsculpt_perception::smoother::LandmarkSmoother;
//! use voxsculpt_types::{HandLabel, Landmark, LANDMARK_COUNT};
//!
//! let mut smoother = LandmarkSmoother::new(0.5, 0.1);
//! let first = [Landmark::new(0.0, 0.0, 0.0); LANDMARK_COUNT];
//! smoother.smooth(HandLabel::Right, &first);
//!
//! let next = [Landmark::new(1.0, 1.0, 1.0); LANDMARK_COUNT];
//! let out = smoother.smooth(HandLabel::Right, &next);
//! assert!((out[0].x - 0.5).abs() < 1e-6);
//! assert!((out[0].z - 0.1).abs() < 1e-6);
//! ```

use std::collections::HashMap;

use tracing::trace;
use voxsculpt_types::{HandLabel, LANDMARK_COUNT, Landmark};

/// Default blend factor for `x` and `y`.
pub const DEFAULT_LATERAL_BLEND: f32 = 0.45;
/// Default blend factor for `z`.
pub const DEFAULT_DEPTH_BLEND: f32 = 0.1;

/// Per-label exponential smoothing of tracker landmarks.
#[derive(Debug, Clone)]
pub struct LandmarkSmoother {
    lateral_blend: f32,
    depth_blend: f32,
    hands: HashMap<HandLabel, [Landmark; LANDMARK_COUNT]>,
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_LATERAL_BLEND, DEFAULT_DEPTH_BLEND)
    }
}

impl LandmarkSmoother {
    /// Create a smoother.  Blend factors are clamped to `[0, 1]`.
    pub fn new(lateral_blend: f32, depth_blend: f32) -> Self {
        Self {
            lateral_blend: lateral_blend.clamp(0.0, 1.0),
            depth_blend: depth_blend.clamp(0.0, 1.0),
            hands: HashMap::new(),
        }
    }

    /// Blend `raw` into the stored state for `label` and return the result.
    ///
    /// The stored array is updated in place; the returned reference points
    /// at it.
    pub fn smooth(
        &mut self,
        label: HandLabel,
        raw: &[Landmark; LANDMARK_COUNT],
    ) -> &[Landmark; LANDMARK_COUNT] {
        let lateral = self.lateral_blend;
        let depth = self.depth_blend;
        let state = self.hands.entry(label).or_insert_with(|| {
            trace!(%label, "seeding smoother");
            *raw
        });
        for (s, r) in state.iter_mut().zip(raw.iter()) {
            s.x += (r.x - s.x) * lateral;
            s.y += (r.y - s.y) * lateral;
            s.z += (r.z - s.z) * depth;
        }
        state
    }

    /// Current smoothed landmarks for `label`, if it is being tracked.
    pub fn get(&self, label: HandLabel) -> Option<&[Landmark; LANDMARK_COUNT]> {
        self.hands.get(&label)
    }

    /// Drop the state for `label` so its next appearance re-seeds verbatim.
    pub fn forget(&mut self, label: HandLabel) {
        if self.hands.remove(&label).is_some() {
            trace!(%label, "smoother state dropped");
        }
    }

    /// Drop the state for every label.
    pub fn clear(&mut self) {
        self.hands.clear();
    }

    pub fn is_tracking(&self, label: HandLabel) -> bool {
        self.hands.contains_key(&label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(v: f32) -> [Landmark; LANDMARK_COUNT] {
        [Landmark::new(v, v, v); LANDMARK_COUNT]
    }

    #[test]
    fn first_sight_copies_verbatim() {
        let mut s = LandmarkSmoother::default();
        let out = s.smooth(HandLabel::Left, &uniform(0.7));
        assert!(out.iter().all(|p| (p.x - 0.7).abs() < 1e-6 && (p.z - 0.7).abs() < 1e-6));
    }

    #[test]
    fn lateral_moves_faster_than_depth() {
        let mut s = LandmarkSmoother::default();
        s.smooth(HandLabel::Right, &uniform(0.0));
        let out = s.smooth(HandLabel::Right, &uniform(1.0));
        assert!((out[8].x - 0.45).abs() < 1e-6);
        assert!((out[8].y - 0.45).abs() < 1e-6);
        assert!((out[8].z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn converges_toward_constant_input() {
        let mut s = LandmarkSmoother::default();
        s.smooth(HandLabel::Right, &uniform(0.0));
        for _ in 0..60 {
            s.smooth(HandLabel::Right, &uniform(1.0));
        }
        let out = s.get(HandLabel::Right).unwrap();
        assert!((out[0].x - 1.0).abs() < 1e-4);
        // depth converges more slowly but still gets close
        assert!((out[0].z - 1.0).abs() < 0.01);
    }

    #[test]
    fn labels_are_independent() {
        let mut s = LandmarkSmoother::default();
        s.smooth(HandLabel::Left, &uniform(0.2));
        s.smooth(HandLabel::Right, &uniform(0.8));
        assert!((s.get(HandLabel::Left).unwrap()[0].x - 0.2).abs() < 1e-6);
        assert!((s.get(HandLabel::Right).unwrap()[0].x - 0.8).abs() < 1e-6);
    }

    #[test]
    fn forget_reseeds_on_next_sight() {
        let mut s = LandmarkSmoother::default();
        s.smooth(HandLabel::Left, &uniform(0.0));
        s.forget(HandLabel::Left);
        assert!(!s.is_tracking(HandLabel::Left));
        let out = s.smooth(HandLabel::Left, &uniform(0.9));
        assert!((out[0].x - 0.9).abs() < 1e-6);
    }

    #[test]
    fn clear_drops_all_labels() {
        let mut s = LandmarkSmoother::default();
        s.smooth(HandLabel::Left, &uniform(0.1));
        s.smooth(HandLabel::Right, &uniform(0.1));
        s.clear();
        assert!(s.get(HandLabel::Left).is_none());
        assert!(s.get(HandLabel::Right).is_none());
    }

    #[test]
    fn blend_factors_are_clamped() {
        let mut s = LandmarkSmoother::new(3.0, -1.0);
        s.smooth(HandLabel::Right, &uniform(0.0));
        let out = s.smooth(HandLabel::Right, &uniform(1.0));
        assert!((out[0].x - 1.0).abs() < 1e-6);
        assert!(out[0].z.abs() < 1e-6);
    }
}
