//! Synthetic hand poses for headless testing without a camera or tracker.
//!
//! [`SimHand`] lays out a plausible 21-point skeleton around an anchor point
//! with each finger explicitly extended, curled, or level, so that exactly
//! the intended classifiers fire.
//!
//! # Example
//!
//! ```rust
//! use voxsculpt_perception::gestures::is_fist;
//! use voxsculpt_perception::sim::{Pose, SimHand};
//! use voxsculpt_types::HandLabel;
//!
//! let hand = SimHand::new(HandLabel::Left, Pose::Fist).at(0.3, 0.6).build();
//! assert!(is_fist(Some(&hand)));
//! ```

use voxsculpt_types::{HandFrame, HandLabel, LANDMARK_COUNT, Landmark, TrackerFrame};

use crate::hand::{Finger, Hand, Joint};

/// Vertical tip offset from the PIP joint for an extended finger.
const EXTENDED_DY: f32 = -0.1;
/// Vertical tip offset from the PIP joint for a curled finger.
const CURLED_DY: f32 = 0.05;

/// Canned hand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    /// Every fingertip level with its joint; no classifier fires.
    Neutral,
    Fist,
    OpenPalm,
    Pinch,
    Point,
    Peace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FingerState {
    Extended,
    Curled,
    Level,
}

impl FingerState {
    fn tip_dy(self) -> f32 {
        match self {
            FingerState::Extended => EXTENDED_DY,
            FingerState::Curled => CURLED_DY,
            FingerState::Level => 0.0,
        }
    }
}

/// Builder for one synthetic hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimHand {
    label: HandLabel,
    pose: Pose,
    x: f32,
    y: f32,
    depth: f32,
    thumb_offset: (f32, f32, f32),
    ring_curled: bool,
}

impl SimHand {
    /// A hand in `pose` with its index PIP joint at the image centre.
    pub fn new(label: HandLabel, pose: Pose) -> Self {
        Self {
            label,
            pose,
            x: 0.5,
            y: 0.5,
            depth: 0.0,
            thumb_offset: (0.0, 0.0, 0.0),
            ring_curled: false,
        }
    }

    /// Move the hand so its index PIP joint sits at `(x, y)`.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn depth(mut self, z: f32) -> Self {
        self.depth = z;
        self
    }

    /// Shift the thumb tip in the image plane.
    pub fn thumb_offset(mut self, dx: f32, dy: f32) -> Self {
        self.thumb_offset.0 = dx;
        self.thumb_offset.1 = dy;
        self
    }

    pub fn thumb_depth_offset(mut self, dz: f32) -> Self {
        self.thumb_offset.2 = dz;
        self
    }

    /// Force the ring finger curled regardless of pose.
    pub fn curl_ring(mut self) -> Self {
        self.ring_curled = true;
        self
    }

    fn finger_states(&self) -> [(Finger, FingerState); 4] {
        use FingerState::{Curled as C, Extended as E, Level as L};
        let [index, middle, mut ring, pinky] = match self.pose {
            Pose::Neutral => [L, L, L, L],
            Pose::Fist => [C, C, C, C],
            Pose::OpenPalm => [E, E, E, E],
            Pose::Pinch => [L, C, C, C],
            Pose::Point => [E, C, C, C],
            Pose::Peace => [E, E, C, C],
        };
        if self.ring_curled {
            ring = C;
        }
        [
            (Finger::Index, index),
            (Finger::Middle, middle),
            (Finger::Ring, ring),
            (Finger::Pinky, pinky),
        ]
    }

    pub fn build(&self) -> Hand {
        Hand::new(self.label, self.landmarks())
    }

    /// The raw tracker record this hand would arrive as.
    pub fn frame(&self) -> HandFrame {
        HandFrame {
            label: self.label,
            landmarks: self.landmarks().to_vec(),
        }
    }

    fn landmarks(&self) -> [Landmark; LANDMARK_COUNT] {
        let (x, y, z) = (self.x, self.y, self.depth);
        let mut pts = [Landmark::new(x, y, z); LANDMARK_COUNT];
        pts[Joint::Wrist.index()] = Landmark::new(x, y + 0.2, z);

        let mcps = [Joint::IndexMcp, Joint::MiddleMcp, Joint::RingMcp, Joint::PinkyMcp];
        let dips = [Joint::IndexDip, Joint::MiddleDip, Joint::RingDip, Joint::PinkyDip];
        for (slot, (finger, state)) in self.finger_states().into_iter().enumerate() {
            let fx = x + 0.03 * slot as f32;
            let tip_y = y + state.tip_dy();
            pts[mcps[slot].index()] = Landmark::new(fx, y + 0.1, z);
            pts[finger.pip().index()] = Landmark::new(fx, y, z);
            pts[dips[slot].index()] = Landmark::new(fx, (y + tip_y) * 0.5, z);
            pts[finger.tip().index()] = Landmark::new(fx, tip_y, z);
        }

        let index_tip = pts[Joint::IndexTip.index()];
        let thumb_base = if self.pose == Pose::Pinch {
            index_tip
        } else {
            Landmark::new(x - 0.15, y + 0.05, z)
        };
        let (dx, dy, dz) = self.thumb_offset;
        let thumb_tip = Landmark::new(thumb_base.x + dx, thumb_base.y + dy, thumb_base.z + dz);
        for joint in [Joint::ThumbCmc, Joint::ThumbMcp, Joint::ThumbIp] {
            pts[joint.index()] = Landmark::new((x + thumb_tip.x) * 0.5, y + 0.1, z);
        }
        pts[Joint::ThumbTip.index()] = thumb_tip;
        pts
    }
}

/// Assemble a tracker callback from synthetic hands.
pub fn tracker_frame(hands: &[SimHand]) -> TrackerFrame {
    TrackerFrame::with_hands(hands.iter().map(SimHand::frame).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_pip_sits_at_anchor() {
        let hand = SimHand::new(HandLabel::Right, Pose::Point).at(0.4, 0.3).build();
        let pip = hand.joint(Joint::IndexPip);
        assert!((pip.x - 0.4).abs() < 1e-6);
        assert!((pip.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn pinch_places_thumb_on_index_tip() {
        let hand = SimHand::new(HandLabel::Right, Pose::Pinch).depth(-0.2).build();
        assert_eq!(hand.thumb_tip(), hand.index_tip());
        assert!((hand.index_tip().z + 0.2).abs() < 1e-6);
    }

    #[test]
    fn frame_round_trips_through_hand() {
        let sim = SimHand::new(HandLabel::Left, Pose::Peace);
        let hand = Hand::try_from(&sim.frame()).unwrap();
        assert_eq!(hand, sim.build());
    }

    #[test]
    fn tracker_frame_keeps_every_hand() {
        let frame = tracker_frame(&[
            SimHand::new(HandLabel::Left, Pose::Fist),
            SimHand::new(HandLabel::Right, Pose::Fist),
        ]);
        assert_eq!(frame.hand_count(), 2);
    }
}
