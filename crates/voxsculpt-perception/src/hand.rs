//! Typed 21-point hand skeleton.
//!
//! The tracker numbers landmarks anatomically (0 = wrist, 4 = thumb tip,
//! 8 = index tip, ...).  [`Hand`] wraps a validated array of exactly
//! [`LANDMARK_COUNT`] points and exposes them through [`Joint`] and
//! [`Finger`] so gesture tests never index by raw number.

use voxsculpt_types::{HandFrame, HandLabel, LANDMARK_COUNT, Landmark, SculptError};

// ────────────────────────────────────────────────────────────────────────────
// Joint / Finger
// ────────────────────────────────────────────────────────────────────────────

/// Anatomical landmark positions reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl Joint {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The four non-thumb fingers, used for extended/curled tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn tip(self) -> Joint {
        match self {
            Finger::Index => Joint::IndexTip,
            Finger::Middle => Joint::MiddleTip,
            Finger::Ring => Joint::RingTip,
            Finger::Pinky => Joint::PinkyTip,
        }
    }

    /// Proximal interphalangeal joint of the finger.
    pub fn pip(self) -> Joint {
        match self {
            Finger::Index => Joint::IndexPip,
            Finger::Middle => Joint::MiddlePip,
            Finger::Ring => Joint::RingPip,
            Finger::Pinky => Joint::PinkyPip,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Hand
// ────────────────────────────────────────────────────────────────────────────

/// One hand's landmarks, guaranteed to hold exactly [`LANDMARK_COUNT`] points.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    label: HandLabel,
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Hand {
    pub fn new(label: HandLabel, landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { label, landmarks }
    }

    /// Validate a landmark slice of unknown length.
    ///
    /// # Errors
    ///
    /// Returns [`SculptError::DegenerateHand`] when the slice does not hold
    /// exactly [`LANDMARK_COUNT`] points.
    pub fn from_slice(label: HandLabel, landmarks: &[Landmark]) -> Result<Self, SculptError> {
        let points: [Landmark; LANDMARK_COUNT] =
            landmarks
                .try_into()
                .map_err(|_| SculptError::DegenerateHand {
                    label,
                    count: landmarks.len(),
                })?;
        Ok(Self::new(label, points))
    }

    pub fn label(&self) -> HandLabel {
        self.label
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn joint(&self, joint: Joint) -> Landmark {
        self.landmarks[joint.index()]
    }

    pub fn wrist(&self) -> Landmark {
        self.joint(Joint::Wrist)
    }

    pub fn thumb_tip(&self) -> Landmark {
        self.joint(Joint::ThumbTip)
    }

    pub fn index_tip(&self) -> Landmark {
        self.joint(Joint::IndexTip)
    }

    pub fn middle_mcp(&self) -> Landmark {
        self.joint(Joint::MiddleMcp)
    }

    /// True when the fingertip sits above its PIP joint in the image.
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.joint(finger.tip()).y < self.joint(finger.pip()).y
    }

    /// True when the fingertip has curled down past its PIP joint.
    pub fn is_curled(&self, finger: Finger) -> bool {
        self.joint(finger.tip()).y > self.joint(finger.pip()).y
    }
}

impl TryFrom<&HandFrame> for Hand {
    type Error = SculptError;

    fn try_from(frame: &HandFrame) -> Result<Self, Self::Error> {
        Hand::from_slice(frame.label, &frame.landmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand() -> Hand {
        Hand::new(HandLabel::Right, [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT])
    }

    #[test]
    fn joint_indices_follow_tracker_numbering() {
        assert_eq!(Joint::Wrist.index(), 0);
        assert_eq!(Joint::ThumbTip.index(), 4);
        assert_eq!(Joint::IndexTip.index(), 8);
        assert_eq!(Joint::MiddleMcp.index(), 9);
        assert_eq!(Joint::PinkyTip.index(), 20);
        assert_eq!(Finger::Ring.pip().index(), 14);
        assert_eq!(Finger::Pinky.pip().index(), 18);
    }

    #[test]
    fn from_slice_accepts_exactly_21_points() {
        let points = vec![Landmark::default(); LANDMARK_COUNT];
        let hand = Hand::from_slice(HandLabel::Left, &points).unwrap();
        assert_eq!(hand.label(), HandLabel::Left);
    }

    #[test]
    fn from_slice_rejects_degenerate_sets() {
        let points = vec![Landmark::default(); 12];
        let err = Hand::from_slice(HandLabel::Right, &points).unwrap_err();
        assert_eq!(
            err,
            SculptError::DegenerateHand {
                label: HandLabel::Right,
                count: 12
            }
        );
        let too_many = vec![Landmark::default(); 22];
        assert!(Hand::from_slice(HandLabel::Right, &too_many).is_err());
    }

    #[test]
    fn try_from_hand_frame() {
        let frame = HandFrame {
            label: HandLabel::Right,
            landmarks: vec![Landmark::new(0.1, 0.2, 0.3); LANDMARK_COUNT],
        };
        let hand = Hand::try_from(&frame).unwrap();
        assert!((hand.index_tip().z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn extended_and_curled_compare_tip_to_pip() {
        let mut points = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[Joint::IndexTip.index()].y = 0.3;
        points[Joint::IndexPip.index()].y = 0.4;
        points[Joint::MiddleTip.index()].y = 0.6;
        points[Joint::MiddlePip.index()].y = 0.4;
        let hand = Hand::new(HandLabel::Left, points);
        assert!(hand.is_extended(Finger::Index));
        assert!(!hand.is_curled(Finger::Index));
        assert!(hand.is_curled(Finger::Middle));
        assert!(!hand.is_extended(Finger::Middle));
    }

    #[test]
    fn level_tip_is_neither_extended_nor_curled() {
        let hand = flat_hand();
        assert!(!hand.is_extended(Finger::Ring));
        assert!(!hand.is_curled(Finger::Ring));
    }
}
