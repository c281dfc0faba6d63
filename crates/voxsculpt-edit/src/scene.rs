//! Scene Transform Controller.
//!
//! Two-hand rotation is rate control: each frame the rotation grows by an
//! amount proportional to the current inter-hand offset, so it stops the
//! moment the gesture is released.  Grab is absolute follow: the group sits
//! at the hand position plus an offset latched when the grab confirmed, so
//! it never jumps to the hand.

use tracing::info;
use voxsculpt_perception::transform::SceneTransform;
use voxsculpt_types::{Landmark, Vec3};

pub const DEFAULT_ROTATE_GAIN: f32 = 0.05;
/// Horizontal hand separation that produces zero yaw.
pub const DEFAULT_ROTATE_BIAS: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct SceneTransformController {
    transform: SceneTransform,
    grab_offset: Option<Vec3>,
    rotate_gain: f32,
    rotate_bias: f32,
}

impl Default for SceneTransformController {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATE_GAIN, DEFAULT_ROTATE_BIAS)
    }
}

impl SceneTransformController {
    pub fn new(rotate_gain: f32, rotate_bias: f32) -> Self {
        Self {
            transform: SceneTransform::identity(),
            grab_offset: None,
            rotate_gain,
            rotate_bias,
        }
    }

    pub fn transform(&self) -> SceneTransform {
        self.transform
    }

    pub fn grab_offset(&self) -> Option<Vec3> {
        self.grab_offset
    }

    pub fn is_grabbing(&self) -> bool {
        self.grab_offset.is_some()
    }

    /// Accumulate one frame of two-hand rotation from each hand's reference
    /// landmark.  Yaw follows the horizontal offset, pitch the vertical one.
    pub fn apply_rotation_delta(&mut self, left: Landmark, right: Landmark) {
        let r = &mut self.transform.rotation;
        r.y += (right.x - left.x - self.rotate_bias) * self.rotate_gain;
        r.x += (right.y - left.y) * self.rotate_gain;
    }

    /// Remember where the group sits relative to `hand_world`.
    pub fn latch_grab(&mut self, hand_world: Vec3) -> Vec3 {
        let offset = self.transform.position.sub(hand_world);
        self.grab_offset = Some(offset);
        info!(x = offset.x, y = offset.y, z = offset.z, "grab latched");
        offset
    }

    /// Move the group to `hand_world` plus the latched offset.  No-op when
    /// no grab is latched.
    pub fn apply_grab(&mut self, hand_world: Vec3) {
        if let Some(offset) = self.grab_offset {
            self.transform.position = hand_world.add(offset);
        }
    }

    pub fn release_grab(&mut self) {
        self.grab_offset = None;
    }

    /// Back to identity, dropping any grab.
    pub fn reset(&mut self) {
        self.transform = SceneTransform::identity();
        self.grab_offset = None;
    }
}
