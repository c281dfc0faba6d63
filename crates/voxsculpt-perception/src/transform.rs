//! Scene transform math.
//!
//! The voxel grid is rendered as one rigid group with a translation and an
//! Euler rotation (XYZ order).  Mapping a hand position into the grid needs
//! the *inverse* of that transform: subtract the translation, then undo the
//! rotation with the conjugate quaternion.
//!
//! # Example
//!
//! ```rust
//! use voxsculpt_perception::transform::{Euler, SceneTransform};
//! use voxsculpt_types::Vec3;
//!
//! let scene = SceneTransform::new(Vec3::new(1.0, 0.0, 0.0), Euler::zero());
//! let local = scene.to_local(Vec3::new(1.5, 0.0, 0.0));
//! assert!((local.x - 0.5).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};
use voxsculpt_types::Vec3;

// ────────────────────────────────────────────────────────────────────────────
// Quaternion
// ────────────────────────────────────────────────────────────────────────────

/// A unit quaternion representing a 3-D rotation (w, x, y, z convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Rotation of `angle` radians about a unit `axis`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    /// Rotation equivalent to applying `euler.x` about X, then `euler.y`
    /// about Y, then `euler.z` about Z in the object's frame (intrinsic XYZ).
    pub fn from_euler(euler: Euler) -> Self {
        let qx = Self::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), euler.x);
        let qy = Self::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), euler.y);
        let qz = Self::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), euler.z);
        qx.mul(qy).mul(qz)
    }

    /// Hamilton product: compose two rotations.
    pub fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }

    /// Conjugate (== inverse for a unit quaternion).
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotate a vector by this quaternion: p' = q * p * q*.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let p = Self::new(0.0, v.x, v.y, v.z);
        let rotated = self.mul(p).mul(self.conjugate());
        Vec3::new(rotated.x, rotated.y, rotated.z)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Euler
// ────────────────────────────────────────────────────────────────────────────

/// Euler angles in radians: `x` = pitch, `y` = yaw, `z` = roll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SceneTransform
// ────────────────────────────────────────────────────────────────────────────

/// Pose of the voxel group in the world: rotate a local point by `rotation`,
/// then add `position`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneTransform {
    pub position: Vec3,
    pub rotation: Euler,
}

impl SceneTransform {
    pub fn new(position: Vec3, rotation: Euler) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Express a world-space point in the group's local frame.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        Quaternion::from_euler(self.rotation)
            .conjugate()
            .rotate(world.sub(self.position))
    }

    /// Express a group-local point in world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        Quaternion::from_euler(self.rotation)
            .rotate(local)
            .add(self.position)
    }
}
