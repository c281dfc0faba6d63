//! Coordinate Mapper.
//!
//! Projects a normalized image-space landmark into the voxel group's local
//! grid in three steps:
//!
//! 1. **World** – linear rescale, mirrored so that moving the hand right on
//!    screen moves the cursor right in the scene:
//!    `((0.5 − x)·W, (0.5 − y)·H, −z·D)`.
//! 2. **Local** – undo the scene transform ([`SceneTransform::to_local`]).
//! 3. **Quantize** – round each axis to the nearest multiple of the grid
//!    pitch and wrap it in a [`VoxelKey`].
//!
//! # Example
//!
//! ```rust
//! use voxsculpt_perception::mapper::CoordinateMapper;
//! use voxsculpt_types::Vec3;
//!
//! let mapper = CoordinateMapper::default();
//! let key = mapper.quantize(Vec3::new(1.5, 0.05, 0.05));
//! assert_eq!(key.to_string(), "1.2,0.0,0.0");
//! ```

use voxsculpt_types::{Landmark, Vec3, VoxelKey};

use crate::transform::SceneTransform;

pub const DEFAULT_WORLD_WIDTH: f32 = 25.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 18.0;
pub const DEFAULT_WORLD_DEPTH: f32 = 25.0;
/// Edge length of one voxel cell in world units.
pub const DEFAULT_GRID_PITCH: f32 = 1.2;

/// Image → world → grid projection with fixed extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub world_width: f32,
    pub world_height: f32,
    pub world_depth: f32,
    pub grid_pitch: f32,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            world_depth: DEFAULT_WORLD_DEPTH,
            grid_pitch: DEFAULT_GRID_PITCH,
        }
    }
}

impl CoordinateMapper {
    pub fn new(world_width: f32, world_height: f32, world_depth: f32, grid_pitch: f32) -> Self {
        Self {
            world_width,
            world_height,
            world_depth,
            grid_pitch,
        }
    }

    /// Scene-space position of a landmark, including depth.
    pub fn to_world(&self, lm: Landmark) -> Vec3 {
        Vec3::new(
            (0.5 - lm.x) * self.world_width,
            (0.5 - lm.y) * self.world_height,
            -lm.z * self.world_depth,
        )
    }

    /// Scene-space position on the `z = 0` plane.  Used for panning, where
    /// the tracker's depth estimate is too noisy to follow.
    pub fn to_world_planar(&self, lm: Landmark) -> Vec3 {
        Vec3::new(
            (0.5 - lm.x) * self.world_width,
            (0.5 - lm.y) * self.world_height,
            0.0,
        )
    }

    /// Round one coordinate to the nearest grid multiple.
    pub fn snap(&self, v: f32) -> f32 {
        (v / self.grid_pitch).round() * self.grid_pitch
    }

    /// Snap a group-local point onto the grid.
    pub fn quantize(&self, local: Vec3) -> VoxelKey {
        VoxelKey::from_position(Vec3::new(
            self.snap(local.x),
            self.snap(local.y),
            self.snap(local.z),
        ))
    }

    /// The grid cell under `lm` given the current scene transform.
    pub fn key_for(&self, lm: Landmark, scene: &SceneTransform) -> VoxelKey {
        self.quantize(scene.to_local(self.to_world(lm)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Euler;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn centre_of_image_maps_to_origin() {
        let m = CoordinateMapper::default();
        let w = m.to_world(Landmark::new(0.5, 0.5, 0.0));
        assert_eq!(w, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn world_mapping_mirrors_and_flips() {
        let m = CoordinateMapper::default();
        let w = m.to_world(Landmark::new(0.3, 0.2, 0.1));
        assert!((w.x - 5.0).abs() < 1e-4);
        assert!((w.y - 5.4).abs() < 1e-4);
        assert!((w.z + 2.5).abs() < 1e-4);
    }

    #[test]
    fn planar_mapping_drops_depth() {
        let m = CoordinateMapper::default();
        let w = m.to_world_planar(Landmark::new(0.3, 0.2, 0.9));
        assert_eq!(w.z, 0.0);
        assert!((w.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn quantize_rounds_to_nearest_pitch() {
        let m = CoordinateMapper::default();
        assert_eq!(m.quantize(Vec3::new(1.5, 0.05, 0.05)).to_string(), "1.2,0.0,0.0");
        assert_eq!(m.quantize(Vec3::new(1.81, -0.61, 2.9)).to_string(), "2.4,-1.2,2.4");
    }

    #[test]
    fn sub_pitch_jitter_collapses_to_one_key() {
        let m = CoordinateMapper::default();
        let a = m.quantize(Vec3::new(2.39, 0.01, -0.02));
        let b = m.quantize(Vec3::new(2.41, -0.01, 0.02));
        assert_eq!(a, b);
    }

    #[test]
    fn custom_pitch() {
        let m = CoordinateMapper::new(25.0, 18.0, 25.0, 1.0);
        assert_eq!(m.quantize(Vec3::new(2.6, -0.4, 0.0)).to_string(), "3.0,0.0,0.0");
    }

    #[test]
    fn key_for_accounts_for_scene_translation() {
        let m = CoordinateMapper::default();
        let scene = SceneTransform::new(Vec3::new(2.4, 0.0, 0.0), Euler::zero());
        // Image centre maps to world origin, which is local -2.4 on x.
        let key = m.key_for(Landmark::new(0.5, 0.5, 0.0), &scene);
        assert_eq!(key.to_string(), "-2.4,0.0,0.0");
    }

    #[test]
    fn key_for_accounts_for_scene_rotation() {
        let m = CoordinateMapper::default();
        let scene = SceneTransform::new(Vec3::zero(), Euler::new(0.0, 0.0, FRAC_PI_2));
        // World (0, 3.6, 0) lies on local +x after undoing a 90° roll.
        let lm = Landmark::new(0.5, 0.5 - 3.6 / 18.0, 0.0);
        let key = m.key_for(lm, &scene);
        assert_eq!(key.to_string(), "3.6,0.0,0.0");
    }
}
