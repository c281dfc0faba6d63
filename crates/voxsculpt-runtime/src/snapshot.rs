//! Render snapshot – everything the renderer and HUD need after a frame.
//!
//! The committed grid is shared through an `Arc`, so taking a snapshot
//! never copies voxels and later edits never alter a snapshot already
//! handed out.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use voxsculpt_edit::VoxelMap;
use voxsculpt_perception::SceneTransform;
use voxsculpt_types::{Gesture, Landmark, Mode, Vec3, VoxelKey};

/// A point in normalized image space, for drawing HUD overlays.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Image centre, used by the two-hand gestures.
    pub fn centre() -> Self {
        Self::new(0.5, 0.5)
    }
}

impl From<Landmark> for ScreenPoint {
    fn from(lm: Landmark) -> Self {
        Self::new(lm.x, lm.y)
    }
}

/// Progress ring for a gesture that is accumulating hold time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressIndicator {
    pub gesture: Gesture,
    /// `0..=1`.
    pub progress: f32,
    pub anchor: ScreenPoint,
    /// Palette hex for build and cycle rings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<String>,
}

/// Ghost cell under the right index tip while building or erasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub key: VoxelKey,
    /// Cell centre in world space.
    pub world: Vec3,
    pub erase: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub mode: Mode,
    pub voxels: Arc<VoxelMap>,
    pub sketch: BTreeMap<VoxelKey, Vec3>,
    pub transform: SceneTransform,
    pub indicators: Vec<ProgressIndicator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
    pub hand_count: usize,
    pub voxel_count: usize,
    pub palette_index: usize,
    pub active_color: String,
}

impl RenderSnapshot {
    /// Indicator for `gesture`, if one is showing.
    pub fn indicator(&self, gesture: Gesture) -> Option<&ProgressIndicator> {
        self.indicators.iter().find(|i| i.gesture == gesture)
    }
}
