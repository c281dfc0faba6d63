//! Voxel Edit Engine.
//!
//! Owns two sparse sets keyed by [`VoxelKey`]:
//!
//! - the **committed** grid, published as an `Arc` so readers hold a stable
//!   snapshot.  A commit builds a new map and swaps it in; an erase goes
//!   through [`Arc::make_mut`], which copies only while a snapshot is alive.
//! - the **sketch** set of the stroke currently being dragged.
//!
//! A key is never in both sets at once.
//!
//! # Axis lock
//!
//! A stroke starts at an anchor cell.  Until some axis moves further than
//! the dead zone from the anchor, candidates are clamped onto the anchor
//! itself.  The first time one does, the stroke locks to the axis with the
//! largest displacement (ties go x, then y, then z) and from then on only
//! that axis is taken from the candidate.
//!
//! # Example
//!
//! ```rust
//! use voxsculpt_edit::voxel_grid::VoxelEditEngine;
//! use voxsculpt_types::{Axis, Vec3, VoxelKey};
//!
//! let key = |x, y, z| VoxelKey::from_position(Vec3::new(x, y, z));
//!
//! let mut engine = VoxelEditEngine::new(0.4);
//! engine.begin_stroke(key(0.0, 0.0, 0.0));
//! engine.extend_stroke(key(1.2, 0.0, 0.0));
//! assert_eq!(engine.locked_axis(), Some(Axis::X));
//!
//! engine.extend_stroke(key(2.4, 1.2, 0.0));
//! assert!(engine.sketch().contains_key(&key(2.4, 0.0, 0.0)));
//!
//! assert_eq!(engine.commit_stroke("#a5b4fc"), 2);
//! assert_eq!(engine.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use voxsculpt_types::{Axis, Vec3, VoxelKey};

/// Default axis-lock dead zone in grid-local units.
pub const DEFAULT_AXIS_LOCK_DEAD_ZONE: f32 = 0.4;

/// A committed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voxel {
    pub position: Vec3,
    pub color: String,
}

pub type VoxelMap = BTreeMap<VoxelKey, Voxel>;

#[derive(Debug, Clone)]
pub struct VoxelEditEngine {
    committed: Arc<VoxelMap>,
    sketch: BTreeMap<VoxelKey, Vec3>,
    anchor: Option<VoxelKey>,
    locked_axis: Option<Axis>,
    dead_zone: f32,
}

impl Default for VoxelEditEngine {
    fn default() -> Self {
        Self::new(DEFAULT_AXIS_LOCK_DEAD_ZONE)
    }
}

impl VoxelEditEngine {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            committed: Arc::new(BTreeMap::new()),
            sketch: BTreeMap::new(),
            anchor: None,
            locked_axis: None,
            dead_zone,
        }
    }

    // ── queries ─────────────────────────────────────────────────────────────

    /// Cheap snapshot of the committed grid.
    pub fn committed(&self) -> Arc<VoxelMap> {
        Arc::clone(&self.committed)
    }

    pub fn sketch(&self) -> &BTreeMap<VoxelKey, Vec3> {
        &self.sketch
    }

    pub fn contains(&self, key: &VoxelKey) -> bool {
        self.committed.contains_key(key)
    }

    /// Number of committed voxels.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn anchor(&self) -> Option<VoxelKey> {
        self.anchor
    }

    pub fn locked_axis(&self) -> Option<Axis> {
        self.locked_axis
    }

    pub fn is_stroking(&self) -> bool {
        self.anchor.is_some()
    }

    // ── strokes ─────────────────────────────────────────────────────────────

    /// Start a new stroke at `anchor`, discarding any previous sketch.
    pub fn begin_stroke(&mut self, anchor: VoxelKey) {
        self.sketch.clear();
        self.anchor = Some(anchor);
        self.locked_axis = None;
        debug!(%anchor, "stroke started");
    }

    /// Add the axis-clamped version of `candidate` to the sketch.
    ///
    /// Returns `true` when a new sketch cell was inserted.  Without an
    /// active stroke this is a no-op.
    pub fn extend_stroke(&mut self, candidate: VoxelKey) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };

        if self.locked_axis.is_none() {
            self.locked_axis = self.dominant_axis(anchor, candidate);
            if let Some(axis) = self.locked_axis {
                debug!(?axis, "stroke axis locked");
            }
        }

        let target = match self.locked_axis {
            Some(axis) => anchor.with_axis_from(axis, candidate),
            None => anchor,
        };

        if self.committed.contains_key(&target) || self.sketch.contains_key(&target) {
            return false;
        }
        self.sketch.insert(target, target.position());
        true
    }

    fn dominant_axis(&self, anchor: VoxelKey, candidate: VoxelKey) -> Option<Axis> {
        let disp = Axis::ALL.map(|axis| {
            candidate.tenths(axis).abs_diff(anchor.tenths(axis)) as f32 / 10.0
        });
        if disp.iter().all(|d| *d <= self.dead_zone) {
            return None;
        }
        let [dx, dy, dz] = disp;
        Some(if dx >= dy && dx >= dz {
            Axis::X
        } else if dy >= dx && dy >= dz {
            Axis::Y
        } else {
            Axis::Z
        })
    }

    /// Move every sketch cell into the committed grid with `color` and end
    /// the stroke.  Returns the number of voxels added.
    pub fn commit_stroke(&mut self, color: &str) -> usize {
        self.anchor = None;
        self.locked_axis = None;
        if self.sketch.is_empty() {
            return 0;
        }

        let mut next: VoxelMap = (*self.committed).clone();
        let sketch = std::mem::take(&mut self.sketch);
        let added = sketch.len();
        for (key, position) in sketch {
            next.insert(
                key,
                Voxel {
                    position,
                    color: color.to_string(),
                },
            );
        }
        self.committed = Arc::new(next);
        info!(added, total = self.committed.len(), color, "stroke committed");
        added
    }

    /// Drop the sketch without committing.  Returns the number discarded.
    pub fn cancel_stroke(&mut self) -> usize {
        let discarded = self.sketch.len();
        self.sketch.clear();
        self.anchor = None;
        self.locked_axis = None;
        if discarded > 0 {
            debug!(discarded, "stroke cancelled");
        }
        discarded
    }

    // ── destructive edits ───────────────────────────────────────────────────

    /// Remove the committed voxel at `key`.  Returns whether one existed.
    pub fn erase(&mut self, key: &VoxelKey) -> bool {
        if !self.committed.contains_key(key) {
            return false;
        }
        Arc::make_mut(&mut self.committed).remove(key);
        info!(%key, total = self.committed.len(), "voxel erased");
        true
    }

    /// Empty both sets and forget the stroke.
    pub fn hard_reset(&mut self) {
        self.committed = Arc::new(BTreeMap::new());
        self.sketch.clear();
        self.anchor = None;
        self.locked_axis = None;
    }
}
