//! `voxsculpt-perception` – from raw tracker points to grid cells.
//!
//! Everything here is frame-local or filter state over a single hand; no
//! module knows about hold timers, modes or the voxel grid.
//!
//! # Modules
//!
//! - [`hand`] – [`Hand`][hand::Hand]: validated 21-point skeleton with named
//!   [`Joint`][hand::Joint] and [`Finger`][hand::Finger] accessors.
//! - [`smoother`] – [`LandmarkSmoother`][smoother::LandmarkSmoother]:
//!   per-label exponential moving average that damps tracker jitter.
//! - [`gestures`] – fist / palm / pointing / peace predicates and the
//!   [`PinchDetector`][gestures::PinchDetector].
//! - [`transform`] – [`SceneTransform`][transform::SceneTransform]: the voxel
//!   group's pan and Euler rotation, with quaternion-based inverse.
//! - [`mapper`] – [`CoordinateMapper`][mapper::CoordinateMapper]: image →
//!   world → grid-local projection and quantization to
//!   [`VoxelKey`][voxsculpt_types::VoxelKey].
//! - [`sim`] – synthetic hand poses for tests and demos.

pub mod gestures;
pub mod hand;
pub mod mapper;
pub mod sim;
pub mod smoother;
pub mod transform;

pub use gestures::{HandPose, PinchDetector};
pub use hand::{Finger, Hand, Joint};
pub use mapper::CoordinateMapper;
pub use smoother::LandmarkSmoother;
pub use transform::{Euler, Quaternion, SceneTransform};
