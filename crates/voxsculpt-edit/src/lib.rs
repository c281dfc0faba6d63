//! `voxsculpt-edit` – the mutable sculpting state.
//!
//! # Modules
//!
//! - [`voxel_grid`] – [`VoxelEditEngine`][voxel_grid::VoxelEditEngine]:
//!   committed grid plus in-progress sketch, axis-locked strokes, erase and
//!   hard reset.
//! - [`palette`] – [`Palette`][palette::Palette]: named colors and the
//!   active index the color-cycle gesture advances.
//! - [`scene`] – [`SceneTransformController`][scene::SceneTransformController]:
//!   two-hand rotation and one-hand grab applied to the voxel group.

pub mod palette;
pub mod scene;
pub mod voxel_grid;

pub use palette::{Palette, PaletteColor};
pub use scene::SceneTransformController;
pub use voxel_grid::{Voxel, VoxelEditEngine, VoxelMap};
