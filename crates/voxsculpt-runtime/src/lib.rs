//! `voxsculpt-runtime` – wires perception, kernel and edit into one
//! per-frame pipeline.
//!
//! # Modules
//!
//! - [`session`] – [`InteractionSession`][session::InteractionSession]: owns
//!   all interaction state and processes one tracker callback at a time.
//! - [`snapshot`] – [`RenderSnapshot`][snapshot::RenderSnapshot]: what the
//!   renderer and HUD read after each frame.
//! - [`config`] – [`SculptConfig`][config::SculptConfig]: TOML-backed
//!   tunables with `VOXSCULPT_*` overrides.
//! - [`telemetry`] – `tracing` subscriber setup.

pub mod config;
pub mod session;
pub mod snapshot;
pub mod telemetry;

pub use config::SculptConfig;
pub use session::InteractionSession;
pub use snapshot::{Cursor, ProgressIndicator, RenderSnapshot, ScreenPoint};
