//! Tunables – reads/writes `~/.voxsculpt/config.toml`.
//!
//! Every field has a serde default, so a missing file or a partial file
//! both work.  `VOXSCULPT_*` environment variables are applied on top of
//! whatever was loaded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxsculpt_edit::palette::{PaletteColor, default_colors};
use voxsculpt_edit::scene::{DEFAULT_ROTATE_BIAS, DEFAULT_ROTATE_GAIN};
use voxsculpt_edit::voxel_grid::DEFAULT_AXIS_LOCK_DEAD_ZONE;
use voxsculpt_kernel::clock::{ClockMode, DEFAULT_FRAME_TICK_MS, DEFAULT_MAX_FRAME_GAP_MS};
use voxsculpt_kernel::hold_timer::HoldDurations;
use voxsculpt_perception::gestures::{DEFAULT_PINCH_THRESHOLD, PinchDetector};
use voxsculpt_perception::mapper::{
    CoordinateMapper, DEFAULT_GRID_PITCH, DEFAULT_WORLD_DEPTH, DEFAULT_WORLD_HEIGHT,
    DEFAULT_WORLD_WIDTH,
};
use voxsculpt_perception::smoother::{DEFAULT_DEPTH_BLEND, DEFAULT_LATERAL_BLEND};
use voxsculpt_types::SculptError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SculptConfig {
    // ── smoothing ───────────────────────────────────────────────────────────
    /// EMA blend for landmark `x`/`y`.
    #[serde(default = "default_lateral_blend")]
    pub lateral_blend: f32,
    /// EMA blend for landmark `z`.
    #[serde(default = "default_depth_blend")]
    pub depth_blend: f32,

    // ── classifiers ─────────────────────────────────────────────────────────
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold: f32,
    /// Include relative depth in the pinch distance.  Off by default: the
    /// tracker's `z` is too noisy between thumb and index tips.
    #[serde(default)]
    pub pinch_uses_depth: bool,

    // ── timers ──────────────────────────────────────────────────────────────
    #[serde(default = "default_frame_tick_ms")]
    pub frame_tick_ms: f32,
    #[serde(default)]
    pub clock: ClockMode,
    /// Timestamp clock only: longer gaps count as one `frame_tick_ms`.
    #[serde(default = "default_max_frame_gap_ms")]
    pub max_frame_gap_ms: f32,
    #[serde(default = "default_grab_hold_ms")]
    pub grab_hold_ms: f32,
    /// Build and erase lock-in.
    #[serde(default = "default_intent_hold_ms")]
    pub intent_hold_ms: f32,
    #[serde(default = "default_rotate_hold_ms")]
    pub rotate_hold_ms: f32,
    #[serde(default = "default_reset_hold_ms")]
    pub reset_hold_ms: f32,
    #[serde(default = "default_cycle_hold_ms")]
    pub cycle_hold_ms: f32,

    // ── mapping ─────────────────────────────────────────────────────────────
    #[serde(default = "default_world_width")]
    pub world_width: f32,
    #[serde(default = "default_world_height")]
    pub world_height: f32,
    #[serde(default = "default_world_depth")]
    pub world_depth: f32,
    #[serde(default = "default_grid_pitch")]
    pub grid_pitch: f32,

    // ── editing / transform ─────────────────────────────────────────────────
    #[serde(default = "default_axis_lock_dead_zone")]
    pub axis_lock_dead_zone: f32,
    #[serde(default = "default_rotate_gain")]
    pub rotate_gain: f32,
    #[serde(default = "default_rotate_bias")]
    pub rotate_bias: f32,

    #[serde(default = "default_colors")]
    pub palette: Vec<PaletteColor>,
}

fn default_lateral_blend() -> f32 {
    DEFAULT_LATERAL_BLEND
}
fn default_depth_blend() -> f32 {
    DEFAULT_DEPTH_BLEND
}
fn default_pinch_threshold() -> f32 {
    DEFAULT_PINCH_THRESHOLD
}
fn default_frame_tick_ms() -> f32 {
    DEFAULT_FRAME_TICK_MS
}
fn default_max_frame_gap_ms() -> f32 {
    DEFAULT_MAX_FRAME_GAP_MS
}
fn default_grab_hold_ms() -> f32 {
    HoldDurations::default().grab_ms
}
fn default_intent_hold_ms() -> f32 {
    HoldDurations::default().intent_ms
}
fn default_rotate_hold_ms() -> f32 {
    HoldDurations::default().rotate_ms
}
fn default_reset_hold_ms() -> f32 {
    HoldDurations::default().reset_ms
}
fn default_cycle_hold_ms() -> f32 {
    HoldDurations::default().cycle_ms
}
fn default_world_width() -> f32 {
    DEFAULT_WORLD_WIDTH
}
fn default_world_height() -> f32 {
    DEFAULT_WORLD_HEIGHT
}
fn default_world_depth() -> f32 {
    DEFAULT_WORLD_DEPTH
}
fn default_grid_pitch() -> f32 {
    DEFAULT_GRID_PITCH
}
fn default_axis_lock_dead_zone() -> f32 {
    DEFAULT_AXIS_LOCK_DEAD_ZONE
}
fn default_rotate_gain() -> f32 {
    DEFAULT_ROTATE_GAIN
}
fn default_rotate_bias() -> f32 {
    DEFAULT_ROTATE_BIAS
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            lateral_blend: default_lateral_blend(),
            depth_blend: default_depth_blend(),
            pinch_threshold: default_pinch_threshold(),
            pinch_uses_depth: false,
            frame_tick_ms: default_frame_tick_ms(),
            clock: ClockMode::default(),
            max_frame_gap_ms: default_max_frame_gap_ms(),
            grab_hold_ms: default_grab_hold_ms(),
            intent_hold_ms: default_intent_hold_ms(),
            rotate_hold_ms: default_rotate_hold_ms(),
            reset_hold_ms: default_reset_hold_ms(),
            cycle_hold_ms: default_cycle_hold_ms(),
            world_width: default_world_width(),
            world_height: default_world_height(),
            world_depth: default_world_depth(),
            grid_pitch: default_grid_pitch(),
            axis_lock_dead_zone: default_axis_lock_dead_zone(),
            rotate_gain: default_rotate_gain(),
            rotate_bias: default_rotate_bias(),
            palette: default_colors(),
        }
    }
}

impl SculptConfig {
    pub fn hold_durations(&self) -> HoldDurations {
        HoldDurations {
            grab_ms: self.grab_hold_ms,
            intent_ms: self.intent_hold_ms,
            rotate_ms: self.rotate_hold_ms,
            reset_ms: self.reset_hold_ms,
            cycle_ms: self.cycle_hold_ms,
        }
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(
            self.world_width,
            self.world_height,
            self.world_depth,
            self.grid_pitch,
        )
    }

    pub fn pinch_detector(&self) -> PinchDetector {
        PinchDetector::new(self.pinch_threshold, self.pinch_uses_depth)
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// [`SculptError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SculptError> {
        let positive = [
            ("frame_tick_ms", self.frame_tick_ms),
            ("max_frame_gap_ms", self.max_frame_gap_ms),
            ("grab_hold_ms", self.grab_hold_ms),
            ("intent_hold_ms", self.intent_hold_ms),
            ("rotate_hold_ms", self.rotate_hold_ms),
            ("reset_hold_ms", self.reset_hold_ms),
            ("cycle_hold_ms", self.cycle_hold_ms),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("world_depth", self.world_depth),
            ("grid_pitch", self.grid_pitch),
            ("pinch_threshold", self.pinch_threshold),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SculptError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("lateral_blend", self.lateral_blend),
            ("depth_blend", self.depth_blend),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SculptError::Config(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        if !(self.axis_lock_dead_zone >= 0.0 && self.axis_lock_dead_zone.is_finite()) {
            return Err(SculptError::Config(format!(
                "axis_lock_dead_zone must be finite and not negative, got {}",
                self.axis_lock_dead_zone
            )));
        }
        for (name, value) in [
            ("rotate_gain", self.rotate_gain),
            ("rotate_bias", self.rotate_bias),
        ] {
            if !value.is_finite() {
                return Err(SculptError::Config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.palette.is_empty() {
            return Err(SculptError::Config("palette must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Return the path to `~/.voxsculpt/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".voxsculpt").join("config.toml")
}

/// Load the config from the default path, falling back to defaults.
pub fn load() -> Result<SculptConfig, SculptError> {
    load_from(&config_path())
}

/// Load, apply env overrides, validate.  A missing file yields defaults.
pub fn load_from(path: &Path) -> Result<SculptConfig, SculptError> {
    let mut cfg = if path.exists() {
        let raw = fs::read_to_string(path).map_err(|e| {
            SculptError::Io(format!("Failed to read config at {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| SculptError::Config(format!("Failed to parse config: {e}")))?
    } else {
        SculptConfig::default()
    };
    apply_env_overrides(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

/// Apply `VOXSCULPT_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `VOXSCULPT_FRAME_TICK_MS` | `frame_tick_ms` |
/// | `VOXSCULPT_CLOCK` | `clock` (`frame` / `timestamp`) |
/// | `VOXSCULPT_GRID_PITCH` | `grid_pitch` |
/// | `VOXSCULPT_PINCH_THRESHOLD` | `pinch_threshold` |
///
/// Unparsable values are ignored.
pub fn apply_env_overrides(cfg: &mut SculptConfig) {
    if let Ok(v) = std::env::var("VOXSCULPT_FRAME_TICK_MS")
        && let Ok(ms) = v.parse::<f32>()
    {
        cfg.frame_tick_ms = ms;
    }
    if let Ok(v) = std::env::var("VOXSCULPT_CLOCK")
        && let Ok(mode) = v.parse::<ClockMode>()
    {
        cfg.clock = mode;
    }
    if let Ok(v) = std::env::var("VOXSCULPT_GRID_PITCH")
        && let Ok(pitch) = v.parse::<f32>()
    {
        cfg.grid_pitch = pitch;
    }
    if let Ok(v) = std::env::var("VOXSCULPT_PINCH_THRESHOLD")
        && let Ok(t) = v.parse::<f32>()
    {
        cfg.pinch_threshold = t;
    }
}

/// Save the config to the default path.
pub fn save(cfg: &SculptConfig) -> Result<(), SculptError> {
    save_to(cfg, &config_path())
}

/// Save the config, creating the parent directory if necessary.
pub fn save_to(cfg: &SculptConfig, path: &Path) -> Result<(), SculptError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| SculptError::Io(format!("Failed to create config directory: {e}")))?;
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| SculptError::Config(format!("Failed to serialize config: {e}")))?;
    fs::write(path, raw).map_err(|e| {
        SculptError::Io(format!("Failed to write config at {}: {e}", path.display()))
    })
}
