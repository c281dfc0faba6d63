use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of landmarks the hand tracker reports per hand.
pub const LANDMARK_COUNT: usize = 21;

// ────────────────────────────────────────────────────────────────────────────
// Tracker input
// ────────────────────────────────────────────────────────────────────────────

/// One tracked point on a hand in normalized image coordinates.
///
/// `x`/`y` lie in `[0, 1]` with the origin at the top-left of the (mirrored)
/// image, so `y` grows downward.  `z` is a relative depth estimate with no
/// fixed unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Which hand the tracker believes a landmark set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandLabel {
    Left,
    Right,
}

impl fmt::Display for HandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandLabel::Left => write!(f, "left"),
            HandLabel::Right => write!(f, "right"),
        }
    }
}

/// One hand's worth of raw tracker output for a single callback.
///
/// The landmark list is left unvalidated here: the tracker may hand over a
/// degenerate set, which the pipeline treats as an absent hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    pub label: HandLabel,
    pub landmarks: Vec<Landmark>,
}

/// Everything delivered by a single tracker callback.
///
/// `hands == None` means the tracker reported no hand list at all, which is
/// handled exactly like an empty list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerFrame {
    pub hands: Option<Vec<HandFrame>>,
    /// Capture time in milliseconds, used only by the timestamp clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<f64>,
}

impl TrackerFrame {
    /// A frame in which no hands are visible.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hands(hands: Vec<HandFrame>) -> Self {
        Self {
            hands: Some(hands),
            timestamp_ms: None,
        }
    }

    /// Number of hand entries delivered, valid or not.
    pub fn hand_count(&self) -> usize {
        self.hands.as_ref().map_or(0, Vec::len)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// A 3-D vector in world or grid-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    pub fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// One of the three grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axes in tie-break priority order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

// ────────────────────────────────────────────────────────────────────────────
// VoxelKey
// ────────────────────────────────────────────────────────────────────────────

/// A quantized grid coordinate.
///
/// Each axis is stored in tenths of a world unit, so any floating-point
/// jitter below `0.05` collapses onto the same key.  The canonical string
/// form prints one decimal place per axis: `"1.2,0.0,-2.4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelKey {
    x: i32,
    y: i32,
    z: i32,
}

impl VoxelKey {
    /// Build a key from a position that has already been snapped to the grid.
    pub fn from_position(p: Vec3) -> Self {
        Self {
            x: to_tenths(p.x),
            y: to_tenths(p.y),
            z: to_tenths(p.z),
        }
    }

    /// The position this key stands for.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.x as f32 / 10.0,
            self.y as f32 / 10.0,
            self.z as f32 / 10.0,
        )
    }

    /// Raw tenths-of-a-unit value along `axis`.
    pub fn tenths(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy of `self` with `axis` replaced by `other`'s value on that axis.
    pub fn with_axis_from(self, axis: Axis, other: VoxelKey) -> Self {
        let mut out = self;
        match axis {
            Axis::X => out.x = other.x,
            Axis::Y => out.y = other.y,
            Axis::Z => out.z = other.z,
        }
        out
    }
}

fn to_tenths(v: f32) -> i32 {
    (v * 10.0).round() as i32
}

fn fmt_tenths(t: i32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if t < 0 { "-" } else { "" };
    let abs = t.unsigned_abs();
    write!(f, "{sign}{}.{}", abs / 10, abs % 10)
}

impl fmt::Display for VoxelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tenths(self.x, f)?;
        f.write_str(",")?;
        fmt_tenths(self.y, f)?;
        f.write_str(",")?;
        fmt_tenths(self.z, f)
    }
}

impl FromStr for VoxelKey {
    type Err = SculptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(SculptError::InvalidVoxelKey(s.to_string()));
        }
        let mut values = [0.0f32; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse::<f32>()
                .map_err(|_| SculptError::InvalidVoxelKey(s.to_string()))?;
        }
        Ok(Self::from_position(Vec3::new(values[0], values[1], values[2])))
    }
}

impl Serialize for VoxelKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VoxelKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Intents
// ────────────────────────────────────────────────────────────────────────────

/// The hold-confirmed gestures the interaction layer recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    Grab,
    Build,
    Erase,
    Rotate,
    Reset,
    Cycle,
}

impl Gesture {
    pub const ALL: [Gesture; 6] = [
        Gesture::Grab,
        Gesture::Build,
        Gesture::Erase,
        Gesture::Rotate,
        Gesture::Reset,
        Gesture::Cycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Build => "build",
            Self::Erase => "erase",
            Self::Rotate => "rotate",
            Self::Reset => "reset",
            Self::Cycle => "cycle",
        }
    }
}

/// The single current-intent label exposed to the renderer and HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Idle,
    Grabbing,
    BuildSyncing,
    Building,
    EraseLocking,
    Erasing,
    RotateEnabling,
    Rotating,
    ResetHolding,
    ResetComplete,
    CyclingColor,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Grabbing => "Grabbing",
            Self::BuildSyncing => "BuildSyncing",
            Self::Building => "Building",
            Self::EraseLocking => "EraseLocking",
            Self::Erasing => "Erasing",
            Self::RotateEnabling => "RotateEnabling",
            Self::Rotating => "Rotating",
            Self::ResetHolding => "ResetHolding",
            Self::ResetComplete => "ResetComplete",
            Self::CyclingColor => "CyclingColor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Error type for the edges of the sculpting core: malformed tracker input,
/// unparsable keys, configuration and capture files.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SculptError {
    #[error("Degenerate {label} hand: expected 21 landmarks, got {count}")]
    DegenerateHand { label: HandLabel, count: usize },

    #[error("Invalid voxel key: {0:?}")]
    InvalidVoxelKey(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Capture Error on line {line}: {message}")]
    Capture { line: usize, message: String },

    #[error("I/O Error: {0}")]
    Io(String),
}
