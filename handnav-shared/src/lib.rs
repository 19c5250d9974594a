use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pixel coordinate in frame space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Vertical position as a fraction of the frame height
    pub fn normalized_y(&self, frame_height: u32) -> f64 {
        if frame_height == 0 {
            return 0.0;
        }
        self.y as f64 / frame_height as f64
    }
}

/// Sub-region of the camera frame where hand detection is permitted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DetectionZone {
    /// Bottom half of the frame (keeps the face out of the zone)
    #[default]
    Bottom,
    /// Left third
    Left,
    /// Right third
    Right,
    /// Whole frame
    Full,
}

impl DetectionZone {
    pub const ALL: [DetectionZone; 4] = [Self::Bottom, Self::Left, Self::Right, Self::Full];

    /// The zone that follows this one when the operator cycles through them
    pub fn next(self) -> Self {
        match self {
            Self::Bottom => Self::Left,
            Self::Left => Self::Right,
            Self::Right => Self::Full,
            Self::Full => Self::Bottom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DetectionZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|zone| zone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown detection zone '{}' (bottom, left, right, full)", s))
    }
}

/// Operator-selected scroll sensitivity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    pub const ALL: [Sensitivity; 3] = [Self::Low, Self::Medium, Self::High];

    /// Multiplier applied to the normalized displacement
    pub fn factor(&self) -> u32 {
        match self {
            Self::Low => 10,
            Self::Medium => 20,
            Self::High => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.factor())
    }
}

impl FromStr for Sensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sensitivity '{}' (low, medium, high)", s))
    }
}

/// Named detector threshold sets
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DetectorPreset {
    /// Tight skin range, bounded area, aspect-ratio gate
    #[default]
    ZoneRestricted,
    /// Wide skin range, lower area bound only, no aspect gate
    Unrestricted,
}

impl DetectorPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZoneRestricted => "zone-restricted",
            Self::Unrestricted => "unrestricted",
        }
    }
}

impl fmt::Display for DetectorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectorPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::ZoneRestricted, Self::Unrestricted]
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset '{}' (zone-restricted, unrestricted)", s))
    }
}

/// Hand tracking configuration, as read from a settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerSettings {
    pub camera: i32,
    pub zone: DetectionZone,
    pub sensitivity: Sensitivity,
    pub preset: DetectorPreset,
}

/// Screen brightness (percent) and warmth (percent) pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToneSettings {
    pub brightness: u8,
    pub warmth: u8,
}

impl ToneSettings {
    pub const MIN_BRIGHTNESS: u8 = 10;
    pub const MAX_BRIGHTNESS: u8 = 100;
    pub const MAX_WARMTH: u8 = 100;

    /// Builds a setting with both values clamped to their valid ranges
    pub fn clamped(brightness: u8, warmth: u8) -> Self {
        Self {
            brightness: brightness.clamp(Self::MIN_BRIGHTNESS, Self::MAX_BRIGHTNESS),
            warmth: warmth.min(Self::MAX_WARMTH),
        }
    }
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            brightness: Self::MAX_BRIGHTNESS,
            warmth: 0,
        }
    }
}

/// Quick presets offered by the tone panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TonePreset {
    Day,
    Evening,
    Night,
}

impl TonePreset {
    pub fn settings(&self) -> ToneSettings {
        match self {
            Self::Day => ToneSettings::clamped(100, 0),
            Self::Evening => ToneSettings::clamped(70, 50),
            Self::Night => ToneSettings::clamped(40, 80),
        }
    }
}

impl FromStr for TonePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            other => Err(format!("unknown tone preset '{}' (day, evening, night)", other)),
        }
    }
}
