//! Hand detection library for gesture scrolling
//! Provides skin color-based hand localization restricted to a detection zone

pub mod color;
pub mod contour;
pub mod mask;
pub mod zone;

use handnav_shared::{DetectionZone, DetectorPreset, PixelPoint};
use image::RgbImage;

pub use color::{Hsv, Rgb, SkinColorRange};
pub use contour::{AreaBounds, AspectBounds, CandidateContour, Moments};
pub use zone::ZoneRect;

/// Blurred mask values above this count as foreground
pub const DEFAULT_FOREGROUND_THRESHOLD: u8 = 127;

/// Thresholds and gates used by [`HandDetector`]
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    pub zone: DetectionZone,
    pub skin: SkinColorRange,
    pub area: AreaBounds,
    /// `None` disables the aspect-ratio gate
    pub aspect: Option<AspectBounds>,
    pub foreground_threshold: u8,
}

impl DetectorConfig {
    pub fn preset(preset: DetectorPreset) -> Self {
        match preset {
            DetectorPreset::ZoneRestricted => Self {
                zone: DetectionZone::Bottom,
                skin: SkinColorRange::TIGHT,
                area: AreaBounds {
                    min: 8000.0,
                    max: Some(50000.0),
                },
                aspect: Some(AspectBounds::HAND),
                foreground_threshold: DEFAULT_FOREGROUND_THRESHOLD,
            },
            DetectorPreset::Unrestricted => Self {
                zone: DetectionZone::Full,
                skin: SkinColorRange::WIDE,
                area: AreaBounds {
                    min: 5000.0,
                    max: None,
                },
                aspect: None,
                foreground_threshold: DEFAULT_FOREGROUND_THRESHOLD,
            },
        }
    }

    pub fn with_zone(mut self, zone: DetectionZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_area(mut self, area: AreaBounds) -> Self {
        self.area = area;
        self
    }

    pub fn with_aspect(mut self, aspect: Option<AspectBounds>) -> Self {
        self.aspect = aspect;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::preset(DetectorPreset::default())
    }
}

/// Result of one detection pass
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Zone the search was restricted to
    pub zone: ZoneRect,
    /// Number of external contours found before filtering
    pub contours: usize,
    /// Centroid of the selected hand contour
    pub hand: Option<PixelPoint>,
}

/// Hand detector using skin color segmentation
#[derive(Debug, Clone, Default)]
pub struct HandDetector {
    config: DetectorConfig,
}

impl HandDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn set_zone(&mut self, zone: DetectionZone) {
        self.config.zone = zone;
    }

    /// Locate the hand in an RGB frame.
    ///
    /// Zone mask, skin threshold, cleanup, contour filtering and centroid, in that order.
    /// Stateless: the same frame always gives the same result.
    pub fn detect(&self, frame: &RgbImage) -> Detection {
        let (width, height) = frame.dimensions();
        let (zone_mask, zone) = zone::zone_mask(width, height, self.config.zone);

        let skin = mask::segment_skin(frame, &self.config.skin, &zone_mask);
        let cleaned = mask::clean_mask(&skin);

        let candidates = contour::external_contours(&cleaned, self.config.foreground_threshold);
        let hand = contour::select_hand(
            &candidates,
            &self.config.area,
            self.config.aspect.as_ref(),
        )
        .and_then(CandidateContour::centroid);

        Detection {
            zone,
            contours: candidates.len(),
            hand,
        }
    }
}
