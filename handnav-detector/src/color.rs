//! Color space conversion and skin-tone ranges

/// HSV color value on the 8-bit scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8, // 0-179 (degrees / 2)
    pub s: u8, // 0-255
    pub v: u8, // 0-255
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// RGB color value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert RGB to 8-bit HSV
    pub fn to_hsv(&self) -> Hsv {
        let r = self.r as f32;
        let g = self.g as f32;
        let b = self.b as f32;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        // Hue in degrees
        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta) + 120.0
        } else {
            60.0 * ((r - g) / delta) + 240.0
        };
        let h = if h < 0.0 { h + 360.0 } else { h };
        let h = (h / 2.0).round() as u32 % 180;

        let s = if max == 0.0 {
            0.0
        } else {
            delta * 255.0 / max
        };

        Hsv {
            h: h as u8,
            s: s.round() as u8,
            v: max as u8,
        }
    }
}

/// Inclusive lower/upper HSV bounds for skin-colored pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinColorRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl SkinColorRange {
    /// Narrow range that rejects brown backgrounds
    pub const TIGHT: SkinColorRange = SkinColorRange {
        lower: Hsv::new(0, 30, 60),
        upper: Hsv::new(20, 150, 255),
    };

    /// Wide range covering most skin tones at any saturation
    pub const WIDE: SkinColorRange = SkinColorRange {
        lower: Hsv::new(0, 20, 70),
        upper: Hsv::new(20, 255, 255),
    };

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&hsv.h)
            && (self.lower.s..=self.upper.s).contains(&hsv.s)
            && (self.lower.v..=self.upper.v).contains(&hsv.v)
    }

    /// Check if this color is likely skin tone
    pub fn matches(&self, rgb: Rgb) -> bool {
        self.contains(rgb.to_hsv())
    }
}
