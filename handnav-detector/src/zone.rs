//! Detection zone masks

use handnav_shared::DetectionZone;
use image::{GrayImage, Luma};

/// Axis-aligned zone rectangle, half-open: `[x0, x1) x [y0, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl ZoneRect {
    /// Rectangle covering the part of a `width` x `height` frame selected by `zone`
    pub fn for_frame(width: u32, height: u32, zone: DetectionZone) -> Self {
        match zone {
            DetectionZone::Bottom => Self {
                x0: 0,
                y0: height / 2,
                x1: width,
                y1: height,
            },
            DetectionZone::Left => Self {
                x0: 0,
                y0: 0,
                x1: width / 3,
                y1: height,
            },
            DetectionZone::Right => Self {
                x0: 2 * width / 3,
                y0: 0,
                x1: width,
                y1: height,
            },
            DetectionZone::Full => Self {
                x0: 0,
                y0: 0,
                x1: width,
                y1: height,
            },
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Builds the binary zone mask (255 inside the zone) together with its rectangle
pub fn zone_mask(width: u32, height: u32, zone: DetectionZone) -> (GrayImage, ZoneRect) {
    let rect = ZoneRect::for_frame(width, height, zone);
    let mask = GrayImage::from_fn(width, height, |x, y| {
        if rect.contains(x, y) {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    (mask, rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_zone() {
        let (mask, rect) = zone_mask(640, 480, DetectionZone::Bottom);
        assert_eq!(rect, ZoneRect { x0: 0, y0: 240, x1: 640, y1: 480 });
        assert_eq!(mask.get_pixel(10, 239)[0], 0);
        assert_eq!(mask.get_pixel(10, 240)[0], 255);
    }

    #[test]
    fn test_side_zones_truncate() {
        assert_eq!(
            ZoneRect::for_frame(100, 50, DetectionZone::Left),
            ZoneRect { x0: 0, y0: 0, x1: 33, y1: 50 }
        );
        assert_eq!(
            ZoneRect::for_frame(100, 50, DetectionZone::Right),
            ZoneRect { x0: 66, y0: 0, x1: 100, y1: 50 }
        );
    }

    #[test]
    fn test_rect_bounds_mask_for_all_zones() {
        for &(w, h) in &[(1, 1), (2, 3), (7, 5), (64, 48), (101, 99), (320, 240)] {
            for zone in DetectionZone::ALL {
                let (mask, rect) = zone_mask(w, h, zone);
                let mut count = 0u64;
                for (x, y, p) in mask.enumerate_pixels() {
                    let inside = p[0] == 255;
                    assert_eq!(inside, rect.contains(x, y), "{:?} {}x{} at ({}, {})", zone, w, h, x, y);
                    if inside {
                        count += 1;
                    }
                }
                assert_eq!(count, rect.area(), "{:?} {}x{}", zone, w, h);
            }
        }
    }

    #[test]
    fn test_zone_mask_is_deterministic() {
        let (a, ra) = zone_mask(97, 61, DetectionZone::Right);
        let (b, rb) = zone_mask(97, 61, DetectionZone::Right);
        assert_eq!(a.as_raw(), b.as_raw());
        assert_eq!(ra, rb);
    }
}
