//! Skin segmentation and mask cleanup

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};

use crate::color::{Rgb, SkinColorRange};

/// Radius of the square structuring element (5x5)
const MORPH_RADIUS: u8 = 2;
const ERODE_ITERATIONS: usize = 1;
const DILATE_ITERATIONS: usize = 2;

/// 5-tap binomial kernel, sums to 256
const BLUR_KERNEL: [u32; 5] = [16, 64, 96, 64, 16];

/// Marks skin-colored pixels that also lie inside `zone` with 255.
///
/// `zone` must have the same dimensions as `frame`.
pub fn segment_skin(frame: &RgbImage, range: &SkinColorRange, zone: &GrayImage) -> GrayImage {
    debug_assert_eq!(frame.dimensions(), zone.dimensions());

    let mut mask = GrayImage::new(frame.width(), frame.height());
    for ((out, px), allowed) in mask.pixels_mut().zip(frame.pixels()).zip(zone.pixels()) {
        let rgb = Rgb::new(px[0], px[1], px[2]);
        if allowed[0] != 0 && range.matches(rgb) {
            *out = Luma([255]);
        }
    }
    mask
}

/// Erode once, dilate twice, then blur.
///
/// The result is a graded mask: interiors stay at 255, edges fall off over a
/// couple of pixels and isolated specks are gone.
pub fn clean_mask(mask: &GrayImage) -> GrayImage {
    let mut cleaned = mask.clone();
    for _ in 0..ERODE_ITERATIONS {
        cleaned = erode(&cleaned, Norm::LInf, MORPH_RADIUS);
    }
    for _ in 0..DILATE_ITERATIONS {
        cleaned = dilate(&cleaned, Norm::LInf, MORPH_RADIUS);
    }
    blur_5x5(&cleaned)
}

/// Separable 5x5 binomial blur with replicated borders.
///
/// Written out by hand rather than with `imageproc::filter::separable_filter_equal`:
/// that rounds the horizontal pass to u8, while this keeps it at full
/// precision so edge values match the reference 5x5 Gaussian exactly.
pub fn blur_5x5(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }
    let w = width as i64;
    let h = height as i64;
    let src = image.as_raw();

    // Horizontal pass, kept at full precision (x256)
    let mut horizontal = vec![0u32; src.len()];
    for y in 0..h {
        let row = (y * w) as usize;
        for x in 0..w {
            let mut acc = 0u32;
            for (k, weight) in BLUR_KERNEL.iter().enumerate() {
                let sx = (x + k as i64 - 2).clamp(0, w - 1) as usize;
                acc += weight * src[row + sx] as u32;
            }
            horizontal[row + x as usize] = acc;
        }
    }

    // Vertical pass, then scale back down (x65536) with rounding
    let mut out = GrayImage::new(width, height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (k, weight) in BLUR_KERNEL.iter().enumerate() {
                let sy = (y + k as i64 - 2).clamp(0, h - 1);
                acc += weight * horizontal[(sy * w + x) as usize];
            }
            let value = (acc + (1 << 15)) >> 16;
            out.put_pixel(x as u32, y as u32, Luma([value.min(255) as u8]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::zone_mask;
    use handnav_shared::DetectionZone;
    use image::Rgb as RgbPixel;

    const SKIN: RgbPixel<u8> = RgbPixel([200, 150, 120]);
    const BACKGROUND: RgbPixel<u8> = RgbPixel([50, 50, 200]);

    fn skin_frame(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, SKIN)
    }

    #[test]
    fn test_segment_respects_zone() {
        let frame = skin_frame(60, 40);
        for zone in DetectionZone::ALL {
            let (zmask, rect) = zone_mask(60, 40, zone);
            let skin = segment_skin(&frame, &SkinColorRange::TIGHT, &zmask);
            for (x, y, p) in skin.enumerate_pixels() {
                if p[0] != 0 {
                    assert!(rect.contains(x, y), "{:?}: ({}, {}) outside zone", zone, x, y);
                }
            }
            // The whole frame is skin, so the zone is filled exactly
            let on = skin.pixels().filter(|p| p[0] == 255).count() as u64;
            assert_eq!(on, rect.area());
        }
    }

    #[test]
    fn test_segment_rejects_background() {
        let frame = RgbImage::from_pixel(20, 20, BACKGROUND);
        let (zmask, _) = zone_mask(20, 20, DetectionZone::Full);
        let skin = segment_skin(&frame, &SkinColorRange::WIDE, &zmask);
        assert!(skin.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_segment_is_deterministic() {
        let mut frame = RgbImage::from_pixel(32, 32, BACKGROUND);
        for y in 10..30 {
            for x in 5..25 {
                frame.put_pixel(x, y, SKIN);
            }
        }
        let (zmask, _) = zone_mask(32, 32, DetectionZone::Bottom);
        let a = segment_skin(&frame, &SkinColorRange::TIGHT, &zmask);
        let b = segment_skin(&frame, &SkinColorRange::TIGHT, &zmask);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_clean_removes_speckle() {
        let mut mask = GrayImage::new(40, 40);
        mask.put_pixel(10, 10, Luma([255]));
        mask.put_pixel(30, 12, Luma([255]));
        mask.put_pixel(31, 12, Luma([255]));
        let cleaned = clean_mask(&mask);
        assert!(cleaned.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_clean_grows_solid_block() {
        let mut mask = GrayImage::new(60, 60);
        for y in 20..40 {
            for x in 20..40 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        let cleaned = clean_mask(&mask);
        // Interior stays saturated
        assert_eq!(cleaned.get_pixel(30, 30)[0], 255);
        // Net growth of two pixels per side survives the blur threshold
        assert!(cleaned.get_pixel(18, 30)[0] > 127);
        assert!(cleaned.get_pixel(41, 30)[0] > 127);
        assert!(cleaned.get_pixel(17, 30)[0] < 127);
        // Far away stays empty
        assert_eq!(cleaned.get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn test_blur_keeps_flat_image() {
        let flat = GrayImage::from_pixel(9, 7, Luma([200]));
        assert_eq!(blur_5x5(&flat).as_raw(), flat.as_raw());
    }

    #[test]
    fn test_blur_step_edge() {
        let mut img = GrayImage::new(10, 1);
        for x in 5..10 {
            img.put_pixel(x, 0, Luma([255]));
        }
        let out = blur_5x5(&img);
        // 1/16 and 5/16 below the step, 11/16 and 15/16 above it
        assert_eq!(out.get_pixel(3, 0)[0], 16);
        assert_eq!(out.get_pixel(4, 0)[0], 80);
        assert_eq!(out.get_pixel(5, 0)[0], 175);
        assert_eq!(out.get_pixel(6, 0)[0], 239);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(9, 0)[0], 255);
    }
}
