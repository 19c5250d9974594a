//! External contours, hand-candidate filtering and centroids

use handnav_shared::PixelPoint;
use image::GrayImage;
use imageproc::contours::{find_contours_with_threshold, BorderType};
use imageproc::point::Point;

/// Open interval on contour area, in square pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBounds {
    pub min: f64,
    pub max: Option<f64>,
}

impl AreaBounds {
    pub fn accepts(&self, area: f64) -> bool {
        area > self.min && self.max.map_or(true, |max| area < max)
    }
}

/// Open interval on bounding-box height / width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectBounds {
    pub min: f64,
    pub max: f64,
}

impl AspectBounds {
    /// Hands are usually taller than wide
    pub const HAND: AspectBounds = AspectBounds { min: 0.8, max: 3.0 };

    pub fn accepts(&self, ratio: f64) -> bool {
        ratio > self.min && ratio < self.max
    }
}

/// Zeroth and first spatial moments of a closed polygon
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Green's theorem over the polygon edges; sign follows the winding
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        let Some(&last) = points.last() else {
            return Self::default();
        };

        let (mut a00, mut a10, mut a01) = (0.0, 0.0, 0.0);
        let (mut px, mut py) = (last.x as f64, last.y as f64);
        for p in points {
            let (x, y) = (p.x as f64, p.y as f64);
            let cross = px * y - x * py;
            a00 += cross;
            a10 += cross * (px + x);
            a01 += cross * (py + y);
            px = x;
            py = y;
        }

        Self {
            m00: a00 / 2.0,
            m10: a10 / 6.0,
            m01: a01 / 6.0,
        }
    }

    /// Center of mass rounded to the nearest pixel, `None` for zero area
    pub fn centroid(&self) -> Option<PixelPoint> {
        if self.m00 == 0.0 {
            return None;
        }
        let cx = (self.m10 / self.m00).round() as i32;
        let cy = (self.m01 / self.m00).round() as i32;
        Some(PixelPoint::new(cx, cy))
    }
}

/// One outer boundary with its derived shape attributes
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateContour {
    pub points: Vec<Point<i32>>,
    pub moments: Moments,
    pub width: u32,
    pub height: u32,
}

impl CandidateContour {
    pub fn from_points(points: Vec<Point<i32>>) -> Self {
        let moments = Moments::of_polygon(&points);
        let (width, height) = match bounds(&points) {
            Some((min_x, min_y, max_x, max_y)) => {
                ((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32)
            }
            None => (0, 0),
        };
        Self {
            points,
            moments,
            width,
            height,
        }
    }

    /// Enclosed area, independent of winding
    pub fn area(&self) -> f64 {
        self.moments.m00.abs()
    }

    /// Bounding-box height over width, 0 when the width is 0
    pub fn aspect_ratio(&self) -> f64 {
        if self.width == 0 {
            return 0.0;
        }
        self.height as f64 / self.width as f64
    }

    pub fn centroid(&self) -> Option<PixelPoint> {
        self.moments.centroid()
    }
}

fn bounds(points: &[Point<i32>]) -> Option<(i32, i32, i32, i32)> {
    let min_x = points.iter().map(|p| p.x).min()?;
    let max_x = points.iter().map(|p| p.x).max()?;
    let min_y = points.iter().map(|p| p.y).min()?;
    let max_y = points.iter().map(|p| p.y).max()?;
    Some((min_x, min_y, max_x, max_y))
}

/// Outer contours of regions brighter than `threshold`, in discovery (raster) order.
/// Holes and anything nested inside a hole are dropped.
///
/// The tracer misreports regions touching the image border, so the mask is
/// traced inside a one-pixel background frame and the points shifted back.
pub fn external_contours(mask: &GrayImage, threshold: u8) -> Vec<CandidateContour> {
    let (width, height) = mask.dimensions();
    let mut padded = GrayImage::new(width + 2, height + 2);
    image::imageops::replace(&mut padded, mask, 1, 1);

    find_contours_with_threshold::<i32>(&padded, threshold)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            CandidateContour::from_points(points)
        })
        .collect()
}

/// Picks the largest contour that passes the area (and, when given, aspect) filters.
///
/// Equal areas keep the first contour in discovery order.
pub fn select_hand<'a>(
    candidates: &'a [CandidateContour],
    area: &AreaBounds,
    aspect: Option<&AspectBounds>,
) -> Option<&'a CandidateContour> {
    let mut best: Option<&CandidateContour> = None;
    for contour in candidates {
        if !area.accepts(contour.area()) {
            continue;
        }
        if let Some(aspect) = aspect {
            if !aspect.accepts(contour.aspect_ratio()) {
                continue;
            }
        }
        if best.map_or(true, |b| contour.area() > b.area()) {
            best = Some(contour);
        }
    }
    best
}
