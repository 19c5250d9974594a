//! Camera-driven tracking loop.
//!
//! Two states: idle (no camera held) and tracking (camera held, one frame
//! processed per tick). Ticks run to completion on the caller's thread, so a
//! stop request only lands between ticks.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use handnav_detector::{Detection, HandDetector, ZoneRect};
use handnav_shared::{DetectionZone, PixelPoint, Sensitivity};
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::scroll::ScrollMapper;

/// Fixed period between ticks (~33 per second)
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

const ANNOTATION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const ZONE_LINE_WIDTH: u32 = 2;
const CENTROID_RADIUS: i32 = 15;

/// Opens the camera on demand
pub trait CameraSource {
    type Device: CameraDevice;

    fn acquire(&mut self) -> Result<Self::Device>;
}

/// An acquired, exclusively owned camera
pub trait CameraDevice {
    /// Next frame, or `None` when the camera had nothing this tick
    fn read(&mut self) -> Option<RgbImage>;

    fn release(&mut self) {}
}

/// Receives the annotated frame once per tick, with the zone it was detected in
pub trait PreviewSink {
    fn render(&mut self, frame: &RgbImage, zone: &ZoneRect, cue: TrackingCue);

    /// Called when tracking stops
    fn clear(&mut self) {}
}

/// Injects OS-level scroll events. Positive scrolls content up.
pub trait ScrollInjector {
    fn scroll(&mut self, amount: i32);
}

/// Status hint shown on the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingCue {
    HandDetected,
    ShowHand,
}

impl TrackingCue {
    pub fn text(&self) -> &'static str {
        match self {
            Self::HandDetected => "Hand Detected",
            Self::ShowHand => "Show hand in green zone",
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    FrameMissed,
    NoHand,
    Tracked {
        centroid: PixelPoint,
        command: Option<i32>,
    },
}

pub struct FrameLoop<S: CameraSource, P, I> {
    source: S,
    preview: P,
    injector: I,
    detector: HandDetector,
    mapper: ScrollMapper,
    device: Option<S::Device>,
}

impl<S, P, I> FrameLoop<S, P, I>
where
    S: CameraSource,
    P: PreviewSink,
    I: ScrollInjector,
{
    pub fn new(
        source: S,
        preview: P,
        injector: I,
        detector: HandDetector,
        sensitivity: Sensitivity,
    ) -> Self {
        Self {
            source,
            preview,
            injector,
            detector,
            mapper: ScrollMapper::new(sensitivity),
            device: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.device.is_some()
    }

    /// Acquire the camera and begin tracking. On failure the loop stays idle.
    pub fn start(&mut self) -> Result<()> {
        if self.is_tracking() {
            return Ok(());
        }

        let device = self
            .source
            .acquire()
            .context("Could not access camera")?;
        self.device = Some(device);
        self.mapper.reset();

        log::info!(
            "Hand tracking started (zone: {}, sensitivity: {})",
            self.zone(),
            self.sensitivity()
        );
        Ok(())
    }

    /// Release the camera and forget the scroll baseline
    pub fn stop(&mut self) {
        let Some(mut device) = self.device.take() else {
            return;
        };
        device.release();
        self.mapper.reset();
        self.preview.clear();
        log::info!("Hand tracking stopped");
    }

    pub fn zone(&self) -> DetectionZone {
        self.detector.config().zone
    }

    pub fn set_zone(&mut self, zone: DetectionZone) {
        self.detector.set_zone(zone);
        log::info!("Detection zone: {}", zone);
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.mapper.sensitivity()
    }

    pub fn set_sensitivity(&mut self, sensitivity: Sensitivity) {
        self.mapper.set_sensitivity(sensitivity);
        log::info!("Scroll sensitivity: {}", sensitivity);
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    /// Process one frame: detect, map to a scroll, annotate, render
    pub fn tick(&mut self) -> TickOutcome {
        let Some(device) = self.device.as_mut() else {
            return TickOutcome::Idle;
        };
        let Some(mut frame) = device.read() else {
            log::debug!("No frame this tick");
            return TickOutcome::FrameMissed;
        };

        // Mirror so moving the hand right moves it right on screen
        imageops::flip_horizontal_in_place(&mut frame);

        let detection = self.detector.detect(&frame);
        let normalized_y = detection.hand.map(|hand| hand.normalized_y(frame.height()));
        let command = self.mapper.update(normalized_y);
        if let Some(amount) = command {
            log::debug!("Scrolling: {}", amount);
            self.injector.scroll(amount);
        }

        annotate(&mut frame, &detection);
        let cue = if detection.hand.is_some() {
            TrackingCue::HandDetected
        } else {
            TrackingCue::ShowHand
        };
        self.preview.render(&frame, &detection.zone, cue);

        match detection.hand {
            Some(centroid) => TickOutcome::Tracked { centroid, command },
            None => TickOutcome::NoHand,
        }
    }

    /// Tick on a fixed timer until `keep_going` returns false.
    ///
    /// `keep_going` runs between ticks and is where start/stop and setting
    /// changes are applied.
    pub fn run_until<F>(&mut self, mut keep_going: F)
    where
        F: FnMut(&mut Self) -> bool,
    {
        loop {
            let started = Instant::now();
            self.tick();
            if !keep_going(self) {
                break;
            }
            if let Some(rest) = TICK_INTERVAL.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }
}

/// Draws the zone outline and, when found, a dot on the hand
pub fn annotate(frame: &mut RgbImage, detection: &Detection) {
    draw_zone(frame, &detection.zone);
    if let Some(hand) = detection.hand {
        draw_filled_circle_mut(frame, (hand.x, hand.y), CENTROID_RADIUS, ANNOTATION_COLOR);
    }
}

fn draw_zone(frame: &mut RgbImage, zone: &ZoneRect) {
    for inset in 0..ZONE_LINE_WIDTH {
        let width = zone.width().saturating_sub(2 * inset);
        let height = zone.height().saturating_sub(2 * inset);
        if width == 0 || height == 0 {
            break;
        }
        let rect = Rect::at((zone.x0 + inset) as i32, (zone.y0 + inset) as i32).of_size(width, height);
        draw_hollow_rect_mut(frame, rect, ANNOTATION_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_draws_zone_outline() {
        let mut frame = RgbImage::new(60, 40);
        let detection = Detection {
            zone: ZoneRect::for_frame(60, 40, DetectionZone::Bottom),
            contours: 0,
            hand: None,
        };
        annotate(&mut frame, &detection);
        assert_eq!(*frame.get_pixel(0, 20), ANNOTATION_COLOR);
        assert_eq!(*frame.get_pixel(1, 21), ANNOTATION_COLOR);
        assert_eq!(*frame.get_pixel(59, 39), ANNOTATION_COLOR);
        assert_eq!(*frame.get_pixel(30, 30), Rgb([0, 0, 0]));
        assert_eq!(*frame.get_pixel(30, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_annotate_marks_hand() {
        let mut frame = RgbImage::new(100, 100);
        let detection = Detection {
            zone: ZoneRect::for_frame(100, 100, DetectionZone::Full),
            contours: 1,
            hand: Some(PixelPoint::new(50, 60)),
        };
        annotate(&mut frame, &detection);
        assert_eq!(*frame.get_pixel(50, 60), ANNOTATION_COLOR);
        assert_eq!(*frame.get_pixel(60, 60), ANNOTATION_COLOR);
        assert_eq!(*frame.get_pixel(50, 80), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_annotate_tolerates_empty_zone() {
        let mut frame = RgbImage::new(2, 2);
        let detection = Detection {
            zone: ZoneRect::for_frame(2, 2, DetectionZone::Left),
            contours: 0,
            hand: None,
        };
        annotate(&mut frame, &detection);
        assert!(frame.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
