use anyhow::Result;
use handnav_core::{PreviewSink, TrackingCue};
use handnav_detector::ZoneRect;
use image::RgbImage;
use opencv::{
    core::{Mat, Point, Scalar, CV_8UC3},
    highgui, imgproc,
    prelude::*,
};

use crate::camera::rgb_image_to_bgr;

pub const WINDOW_NAME: &str = "Hand Navigation";

/// Where annotated frames go
pub enum Preview {
    Window(HighGuiPreview),
    /// No window; frames are dropped
    Headless,
}

impl Preview {
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Window(window) => window.is_closed(),
            Self::Headless => false,
        }
    }
}

impl PreviewSink for Preview {
    fn render(&mut self, frame: &RgbImage, zone: &ZoneRect, cue: TrackingCue) {
        if let Self::Window(window) = self {
            window.render(frame, zone, cue);
        }
    }

    fn clear(&mut self) {
        if let Self::Window(window) = self {
            window.clear();
        }
    }
}

/// Baseline of the zone label, just inside the zone's top-left corner
fn zone_label_origin(zone: &ZoneRect) -> Point {
    Point::new(zone.x0 as i32 + 10, zone.y0 as i32 + 30)
}

/// OpenCV HighGUI window showing the camera with its overlays
pub struct HighGuiPreview {
    name: String,
}

impl HighGuiPreview {
    pub fn open(name: &str) -> Result<Self> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        let mut preview = Self {
            name: name.to_string(),
        };
        preview.show_placeholder()?;
        Ok(preview)
    }

    /// True once the operator has closed the window
    pub fn is_closed(&self) -> bool {
        match highgui::get_window_property(&self.name, highgui::WND_PROP_VISIBLE) {
            Ok(visible) => visible < 1.0,
            Err(_) => true,
        }
    }

    fn show(&mut self, frame: &RgbImage, zone: &ZoneRect, cue: TrackingCue) -> Result<()> {
        let mut display_frame = rgb_image_to_bgr(frame)?;

        imgproc::put_text(
            &mut display_frame,
            "Detection Zone",
            zone_label_origin(zone),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.7,
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            2,
            imgproc::LINE_8,
            false,
        )?;

        let (text, scale, color) = match cue {
            TrackingCue::HandDetected => (cue.text(), 1.0, Scalar::new(0.0, 255.0, 0.0, 0.0)),
            TrackingCue::ShowHand => (cue.text(), 0.8, Scalar::new(0.0, 0.0, 255.0, 0.0)),
        };
        imgproc::put_text(
            &mut display_frame,
            text,
            Point::new(10, 30),
            imgproc::FONT_HERSHEY_SIMPLEX,
            scale,
            color,
            2,
            imgproc::LINE_8,
            false,
        )?;

        highgui::imshow(&self.name, &display_frame)?;
        Ok(())
    }

    fn show_placeholder(&mut self) -> Result<()> {
        let mut placeholder = Mat::new_rows_cols_with_default(
            480,
            640,
            CV_8UC3,
            Scalar::new(26.0, 26.0, 26.0, 0.0),
        )?;
        imgproc::put_text(
            &mut placeholder,
            "Camera inactive - press 's' to start",
            Point::new(120, 240),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.7,
            Scalar::new(200.0, 200.0, 200.0, 0.0),
            2,
            imgproc::LINE_8,
            false,
        )?;
        highgui::imshow(&self.name, &placeholder)?;
        Ok(())
    }
}

impl PreviewSink for HighGuiPreview {
    fn render(&mut self, frame: &RgbImage, zone: &ZoneRect, cue: TrackingCue) {
        if let Err(e) = self.show(frame, zone, cue) {
            log::warn!("Failed to update preview: {:#}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.show_placeholder() {
            log::warn!("Failed to reset preview: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handnav_shared::DetectionZone;

    #[test]
    fn test_zone_label_sits_inside_zone() {
        let bottom = ZoneRect::for_frame(640, 480, DetectionZone::Bottom);
        assert_eq!(zone_label_origin(&bottom), Point::new(10, 270));

        let right = ZoneRect::for_frame(640, 480, DetectionZone::Right);
        assert_eq!(zone_label_origin(&right), Point::new(436, 30));
    }
}
