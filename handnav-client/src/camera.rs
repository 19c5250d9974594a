use anyhow::{Context, Result};
use handnav_core::{CameraDevice, CameraSource};
use image::RgbImage;
use opencv::{
    core::{Mat, Scalar, CV_8UC3},
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture, VideoCaptureAPIs},
};

/// Local camera opened through OpenCV's video I/O
pub struct OpenCvCamera {
    index: i32,
}

impl OpenCvCamera {
    pub fn new(index: i32) -> Self {
        Self { index }
    }
}

impl CameraSource for OpenCvCamera {
    type Device = OpenCvDevice;

    fn acquire(&mut self) -> Result<OpenCvDevice> {
        log::info!("Opening local camera device {}...", self.index);
        let mut capture = VideoCapture::new(self.index, VideoCaptureAPIs::CAP_ANY as i32)?;

        if !capture.is_opened()? {
            anyhow::bail!("Failed to open camera device {}", self.index);
        }

        // Set camera properties for better performance
        capture.set(videoio::CAP_PROP_FRAME_WIDTH, 640.0)?;
        capture.set(videoio::CAP_PROP_FRAME_HEIGHT, 480.0)?;

        log::info!("Successfully opened local camera");
        Ok(OpenCvDevice {
            capture,
            frame: Mat::default(),
        })
    }
}

pub struct OpenCvDevice {
    capture: VideoCapture,
    frame: Mat,
}

impl CameraDevice for OpenCvDevice {
    fn read(&mut self) -> Option<RgbImage> {
        match self.capture.read(&mut self.frame) {
            Ok(true) if !self.frame.empty() => {}
            Ok(_) => return None,
            Err(e) => {
                log::warn!("Camera read failed: {}", e);
                return None;
            }
        }

        match bgr_to_rgb_image(&self.frame) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Dropping unreadable frame: {:#}", e);
                None
            }
        }
    }

    fn release(&mut self) {
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera: {}", e);
        }
    }
}

/// Converts an 8-bit BGR OpenCV frame into an RGB image
pub fn bgr_to_rgb_image(frame: &Mat) -> Result<RgbImage> {
    let mut rgb = Mat::default();
    imgproc::cvt_color(frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

    let width = rgb.cols() as u32;
    let height = rgb.rows() as u32;
    let data = rgb.data_bytes()?.to_vec();
    RgbImage::from_raw(width, height, data).context("Camera frame has an unexpected pixel layout")
}

/// Converts an RGB image back into an 8-bit BGR OpenCV frame
pub fn rgb_image_to_bgr(image: &RgbImage) -> Result<Mat> {
    let mut rgb = Mat::new_rows_cols_with_default(
        image.height() as i32,
        image.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    rgb.data_bytes_mut()?.copy_from_slice(image.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}
