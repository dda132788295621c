//! Frame acquisition and grayscale normalization.
//!
//! A [`FrameSource`] yields decoded frames from a camera or movie file until
//! the stream ends; [`load_image`] decodes exactly one still image. Every
//! frame handed out is an owned `Mat`, replaced (never mutated) on each loop
//! cycle.

use crate::{constants, Error, Result};
use log::{info, warn};
use opencv::{
    core::Mat,
    imgcodecs, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};

/// Where streaming frames come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Movie file path
    File(String),
}

impl VideoSource {
    /// Interpret a positional CLI argument: an integer selects a camera,
    /// anything else is a movie file path.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i32>() {
            Ok(index) => Self::Camera(index),
            Err(_) => Self::File(input.to_string()),
        }
    }
}

/// Ordered frame producer for the streaming variant.
pub struct FrameSource {
    cap: VideoCapture,
}

impl FrameSource {
    /// Open a camera or movie file.
    ///
    /// An unopenable source is not an error here: the first `next_frame`
    /// call will report end-of-stream and the loop terminates normally.
    pub fn open(source: &VideoSource) -> Result<Self> {
        let cap = match source {
            VideoSource::Camera(index) => {
                info!("Opening camera {index}");
                VideoCapture::new(*index, videoio::CAP_ANY)?
            }
            VideoSource::File(path) => {
                info!("Opening movie file: {path}");
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };

        if !cap.is_opened()? {
            warn!("Video source {source:?} could not be opened; stream will end immediately");
        }

        Ok(Self { cap })
    }

    /// Fetch the next frame, blocking until one is available.
    ///
    /// Returns `Ok(None)` at end of stream.
    pub fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.cap.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}

/// Decode a single still image. A missing or undecodable file is fatal.
pub fn load_image(path: &str) -> Result<Mat> {
    let frame = imgcodecs::imread(path, imgcodecs::IMREAD_COLOR)?;
    if frame.empty() {
        return Err(Error::Acquisition(format!("could not read image file {path}")));
    }
    Ok(frame)
}

/// Convert a frame to a single-channel 8-bit buffer for detection.
///
/// Three-channel input goes through the colorimetric RGB→gray conversion;
/// single-channel input is copied unchanged.
pub fn to_grayscale(frame: &Mat) -> Result<Mat> {
    let mut gray = Mat::default();
    if frame.channels() == 3 {
        imgproc::cvt_color(
            frame,
            &mut gray,
            imgproc::COLOR_RGB2GRAY,
            0,
        )?;
    } else {
        frame.copy_to(&mut gray)?;
    }
    Ok(gray)
}

/// Persist a frame to `dir/saved_img_<index>.bmp`.
pub fn snapshot_path(dir: &std::path::Path, index: u32) -> std::path::PathBuf {
    dir.join(format!("saved_img_{index}.bmp"))
}

/// Default snapshot location relative to the working directory.
pub fn snapshot_dir() -> &'static std::path::Path {
    std::path::Path::new(constants::SNAPSHOT_DIR)
}
