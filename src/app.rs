//! Application runners: the one-shot still-image pass and the interactive
//! streaming loop.
//!
//! Both variants share the same per-frame pipeline (grayscale, detect, pose,
//! report, overlay, blend); the streaming variant wraps it in a capture loop
//! with two bounded key polls per iteration. All per-frame buffers are owned
//! by the iteration that produced them and dropped before the next one
//! starts.

use crate::{
    capture::{self, FrameSource, VideoSource},
    config::AppConfig,
    constants::{KEY_POLL_MS, KEY_QUIT, KEY_SNAPSHOT, WINDOW_NAME},
    detector::{TagDetection, TagDetector},
    overlay,
    pose::PoseEstimator,
    report, Result,
};
use log::{info, warn};
use opencv::{
    core::{Mat, Vector},
    highgui, imgcodecs,
    prelude::*,
};
use std::fs;
use std::io::{self, Write};

/// Run the pipeline once on a still image, then block for a key press.
pub fn run_still(config: &AppConfig, image_path: &str) -> Result<()> {
    // Configuration errors must surface before any frame is touched
    let mut detector = TagDetector::new(&config.detector)?;
    let estimator = PoseEstimator::new(config.camera);

    let frame = capture::load_image(image_path)?;
    highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;

    let gray = capture::to_grayscale(&frame)?;
    let detections = detector.detect(&gray)?;

    let canvas = overlay::detections_canvas(&detections, frame.size()?, frame.typ())?;
    report_frame(&detections, &estimator, config.quiet, true);

    let display = overlay::blend(&canvas, &frame)?;
    highgui::imshow(WINDOW_NAME, &display)?;

    // Hold the window until any key arrives
    highgui::wait_key(0)?;
    Ok(())
}

/// Interactive streaming loop: detect, overlay, display, and poll keys until
/// quit or end of stream.
pub struct StreamApp {
    config: AppConfig,
    detector: TagDetector,
    estimator: PoseEstimator,
    frames: FrameSource,
    saved_images: u32,
}

impl StreamApp {
    /// Configure the detector and open the video source.
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized tag family or invalid detector
    /// settings, before any frame is acquired.
    pub fn new(config: AppConfig, source: &VideoSource) -> Result<Self> {
        let detector = TagDetector::new(&config.detector)?;
        let estimator = PoseEstimator::new(config.camera);
        let frames = FrameSource::open(source)?;

        Ok(Self {
            config,
            detector,
            estimator,
            frames,
            saved_images: 0,
        })
    }

    /// Drive the loop until the quit key or end of stream.
    pub fn run(&mut self) -> Result<()> {
        highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;
        info!("Entering capture loop");

        loop {
            let Some(frame) = self.frames.next_frame()? else {
                info!("End of stream");
                break;
            };
            highgui::imshow(WINDOW_NAME, &frame)?;

            let gray = capture::to_grayscale(&frame)?;
            let detections = self.detector.detect(&gray)?;

            let canvas = overlay::detections_canvas(&detections, frame.size()?, frame.typ())?;
            let annotated = overlay::annotate(&canvas, &detections)?;
            report_frame(&detections, &self.estimator, self.config.quiet, false);

            let display = overlay::blend(&frame, &annotated)?;
            highgui::imshow(WINDOW_NAME, &display)?;

            // First checkpoint: snapshot trigger, quit honored too
            match highgui::wait_key(KEY_POLL_MS)? {
                KEY_SNAPSHOT => self.save_snapshot(&frame)?,
                KEY_QUIT => break,
                _ => {}
            }

            // Second checkpoint after the display refresh: quit only
            if highgui::wait_key(KEY_POLL_MS)? == KEY_QUIT {
                break;
            }
        }

        info!("Capture loop finished");
        Ok(())
    }

    /// Persist the unannotated source frame under a sequential name.
    ///
    /// The counter is process-wide, starts at zero, and never resets, so
    /// earlier snapshots are never overwritten.
    fn save_snapshot(&mut self, frame: &Mat) -> Result<()> {
        let dir = capture::snapshot_dir();
        fs::create_dir_all(dir)?;

        self.saved_images += 1;
        let path = capture::snapshot_path(dir, self.saved_images);
        let written = imgcodecs::imwrite(&path.to_string_lossy(), frame, &Vector::new())?;
        if written {
            info!("Saved image {} to {}", self.saved_images, path.display());
        } else {
            warn!("Could not write snapshot to {}", path.display());
        }
        Ok(())
    }
}

/// Emit the summary line and, unless quiet, one record per detection with its
/// recovered pose. Write failures are logged and never affect the pipeline.
fn report_frame(detections: &[TagDetection], estimator: &PoseEstimator, quiet: bool, record_gap: bool) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_frame_report(&mut out, detections, estimator, quiet, record_gap);
}

/// Reporting is observational: a failed write loses that line only, every
/// remaining pose is still computed and emitted.
fn write_frame_report<W: Write>(
    out: &mut W,
    detections: &[TagDetection],
    estimator: &PoseEstimator,
    quiet: bool,
    record_gap: bool,
) {
    if let Err(err) = report::summary(out, detections.len()) {
        warn!("Report write failed: {err}");
    }

    if !quiet {
        let total = detections.len();
        for (i, det) in detections.iter().enumerate() {
            let pose = estimator.estimate(&det.homography);
            if let Err(err) = report::detection(out, i + 1, total, det, &pose) {
                warn!("Report write failed: {err}");
                continue;
            }
            if record_gap {
                let _ = writeln!(out);
            }
        }
    }

    let _ = writeln!(out);
}
