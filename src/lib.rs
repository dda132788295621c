//! AprilTag detection and pose overlay library.
//!
//! This library drives a per-frame fiducial pipeline built on:
//! - the AprilTag C library for marker detection
//! - `OpenCV` for capture, color conversion, drawing and display
//! - `nalgebra` for recovering a 6-DOF tag pose from each detection's
//!   homography
//!
//! The pipeline for one frame is:
//! 1. Acquire a frame (still image, camera, or movie file)
//! 2. Normalize it to a single-channel grayscale buffer
//! 3. Run the configured AprilTag detector
//! 4. Per detection, estimate the camera-from-tag pose and emit a report
//! 5. Composite a detections overlay and blend it with the source frame
//!
//! Two binaries wrap the pipeline: `apriltag-image` runs it once on a still
//! image, `apriltag-video` runs it per frame inside an interactive capture
//! loop with snapshot and quit keys.

/// Main application runners: still-image pass and interactive stream loop
pub mod app;

/// Frame acquisition and grayscale normalization
pub mod capture;

/// Camera intrinsics and detector configuration
pub mod config;

/// Key codes, window name, snapshot layout and report formats
pub mod constants;

/// Adapter around the AprilTag detector library
pub mod detector;

/// Error types and result handling
pub mod error;

/// Overlay compositing: detection canvas, annotations, blending
pub mod overlay;

/// Pose recovery from a detection homography
pub mod pose;

/// Fixed-format per-detection reporting
pub mod report;

pub use error::{Error, Result};
