//! Camera intrinsics and detector configuration.
//!
//! Both structures are flat and immutable: they are filled in once at startup
//! (from compiled-in constants and CLI flags) and passed by reference into the
//! pipeline. Nothing mutates them afterwards.

use crate::{Error, Result};

/// Fixed camera parameters and tag geometry used for pose recovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length along x, in pixels
    pub fx: f64,
    /// Focal length along y, in pixels
    pub fy: f64,
    /// Principal point x, in pixels
    pub cx: f64,
    /// Principal point y, in pixels
    pub cy: f64,
    /// Physical tag edge length, in meters
    pub tag_size: f64,
    /// Sign convention for the recovered Z axis (+1.0 or -1.0)
    pub z_sign: f64,
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            fx: 3156.71852,
            fy: 3129.52243,
            cx: 359.097908,
            cy: 239.736909,
            tag_size: 0.0762,
            z_sign: 1.0,
        }
    }
}

/// Detector configuration, fixed before the first frame is processed.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorSettings {
    /// Tag family name, e.g. "tag36h11"
    pub family: String,
    /// Tag family border size, in bit cells
    pub border: i32,
    /// Number of CPU threads the detector may use (1..=255)
    pub threads: i32,
    /// Downsampling factor applied before quad detection (>= 1.0)
    pub decimate: f64,
    /// Gaussian blur sigma applied to the input (0.0 disables)
    pub blur: f64,
    /// Spend more time aligning tag edges
    pub refine_edges: bool,
    /// Spend more time decoding tags
    pub refine_decode: bool,
    /// Spend more time computing tag poses
    pub refine_pose: bool,
    /// Use contour-based quad detection instead of the legacy path
    pub contours: bool,
}

impl DetectorSettings {
    /// Validate field ranges before the detector is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.decimate < 1.0 {
            return Err(Error::Config(format!(
                "decimate must be >= 1.0, got {}",
                self.decimate
            )));
        }
        if self.blur < 0.0 {
            return Err(Error::Config(format!("blur must be >= 0.0, got {}", self.blur)));
        }
        // The native detector takes the thread count as a u8
        if self.threads < 1 || self.threads > i32::from(u8::MAX) {
            return Err(Error::Config(format!(
                "threads must be in 1..=255, got {}",
                self.threads
            )));
        }
        Ok(())
    }
}

/// Top-level configuration handed to the pipeline at construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Camera parameters for pose recovery
    pub camera: CameraIntrinsics,
    /// Detector configuration
    pub detector: DetectorSettings,
    /// Suppress per-detection records on stdout
    pub quiet: bool,
}
