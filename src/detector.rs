//! Adapter around the AprilTag detector library.
//!
//! [`TagDetector`] owns one configured native detector for the lifetime of a
//! run. Each `detect` call copies the grayscale `Mat` into the library's
//! `image_u8` buffer, runs detection, and extracts plain owned
//! [`TagDetection`] values before the native buffers are released — the
//! grayscale image and the native detection collection never outlive the
//! call.

use crate::{
    config::DetectorSettings,
    error::{Error, Result},
};
use apriltag::{DetectorBuilder, Family, Image};
use log::{debug, info};
use opencv::{core::Mat, prelude::*};

/// Bit count and minimum hamming distance of a tag family, as encoded in its
/// name (e.g. "tag36h11" -> 36 bits, distance 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyDescriptor {
    pub bits: u32,
    pub min_hamming: u32,
}

impl FamilyDescriptor {
    /// Parse the trailing `<bits>h<hamming>` portion of a family name.
    pub fn parse(name: &str) -> Option<Self> {
        let h_pos = name.rfind('h')?;
        let (head, hamming) = name.split_at(h_pos);
        let min_hamming: u32 = hamming[1..].parse().ok()?;
        let digits_start = head.rfind(|c: char| !c.is_ascii_digit()).map_or(0, |i| i + 1);
        let bits: u32 = head[digits_start..].parse().ok()?;
        Some(Self { bits, min_hamming })
    }
}

/// One located marker, copied out of the native detection before release.
#[derive(Debug, Clone, PartialEq)]
pub struct TagDetection {
    /// Payload bit count of the detecting family
    pub bits: u32,
    /// Minimum hamming distance of the detecting family
    pub min_hamming: u32,
    /// Decoded tag id
    pub id: usize,
    /// Bit errors corrected during decode
    pub hamming: i32,
    /// Legacy quad-fit quality score; the linked library no longer computes
    /// it and always reports 0.0
    pub goodness: f64,
    /// Confidence of the decoded identity
    pub decision_margin: f32,
    /// Tag center in source-frame pixel coordinates
    pub center: [f64; 2],
    /// Four corners in consistent winding, source-frame pixel coordinates
    pub corners: [[f64; 2]; 4],
    /// Row-major 3x3 homography mapping tag-plane to image coordinates
    pub homography: [f64; 9],
}

/// Wraps a single configured AprilTag detector instance.
pub struct TagDetector {
    inner: apriltag::Detector,
    descriptor: FamilyDescriptor,
}

impl TagDetector {
    /// Construct and configure the native detector.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The family name is not recognized by the AprilTag library
    /// - A settings field is out of range
    /// - The native detector cannot be created
    pub fn new(settings: &DetectorSettings) -> Result<Self> {
        settings.validate()?;

        let descriptor = FamilyDescriptor::parse(&settings.family)
            .ok_or_else(|| Error::UnknownFamily(settings.family.clone()))?;
        let family: Family = settings
            .family
            .parse()
            .map_err(|_| Error::UnknownFamily(settings.family.clone()))?;

        let mut inner = DetectorBuilder::new()
            .add_family_bits(family, 1)
            .build()
            .map_err(|e| Error::Detector(e.to_string()))?;

        inner.set_thread_number(settings.threads as u8);
        inner.set_decimation(settings.decimate as f32);
        inner.set_sigma(settings.blur as f32);
        inner.set_refine_edges(settings.refine_edges);
        inner.set_debug(false);

        if settings.refine_decode || settings.refine_pose || settings.contours || settings.border != 1 {
            // AprilTag 3 dropped these knobs; they remain accepted on the CLI
            debug!(
                "refine_decode/refine_pose/contours/border are not exposed by the linked AprilTag library; ignoring"
            );
        }

        info!(
            "Detector ready: family {} ({} bits, hamming {}), {} threads, decimate {}, blur {}",
            settings.family,
            descriptor.bits,
            descriptor.min_hamming,
            settings.threads,
            settings.decimate,
            settings.blur
        );

        Ok(Self { inner, descriptor })
    }

    /// Family descriptor of the configured detector.
    pub fn descriptor(&self) -> FamilyDescriptor {
        self.descriptor
    }

    /// Detect tags in a single-channel 8-bit buffer.
    ///
    /// Detections are returned in the native library's order. The grayscale
    /// copy and the native detection collection are released before this
    /// returns.
    pub fn detect(&mut self, gray: &Mat) -> Result<Vec<TagDetection>> {
        let image = mat_to_image(gray)?;
        let native = self.inner.detect(&image);

        let detections = native
            .iter()
            .map(|det| {
                let mut homography = [0.0f64; 9];
                homography.copy_from_slice(&det.homography().data()[..9]);
                TagDetection {
                    bits: self.descriptor.bits,
                    min_hamming: self.descriptor.min_hamming,
                    id: det.id(),
                    hamming: det.hamming() as i32,
                    goodness: 0.0,
                    decision_margin: det.decision_margin(),
                    center: det.center(),
                    corners: det.corners(),
                    homography,
                }
            })
            .collect();

        Ok(detections)
    }
}

/// Copy a single-channel `Mat` into the library's `image_u8` layout.
fn mat_to_image(gray: &Mat) -> Result<Image> {
    if gray.channels() != 1 {
        return Err(Error::InvalidInput(format!(
            "detector input must be single-channel, got {} channels",
            gray.channels()
        )));
    }
    let width = gray.cols() as usize;
    let height = gray.rows() as usize;
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput("detector input is empty".to_string()));
    }

    let data = gray.data_bytes()?;
    let mut image =
        Image::zeros_with_stride(width, height, width).map_err(|e| Error::Detector(e.to_string()))?;
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for (x, &value) in row.iter().enumerate() {
            image[(x, y)] = value;
        }
    }
    Ok(image)
}
