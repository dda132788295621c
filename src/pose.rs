//! Pose recovery from a detection homography.
//!
//! The AprilTag homography maps tag-plane coordinates (tag corners at
//! (+/-1, +/-1)) into image pixels and absorbs the camera intrinsics. The
//! estimator strips the intrinsics back out, recovers the planar rotation
//! columns plus translation up to a common scale, and rebuilds a proper
//! camera-from-tag rigid transform with the translation expressed in meters.

use crate::config::CameraIntrinsics;
use nalgebra::{Matrix3, Matrix4, Vector3};

/// Computes camera-from-tag transforms for fixed camera parameters.
#[derive(Debug, Clone, Copy)]
pub struct PoseEstimator {
    intrinsics: CameraIntrinsics,
}

impl PoseEstimator {
    pub fn new(intrinsics: CameraIntrinsics) -> Self {
        Self { intrinsics }
    }

    /// Recover the homogeneous camera-from-tag transform from a row-major
    /// 3x3 homography.
    ///
    /// Deterministic: identical inputs yield bit-identical output matrices.
    pub fn estimate(&self, homography: &[f64; 9]) -> Matrix4<f64> {
        let CameraIntrinsics {
            fx,
            fy,
            cx,
            cy,
            tag_size,
            z_sign,
        } = self.intrinsics;

        let h = Matrix3::from_row_slice(homography);

        // Remove the intrinsics: m ~ [r1 r2 t] up to scale
        let m = Matrix3::new(
            (h[(0, 0)] - cx * h[(2, 0)]) / fx,
            (h[(0, 1)] - cx * h[(2, 1)]) / fx,
            (h[(0, 2)] - cx * h[(2, 2)]) / fx,
            (h[(1, 0)] - cy * h[(2, 0)]) / fy,
            (h[(1, 1)] - cy * h[(2, 1)]) / fy,
            (h[(1, 2)] - cy * h[(2, 2)]) / fy,
            h[(2, 0)],
            h[(2, 1)],
            h[(2, 2)],
        );

        // Joint scale of the two rotation columns
        let scale = (m.column(0).norm() * m.column(1).norm()).sqrt();
        let mut m = m / scale;

        // Enforce the configured sign convention on the recovered depth
        if m[(2, 2)] * z_sign < 0.0 {
            m = -m;
        }

        // Tag-plane coordinates span [-1, 1], so the unit translation is in
        // half-tag lengths
        let translation: Vector3<f64> = m.column(2) * (tag_size / 2.0);

        // Orthonormalize the rotation columns
        let r0: Vector3<f64> = m.column(0).normalize();
        let r1_raw: Vector3<f64> = m.column(1).into_owned();
        let r2 = r0.cross(&r1_raw).normalize();
        let r1 = r2.cross(&r0);

        let mut pose = Matrix4::identity();
        pose.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&Matrix3::from_columns(&[r0, r1, r2]));
        pose.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        pose
    }
}
