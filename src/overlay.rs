//! Overlay compositing: detections canvas, outline/label annotations, and the
//! fixed 0.5/0.5 blend with the source frame.
//!
//! Nothing here touches the source frame; all drawing happens on freshly
//! allocated canvases or working copies.

use crate::{constants::OUTLINE_THICKNESS, detector::TagDetection, Result};
use opencv::{
    core::{self, Mat, Point, Scalar, Size, Vector},
    imgproc,
    prelude::*,
};

/// Render a same-sized "detections only" image: one filled tag footprint per
/// detection on a black canvas. Succeeds (yielding a blank canvas) when the
/// collection is empty.
pub fn detections_canvas(detections: &[TagDetection], size: Size, typ: i32) -> Result<Mat> {
    let mut canvas = Mat::zeros_size(size, typ)?.to_mat()?;
    for det in detections {
        imgproc::fill_convex_poly(
            &mut canvas,
            &corner_points(det),
            Scalar::new(255.0, 255.0, 255.0, 0.0),
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(canvas)
}

/// Draw a closed corner outline and an id label per detection onto a working
/// copy of the canvas. The canvas itself is left untouched.
pub fn annotate(canvas: &Mat, detections: &[TagDetection]) -> Result<Mat> {
    let mut annotated = canvas.try_clone()?;
    for det in detections {
        let curves: Vector<Vector<Point>> = Vector::from_iter([corner_points(det)]);
        imgproc::polylines(
            &mut annotated,
            &curves,
            true,
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            OUTLINE_THICKNESS,
            imgproc::LINE_8,
            0,
        )?;
        imgproc::put_text(
            &mut annotated,
            &det.id.to_string(),
            Point::new(det.center[0] as i32, det.center[1] as i32),
            imgproc::FONT_HERSHEY_SIMPLEX,
            1.0,
            Scalar::new(0.0, 0.0, 255.0, 0.0),
            2,
            imgproc::LINE_8,
            false,
        )?;
    }
    Ok(annotated)
}

/// Blend the source frame with an overlay at fixed equal weights.
pub fn blend(frame: &Mat, overlay: &Mat) -> Result<Mat> {
    let mut blended = Mat::default();
    core::add_weighted(frame, 0.5, overlay, 0.5, 0.0, &mut blended, -1)?;
    Ok(blended)
}

fn corner_points(det: &TagDetection) -> Vector<Point> {
    det.corners
        .iter()
        .map(|c| Point::new(c[0].round() as i32, c[1].round() as i32))
        .collect()
}
