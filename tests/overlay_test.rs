//! Pipeline compositing properties: blank-canvas blending, annotation
//! isolation, and grayscale normalization.

use apriltag_viewer::{capture, detector::TagDetection, overlay};
use opencv::{
    core::{Mat, Scalar, CV_8UC1, CV_8UC3},
    prelude::*,
};

fn sample_detection() -> TagDetection {
    TagDetection {
        bits: 36,
        min_hamming: 11,
        id: 5,
        hamming: 0,
        goodness: 0.0,
        decision_margin: 40.0,
        center: [16.0, 16.0],
        corners: [[8.0, 8.0], [24.0, 8.0], [24.0, 24.0], [8.0, 24.0]],
        homography: [1.0, 0.0, 16.0, 0.0, 1.0, 16.0, 0.0, 0.0, 1.0],
    }
}

#[test]
fn empty_detections_yield_blank_canvas() {
    let frame = Mat::new_rows_cols_with_default(32, 32, CV_8UC3, Scalar::new(100.0, 150.0, 200.0, 0.0)).unwrap();
    let canvas = overlay::detections_canvas(&[], frame.size().unwrap(), frame.typ()).unwrap();

    assert_eq!(canvas.rows(), 32);
    assert_eq!(canvas.cols(), 32);
    assert_eq!(canvas.typ(), frame.typ());
    for &byte in canvas.data_bytes().unwrap() {
        assert_eq!(byte, 0);
    }
}

#[test]
fn zero_detection_blend_halves_the_source() {
    let frame = Mat::new_rows_cols_with_default(16, 16, CV_8UC3, Scalar::new(100.0, 150.0, 200.0, 0.0)).unwrap();
    let canvas = overlay::detections_canvas(&[], frame.size().unwrap(), frame.typ()).unwrap();
    let blended = overlay::blend(&frame, &canvas).unwrap();

    let pixel = blended.at_2d::<opencv::core::Vec3b>(8, 8).unwrap();
    assert_eq!(pixel[0], 50);
    assert_eq!(pixel[1], 75);
    assert_eq!(pixel[2], 100);
}

#[test]
fn blend_does_not_mutate_the_source_frame() {
    let frame = Mat::new_rows_cols_with_default(16, 16, CV_8UC3, Scalar::new(10.0, 20.0, 30.0, 0.0)).unwrap();
    let before = frame.data_bytes().unwrap().to_vec();

    let canvas = overlay::detections_canvas(&[sample_detection()], frame.size().unwrap(), frame.typ()).unwrap();
    let annotated = overlay::annotate(&canvas, &[sample_detection()]).unwrap();
    let _ = overlay::blend(&frame, &annotated).unwrap();

    assert_eq!(frame.data_bytes().unwrap(), &before[..]);
}

#[test]
fn annotate_leaves_the_base_canvas_untouched() {
    let frame = Mat::new_rows_cols_with_default(32, 32, CV_8UC3, Scalar::all(0.0)).unwrap();
    let canvas = overlay::detections_canvas(&[sample_detection()], frame.size().unwrap(), frame.typ()).unwrap();
    let before = canvas.data_bytes().unwrap().to_vec();

    let annotated = overlay::annotate(&canvas, &[sample_detection()]).unwrap();

    assert_eq!(canvas.data_bytes().unwrap(), &before[..]);
    // The working copy differs: outlines and labels were drawn on it
    assert_ne!(annotated.data_bytes().unwrap(), &before[..]);
}

#[test]
fn detection_footprint_is_drawn_on_the_canvas() {
    let frame = Mat::new_rows_cols_with_default(32, 32, CV_8UC3, Scalar::all(0.0)).unwrap();
    let canvas = overlay::detections_canvas(&[sample_detection()], frame.size().unwrap(), frame.typ()).unwrap();

    // Inside the tag footprint
    let inside = canvas.at_2d::<opencv::core::Vec3b>(16, 16).unwrap();
    assert_eq!(inside[0], 255);
    // Outside stays blank
    let outside = canvas.at_2d::<opencv::core::Vec3b>(1, 1).unwrap();
    assert_eq!(outside[0], 0);
}

#[test]
fn grayscale_single_channel_passthrough_is_bit_identical() {
    let mut frame = Mat::new_rows_cols_with_default(8, 8, CV_8UC1, Scalar::all(0.0)).unwrap();
    for row in 0..8 {
        for col in 0..8 {
            *frame.at_2d_mut::<u8>(row, col).unwrap() = (row * 8 + col) as u8;
        }
    }

    let gray = capture::to_grayscale(&frame).unwrap();
    assert_eq!(frame.data_bytes().unwrap(), gray.data_bytes().unwrap());
}
