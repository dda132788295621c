//! Fixed-format per-detection reporting.
//!
//! Purely observational: the emitter never influences detection or pose
//! computation, and callers are expected to log (not propagate) write
//! failures.

use crate::{
    constants::{MATRIX_COL_WIDTH, MATRIX_PRECISION},
    detector::TagDetection,
};
use nalgebra::Matrix4;
use std::io::{self, Write};

/// Emit the per-frame summary line.
pub fn summary<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    writeln!(out, "Detected {count} tags.")
}

/// Emit one fixed-format record for a detection and its pose.
///
/// `index` is 1-based; records are expected to be emitted in detection order.
pub fn detection<W: Write>(
    out: &mut W,
    index: usize,
    total: usize,
    det: &TagDetection,
    pose: &Matrix4<f64>,
) -> io::Result<()> {
    writeln!(out, "Detection {index} of {total}:")?;
    writeln!(out, " \tFamily: tag{:2}h{:2}", det.bits, det.min_hamming)?;
    writeln!(out, " \tID: {}", det.id)?;
    writeln!(out, " \tHamming: {}", det.hamming)?;
    writeln!(out, "\tGoodness: {:.3}", det.goodness)?;
    writeln!(out, " \tMargin: {:.3}", det.decision_margin)?;
    writeln!(out, " \tCenter: ({:.3},{:.3})", det.center[0], det.center[1])?;
    writeln!(
        out,
        "\tCorners: ({:.3},{:.3})",
        det.corners[0][0], det.corners[0][1]
    )?;
    for corner in &det.corners[1..] {
        writeln!(out, "\t\t ({:.3},{:.3})", corner[0], corner[1])?;
    }

    writeln!(out, "\tHomography:")?;
    write_matrix(out, 3, 3, |row, col| det.homography[row * 3 + col])?;
    writeln!(out, "\tPose:")?;
    write_matrix(out, 4, 4, |row, col| pose[(row, col)])?;
    Ok(())
}

/// Print a matrix row-major, one row per line, each entry padded to a fixed
/// column width with fixed decimal precision.
fn write_matrix<W: Write>(
    out: &mut W,
    rows: usize,
    cols: usize,
    at: impl Fn(usize, usize) -> f64,
) -> io::Result<()> {
    for row in 0..rows {
        for col in 0..cols {
            write!(
                out,
                "\t{:width$.precision$}, ",
                at(row, col),
                width = MATRIX_COL_WIDTH,
                precision = MATRIX_PRECISION
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
