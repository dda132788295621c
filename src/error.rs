//! Error types for the AprilTag viewer library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag family name not recognized by the AprilTag library
    #[error("Unrecognized tag family name \"{0}\". Use e.g. \"tag36h11\".")]
    UnknownFamily(String),

    /// Detector construction or invocation failed
    #[error("Detector error: {0}")]
    Detector(String),

    /// Frame could not be acquired or decoded
    #[error("Acquisition error: {0}")]
    Acquisition(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
