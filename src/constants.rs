//! Constants used throughout the application

/// Display window name shared by both binaries
pub const WINDOW_NAME: &str = "AprilTag";

/// Key that saves the current unannotated frame ('a')
pub const KEY_SNAPSHOT: i32 = 97;

/// Key that terminates the capture loop (ESC)
pub const KEY_QUIT: i32 = 27;

/// Bounded key-poll interval in milliseconds; also paces the stream loop
pub const KEY_POLL_MS: i32 = 1;

/// Relative directory that snapshots are written into
pub const SNAPSHOT_DIR: &str = "saved_img";

/// Default tag family name
pub const DEFAULT_FAMILY: &str = "tag36h11";

/// Column width for printed homography/pose matrix entries
pub const MATRIX_COL_WIDTH: usize = 12;

/// Decimal precision for printed homography/pose matrix entries
pub const MATRIX_PRECISION: usize = 6;

/// Outline thickness for detection annotations
pub const OUTLINE_THICKNESS: i32 = 8;
