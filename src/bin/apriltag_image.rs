//! Detect AprilTags in a still image, report tag poses, and display the
//! blended detections overlay until a key is pressed.

use apriltag_viewer::{
    app,
    config::{AppConfig, CameraIntrinsics, DetectorSettings},
    constants::DEFAULT_FAMILY,
};
use clap::{ArgAction, Parser};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "apriltag-image", version, about = "Detect AprilTags in an image and overlay tag poses")]
struct Args {
    /// Reduce output
    #[arg(short, long)]
    quiet: bool,

    /// Tag family to use
    #[arg(short, long, default_value = DEFAULT_FAMILY)]
    family: String,

    /// Set tag family border size
    #[arg(long, default_value_t = 1)]
    border: i32,

    /// Use this many CPU threads
    #[arg(short, long, default_value_t = 4)]
    threads: i32,

    /// Decimate input image by this factor
    #[arg(short = 'x', long, default_value_t = 1.0)]
    decimate: f64,

    /// Apply low-pass blur to input
    #[arg(short, long, default_value_t = 0.0)]
    blur: f64,

    /// Spend more time aligning edges of tags
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    refine_edges: bool,

    /// Spend more time decoding tags
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    refine_decode: bool,

    /// Spend more time computing pose of tags
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    refine_pose: bool,

    /// Use new contour-based quad detection
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    contours: bool,

    /// Path of image file
    image: String,
}

fn main() {
    let args = Args::parse();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("AprilTag still-image viewer");

    let config = AppConfig {
        camera: CameraIntrinsics::default(),
        detector: DetectorSettings {
            family: args.family,
            border: args.border,
            threads: args.threads,
            decimate: args.decimate,
            blur: args.blur,
            refine_edges: args.refine_edges,
            refine_decode: args.refine_decode,
            refine_pose: args.refine_pose,
            contours: args.contours,
        },
        quiet: args.quiet,
    };

    if let Err(err) = app::run_still(&config, &args.image) {
        println!("{err}");
        std::process::exit(1);
    }
}
