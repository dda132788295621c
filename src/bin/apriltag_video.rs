//! Detect AprilTags in a live camera or movie stream, overlay tag poses, and
//! save snapshots on demand.

use apriltag_viewer::{
    app::StreamApp,
    capture::VideoSource,
    config::{AppConfig, CameraIntrinsics, DetectorSettings},
    constants::DEFAULT_FAMILY,
};
use clap::{ArgAction, Parser};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "apriltag-video", version, about = "Detect AprilTags in a camera or movie stream and overlay tag poses")]
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
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    refine_decode: bool,

    /// Spend more time computing pose of tags
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    refine_pose: bool,

    /// Use new contour-based quad detection
    #[arg(short, long, default_value_t = false, action = ArgAction::Set)]
    contours: bool,

    /// Camera index or path to movie file
    input: Option<String>,
}

fn main() {
    let args = Args::parse();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("AprilTag stream viewer");

    let source = VideoSource::parse(args.input.as_deref().unwrap_or("0"));
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

    if let Err(err) = run(config, &source) {
        println!("{err}");
        std::process::exit(1);
    }
}

fn run(config: AppConfig, source: &VideoSource) -> apriltag_viewer::Result<()> {
    StreamApp::new(config, source)?.run()
}
