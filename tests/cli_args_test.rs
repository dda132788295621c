//! Tests for command-line argument parsing
//!
//! Note: These tests verify the argument parser configuration by creating
//! a test parser with the same structure as the binaries.

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Create a command with the same argument structure as the stream binary
fn create_test_command() -> ClapCommand {
    ClapCommand::new("apriltag-video")
        .version("0.1.0")
        .about("Detect AprilTags in a camera or movie stream and overlay tag poses")
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Reduce output"),
        )
        .arg(
            Arg::new("family")
                .short('f')
                .long("family")
                .value_name("NAME")
                .default_value("tag36h11")
                .help("Tag family to use"),
        )
        .arg(
            Arg::new("border")
                .long("border")
                .value_name("INT")
                .default_value("1")
                .help("Set tag family border size"),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("INT")
                .default_value("4")
                .help("Use this many CPU threads"),
        )
        .arg(
            Arg::new("decimate")
                .short('x')
                .long("decimate")
                .value_name("FLOAT")
                .default_value("1.0")
                .help("Decimate input image by this factor"),
        )
        .arg(
            Arg::new("blur")
                .short('b')
                .long("blur")
                .value_name("FLOAT")
                .default_value("0.0")
                .help("Apply low-pass blur to input"),
        )
        .arg(
            Arg::new("refine-edges")
                .long("refine-edges")
                .value_name("BOOL")
                .default_value("true")
                .help("Spend more time aligning edges of tags"),
        )
        .arg(
            Arg::new("refine-decode")
                .long("refine-decode")
                .value_name("BOOL")
                .default_value("false")
                .help("Spend more time decoding tags"),
        )
        .arg(
            Arg::new("refine-pose")
                .long("refine-pose")
                .value_name("BOOL")
                .default_value("false")
                .help("Spend more time computing pose of tags"),
        )
        .arg(
            Arg::new("contours")
                .short('c')
                .long("contours")
                .value_name("BOOL")
                .default_value("false")
                .help("Use new contour-based quad detection"),
        )
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Camera index or path to movie file"),
        )
}

#[test]
fn test_help_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["apriltag-video", "--help"]);

    // Help should cause an error (but a specific help error)
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_no_arguments_uses_defaults() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["apriltag-video"]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(matches.get_one::<String>("family").map(|s| s.as_str()), Some("tag36h11"));
    assert_eq!(matches.get_one::<String>("border").map(|s| s.as_str()), Some("1"));
    assert_eq!(matches.get_one::<String>("threads").map(|s| s.as_str()), Some("4"));
    assert_eq!(matches.get_one::<String>("decimate").map(|s| s.as_str()), Some("1.0"));
    assert_eq!(matches.get_one::<String>("blur").map(|s| s.as_str()), Some("0.0"));
    assert!(!matches.get_flag("quiet"));
}

#[test]
fn test_positional_camera_index() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["apriltag-video", "1"]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(matches.get_one::<String>("input").map(|s| s.as_str()), Some("1"));
}

#[test]
fn test_positional_movie_path() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["apriltag-video", "movie.mp4"]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(matches.get_one::<String>("input").map(|s| s.as_str()), Some("movie.mp4"));
}

#[test]
fn test_extra_positional_rejected() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["apriltag-video", "0", "extra.mp4"]);

    // More than one positional argument must fail
    assert!(result.is_err());
}

#[test]
fn test_unknown_flag_rejected() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["apriltag-video", "--no-such-flag"]);

    assert!(result.is_err());
}

#[test]
fn test_family_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["apriltag-video", "--family", "tag16h5"]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(matches.get_one::<String>("family").map(|s| s.as_str()), Some("tag16h5"));
}

#[test]
fn test_refinement_flags_take_bool_values() {
    let flags = vec!["refine-edges", "refine-decode", "refine-pose", "contours"];

    for flag in flags {
        let cmd = create_test_command();
        let long = format!("--{flag}");
        let result = cmd.try_get_matches_from(vec!["apriltag-video", &long, "true"]);

        assert!(result.is_ok(), "Should accept {long} true");
        let matches = result.unwrap();
        assert_eq!(matches.get_one::<String>(flag).map(|s| s.as_str()), Some("true"));
    }
}

#[test]
fn test_multiple_arguments() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec![
        "apriltag-video",
        "--family",
        "tag25h9",
        "--threads",
        "8",
        "--decimate",
        "2.0",
        "--quiet",
        "movie.avi",
    ]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(matches.get_one::<String>("family").map(|s| s.as_str()), Some("tag25h9"));
    assert_eq!(matches.get_one::<String>("threads").map(|s| s.as_str()), Some("8"));
    assert_eq!(matches.get_one::<String>("decimate").map(|s| s.as_str()), Some("2.0"));
    assert!(matches.get_flag("quiet"));
    assert_eq!(matches.get_one::<String>("input").map(|s| s.as_str()), Some("movie.avi"));
}
