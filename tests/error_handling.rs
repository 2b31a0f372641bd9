//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for broken
//! sources, unreadable frames, and cancelled runs.

use image::{DynamicImage, GrayImage, Luma};
use scrollgauge::{
    AnalysisOptions, FrameDecodeError, FrameSource, ImageSequenceSource, MemorySource,
    ScrollGaugeError, TimedFrame, analyze,
};

fn uniform_frame(timestamp_ms: f64, value: u8) -> TimedFrame {
    TimedFrame {
        timestamp_ms,
        image: DynamicImage::ImageLuma8(GrayImage::from_pixel(32, 32, Luma([value]))),
    }
}

/// A source that fails to decode the frames at the given indices.
struct FlakySource {
    frames: Vec<TimedFrame>,
    failing: Vec<usize>,
    position: usize,
}

impl FrameSource for FlakySource {
    fn next_frame(&mut self) -> Result<Option<TimedFrame>, FrameDecodeError> {
        let index = self.position;
        if index >= self.frames.len() {
            return Ok(None);
        }
        self.position += 1;

        if self.failing.contains(&index) {
            Err(FrameDecodeError::new(format!("corrupt frame data at {index}")))
        } else {
            Ok(Some(self.frames[index].clone()))
        }
    }
}

fn options() -> AnalysisOptions {
    AnalysisOptions::new().with_frame_skip(1).with_block_size(32)
}

#[test]
fn missing_directory_fails_to_open() {
    let error = ImageSequenceSource::open("/nonexistent/frames", 30.0)
        .expect_err("Opening a missing directory should fail");

    match &error {
        ScrollGaugeError::SourceOpen { path, reason } => {
            assert_eq!(path.to_string_lossy(), "/nonexistent/frames");
            assert!(!reason.is_empty());
        }
        other => panic!("Expected SourceOpen, got {other:?}"),
    }
    assert!(
        error.to_string().contains("Failed to open frame source"),
        "Unexpected message: {error}",
    );
}

#[test]
fn empty_directory_fails_to_open() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let error = ImageSequenceSource::open(dir.path(), 30.0)
        .expect_err("Opening an empty directory should fail");
    assert!(
        error.to_string().contains("no frame images"),
        "Unexpected message: {error}",
    );
}

#[test]
fn non_image_files_are_not_frames() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("notes.txt"), "not a frame")
        .expect("Failed to write file");

    let error = ImageSequenceSource::open(dir.path(), 30.0)
        .expect_err("A directory without images should fail to open");
    assert!(error.to_string().contains("no frame images"));
}

#[test]
fn non_positive_fps_fails_to_open() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("frame_0.png"), b"placeholder")
        .expect("Failed to write file");

    let error = ImageSequenceSource::open(dir.path(), 0.0)
        .expect_err("Zero fps should be rejected");
    assert!(
        error.to_string().contains("fps must be positive"),
        "Unexpected message: {error}",
    );
}

#[test]
fn undecodable_first_frame_is_fatal() {
    let source = FlakySource {
        frames: (0..5).map(|i| uniform_frame(i as f64 * 16.0, 0)).collect(),
        failing: vec![0],
        position: 0,
    };

    let error = analyze(source, &options()).expect_err("First-frame failure should abort");
    match error {
        ScrollGaugeError::FirstFrameDecode(reason) => {
            assert!(reason.contains("corrupt frame data at 0"));
        }
        other => panic!("Expected FirstFrameDecode, got {other:?}"),
    }
}

#[test]
fn later_decode_failures_only_lower_the_count() {
    let source = FlakySource {
        frames: (0..6).map(|i| uniform_frame(i as f64 * 16.0, i as u8 * 5)).collect(),
        failing: vec![2, 4],
        position: 0,
    };

    let report = analyze(source, &options()).expect("Mid-stream failures should be skipped");
    assert_eq!(report.frames_processed, 4);
    assert_eq!(report.activity_series.len(), 3);
}

#[test]
fn unreadable_image_file_surfaces_as_first_frame_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("frame_0.png"), b"this is not a png")
        .expect("Failed to write file");

    let source = ImageSequenceSource::open(dir.path(), 30.0)
        .expect("Directory with one image file should open");
    assert_eq!(source.frame_count(), 1);

    let error = analyze(source, &options()).expect_err("Garbage bytes should not decode");
    assert!(matches!(error, ScrollGaugeError::FirstFrameDecode(_)));
}

#[test]
fn cancelled_runs_report_cancellation() {
    let token = scrollgauge::CancellationToken::new();
    token.cancel();

    let frames = (0..4).map(|i| uniform_frame(i as f64 * 16.0, 0)).collect();
    let error = analyze(
        MemorySource::new(frames),
        &options().with_cancellation(token),
    )
    .expect_err("A cancelled token should abort the run");

    assert!(matches!(error, ScrollGaugeError::Cancelled));
    assert_eq!(error.to_string(), "Operation cancelled");
}

#[test]
fn errors_have_stable_display_prefixes() {
    let invalid = analyze(
        MemorySource::new(Vec::new()),
        &options().with_max_samples(0),
    )
    .expect_err("Zero max_samples should be rejected");
    assert!(invalid.to_string().starts_with("Invalid configuration:"));
}
