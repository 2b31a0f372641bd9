//! Comparison engine: per-metric winners and the overall verdict.

use image::{DynamicImage, GrayImage, Luma};
use scrollgauge::{
    AnalysisOptions, MemorySource, Rating, Report, TimedFrame, Winner, compare, compare_reports,
};

fn uniform_frame(timestamp_ms: f64, value: u8) -> TimedFrame {
    TimedFrame {
        timestamp_ms,
        image: DynamicImage::ImageLuma8(GrayImage::from_pixel(32, 32, Luma([value]))),
    }
}

fn evenly_spaced(values: &[u8], interval_ms: f64) -> MemorySource {
    MemorySource::new(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| uniform_frame(i as f64 * interval_ms, v))
            .collect(),
    )
}

fn options() -> AnalysisOptions {
    AnalysisOptions::new().with_frame_skip(1).with_block_size(32)
}

/// A hand-built report with the given metrics; everything else neutral.
fn report_with(rating: Rating, jerkiness: f64, jitter_ms: f64, estimated_fps: f64) -> Report {
    Report {
        frames_processed: 100,
        average_activity: 10.0,
        jerkiness,
        jitter_ms,
        mean_interval_ms: 16.0,
        estimated_fps,
        smoothness_rating: rating,
        smoothness_description: rating.description().to_string(),
        issues: Vec::new(),
        problem_windows: Vec::new(),
        summary: String::new(),
        insufficient_data: false,
        activity_series: Vec::new(),
        interval_series: Vec::new(),
    }
}

#[test]
fn identical_recordings_tie_everywhere() {
    let values = [0, 5, 10, 15, 20, 25, 30, 35];
    let result = compare(
        evenly_spaced(&values, 16.0),
        evenly_spaced(&values, 16.0),
        &options(),
    )
    .expect("Comparison should succeed");

    assert_eq!(result.better_jerkiness, Winner::Tie);
    assert_eq!(result.better_jitter, Winner::Tie);
    assert_eq!(result.better_fps, Winner::Tie);
    assert_eq!(result.overall_winner, Winner::Tie);
    assert_eq!(result.first, result.second);
}

#[test]
fn rating_gap_decides_overall() {
    // Second has better jitter but a worse rating; the rating dominates.
    let first = report_with(Rating::Good, 4.0, 7.0, 60.0);
    let second = report_with(Rating::Fair, 8.0, 2.0, 60.0);
    let result = compare_reports(first, second);

    assert_eq!(result.better_jitter, Winner::Second);
    assert_eq!(result.overall_winner, Winner::First);
}

#[test]
fn equal_ratings_fall_back_to_jitter() {
    let first = report_with(Rating::Good, 4.0, 6.0, 60.0);
    let second = report_with(Rating::Good, 3.0, 7.0, 60.0);
    let result = compare_reports(first, second);

    assert_eq!(result.better_jerkiness, Winner::Second);
    assert_eq!(result.overall_winner, Winner::First);
}

#[test]
fn equal_jitter_falls_back_to_jerkiness() {
    let first = report_with(Rating::Good, 4.5, 6.0, 60.0);
    let second = report_with(Rating::Good, 3.0, 6.0, 60.0);
    let result = compare_reports(first, second);

    assert_eq!(result.better_jitter, Winner::Tie);
    assert_eq!(result.overall_winner, Winner::Second);
}

#[test]
fn per_metric_winners_are_independent() {
    // First wins jerkiness, second wins jitter and FPS.
    let first = report_with(Rating::Good, 2.0, 7.9, 55.0);
    let second = report_with(Rating::Good, 4.0, 5.0, 61.0);
    let result = compare_reports(first, second);

    assert_eq!(result.better_jerkiness, Winner::First);
    assert_eq!(result.better_jitter, Winner::Second);
    assert_eq!(result.better_fps, Winner::Second);
}

#[test]
fn higher_fps_wins_the_fps_metric() {
    let first = report_with(Rating::Good, 3.0, 5.0, 59.9);
    let second = report_with(Rating::Good, 3.0, 5.0, 60.1);
    let result = compare_reports(first, second);
    assert_eq!(result.better_fps, Winner::Second);
}

#[test]
fn insufficient_recordings_still_compare() {
    // One real recording against an empty one: both produce reports, and
    // the comparison runs on whatever numbers they carry.
    let result = compare(
        evenly_spaced(&[0, 5, 10, 15, 20, 25], 16.0),
        MemorySource::new(Vec::new()),
        &options(),
    )
    .expect("Comparison should succeed");

    assert!(!result.first.insufficient_data);
    assert!(result.second.insufficient_data);
}

#[test]
fn winners_render_stable_labels() {
    assert_eq!(Winner::First.to_string(), "Recording 1");
    assert_eq!(Winner::Second.to_string(), "Recording 2");
    assert_eq!(Winner::Tie.to_string(), "Tie");
}
