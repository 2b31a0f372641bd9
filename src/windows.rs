//! Problem-window detection.
//!
//! Scans the activity and interval series for contiguous spans where
//! values sit far outside their own distribution, and reports each span as
//! a time range. A sample is "out of band" when its absolute deviation
//! from the series mean exceeds `max(stddev, floor)`; runs shorter than
//! the configured minimum length are discarded as single-sample blips.
//!
//! Motion and timing windows are detected independently over their own
//! series — a moment in time may appear in both kinds at once.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::timing;

/// Deviation floor for motion-spike detection, in activity units.
const MOTION_DEVIATION_FLOOR: f64 = 1.0;

/// Deviation floor for timing-jitter detection, in milliseconds.
const TIMING_DEVIATION_FLOOR_MS: f64 = 8.0;

/// What kind of anomaly a [`ProblemWindow`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Motion activity far from its mean: content movement is uneven.
    MotionSpike,
    /// Frame intervals far from their mean: delivery timing is unstable.
    TimingJitter,
}

impl WindowKind {
    fn description(self) -> &'static str {
        match self {
            WindowKind::MotionSpike => {
                "Content motion is very uneven in this range, which may feel jerky."
            }
            WindowKind::TimingJitter => {
                "Frame timing is unstable here and may look like stutter."
            }
        }
    }
}

/// A contiguous time span flagged as anomalous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemWindow {
    /// Anomaly category. Serialized as `type` for renderer compatibility.
    #[serde(rename = "type")]
    pub kind: WindowKind,
    /// Window start, seconds from the start of the recording.
    pub start_sec: f64,
    /// Window end, seconds. Always `>= start_sec`.
    pub end_sec: f64,
    /// Human-readable explanation of the flag.
    pub description: String,
}

impl Display for ProblemWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "From {:.2}s to {:.2}s: {}",
            self.start_sec, self.end_sec, self.description,
        )
    }
}

/// Detect problem windows over both series of a recording.
///
/// `sample_times_ms` holds the timestamp of each activity sample (the
/// second frame of each consecutive pair) and has the same length as both
/// series. Interval-series indices are one position behind the timestamp
/// list, so timing windows map with an end offset of +1, clamped into
/// range.
pub(crate) fn detect_problem_windows(
    activity: &[f64],
    intervals: &[f64],
    sample_times_ms: &[f64],
    average_activity: f64,
    jerkiness: f64,
    jitter_ms: f64,
    min_window_len: usize,
) -> Vec<ProblemWindow> {
    let mut windows = Vec::new();

    if sample_times_ms.is_empty() {
        return windows;
    }

    let motion_bound = jerkiness.max(MOTION_DEVIATION_FLOOR);
    let motion_mask: Vec<bool> = activity
        .iter()
        .map(|&value| (value - average_activity).abs() > motion_bound)
        .collect();

    for (start, end) in ranges_from_mask(&motion_mask, min_window_len) {
        windows.push(window_at(
            WindowKind::MotionSpike,
            sample_times_ms[start],
            sample_times_ms[end],
        ));
    }

    if !intervals.is_empty() {
        let mean_interval = timing::mean(intervals);
        let timing_bound = jitter_ms.max(TIMING_DEVIATION_FLOOR_MS);
        let timing_mask: Vec<bool> = intervals
            .iter()
            .map(|&value| (value - mean_interval).abs() > timing_bound)
            .collect();

        let last = sample_times_ms.len() - 1;
        for (start, end) in ranges_from_mask(&timing_mask, min_window_len) {
            let start_index = start.min(last);
            let end_index = (end + 1).min(last);
            windows.push(window_at(
                WindowKind::TimingJitter,
                sample_times_ms[start_index],
                sample_times_ms[end_index],
            ));
        }
    }

    windows
}

fn window_at(kind: WindowKind, start_ms: f64, end_ms: f64) -> ProblemWindow {
    ProblemWindow {
        kind,
        start_sec: round2(start_ms / 1000.0),
        end_sec: round2(end_ms / 1000.0),
        description: kind.description().to_string(),
    }
}

/// Round to two decimal places (report precision).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Collapse a boolean mask into maximal contiguous `true` runs of length at
/// least `min_len`, as inclusive `(start, end)` index pairs.
pub(crate) fn ranges_from_mask(mask: &[bool], min_len: usize) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (index, &flagged) in mask.iter().enumerate() {
        match (flagged, run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                if index - start >= min_len {
                    ranges.push((start, index - 1));
                }
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start
        && mask.len() - start >= min_len
    {
        ranges.push((start, mask.len() - 1));
    }

    ranges
}
