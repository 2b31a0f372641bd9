//! Analysis report assembly.
//!
//! [`Report`] is the single structured output of analyzing one recording.
//! It is plain data: field names and nesting are a compatibility contract
//! for downstream renderers (JSON dashboards, GUIs), and the struct
//! round-trips through serde unchanged.
//!
//! Building a report is where the pipeline's series turn into verdicts:
//! statistics, rating, issue list, problem windows, and the one-sentence
//! summary are all derived here.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::classify::{self, Rating};
use crate::options::AnalysisOptions;
use crate::timing::{self, TimingSummary};
use crate::windows::{self, ProblemWindow};

/// The complete smoothness analysis of one recording.
///
/// Immutable after construction. Created by [`analyze`](crate::analyze);
/// two of them feed [`compare_reports`](crate::compare_reports).
///
/// A recording with fewer than two usable samples produces a report with
/// [`insufficient_data`](Report::insufficient_data) set, zeroed statistics,
/// and no problem windows — check the flag before trusting the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Number of samples actually retained (after stride/cap filtering and
    /// decode-failure skips).
    pub frames_processed: usize,
    /// Mean motion activity across all consecutive sample pairs.
    pub average_activity: f64,
    /// Standard deviation of the activity series: motion consistency,
    /// lower is better.
    pub jerkiness: f64,
    /// Standard deviation of inter-sample intervals in milliseconds:
    /// timing consistency, lower is better.
    pub jitter_ms: f64,
    /// Mean gap between consecutive samples, in milliseconds.
    pub mean_interval_ms: f64,
    /// Estimated frames per second (`1000 / mean_interval_ms`, 0 when the
    /// mean is not positive).
    pub estimated_fps: f64,
    /// Categorical smoothness rating.
    pub smoothness_rating: Rating,
    /// One-line description of the rating.
    pub smoothness_description: String,
    /// Diagnostic issue list, in check order; never empty.
    pub issues: Vec<String>,
    /// Flagged anomalous time ranges.
    pub problem_windows: Vec<ProblemWindow>,
    /// Human-readable one-sentence summary.
    pub summary: String,
    /// `true` when fewer than two usable samples were collected and the
    /// statistics above are placeholders.
    pub insufficient_data: bool,
    /// Per-pair motion activity values, in sample order.
    pub activity_series: Vec<f64>,
    /// Inter-sample gaps in milliseconds; same length as
    /// `activity_series`.
    pub interval_series: Vec<f64>,
}

/// Assemble a report from the accumulated series of one recording.
///
/// `sample_times_ms` carries the timestamp of each activity sample and has
/// the same length as `activity` and `intervals`.
pub(crate) fn build(
    frames_processed: usize,
    activity: Vec<f64>,
    intervals: Vec<f64>,
    sample_times_ms: &[f64],
    options: &AnalysisOptions,
) -> Report {
    if frames_processed < 2 {
        return insufficient(frames_processed, options);
    }

    let average_activity = timing::mean(&activity);
    let jerkiness = timing::std_dev(&activity);
    let timing_summary = TimingSummary::from_intervals(&intervals);

    let smoothness_rating = options
        .thresholds
        .classify(jerkiness, timing_summary.jitter_ms);

    let issues = classify::diagnose(
        jerkiness,
        timing_summary.jitter_ms,
        timing_summary.estimated_fps,
        average_activity,
        &options.thresholds,
    );

    let problem_windows = windows::detect_problem_windows(
        &activity,
        &intervals,
        sample_times_ms,
        average_activity,
        jerkiness,
        timing_summary.jitter_ms,
        options.min_window_len,
    );

    let summary = format!(
        "Overall scroll smoothness: {smoothness_rating} - {}. \
         Activity score: {average_activity:.2} (content movement level), \
         Jerkiness: {jerkiness:.2} (motion consistency, lower is better), \
         Frame-time jitter: {:.2} ms (timing stability, target < 8ms for smooth), \
         Estimated FPS: {:.1} (target: 60 FPS).",
        smoothness_rating.description(),
        timing_summary.jitter_ms,
        timing_summary.estimated_fps,
    );

    Report {
        frames_processed,
        average_activity,
        jerkiness,
        jitter_ms: timing_summary.jitter_ms,
        mean_interval_ms: timing_summary.mean_interval_ms,
        estimated_fps: timing_summary.estimated_fps,
        smoothness_rating,
        smoothness_description: smoothness_rating.description().to_string(),
        issues,
        problem_windows,
        summary,
        insufficient_data: false,
        activity_series: activity,
        interval_series: intervals,
    }
}

/// The report-shaped "not enough data" outcome.
///
/// Statistics are zeroed rather than NaN so the report stays serializable
/// and renderable; the rating is the (vacuous) classification of the
/// zeroed metrics, and the marker tells callers not to trust it.
fn insufficient(frames_processed: usize, options: &AnalysisOptions) -> Report {
    let smoothness_rating = options.thresholds.classify(0.0, 0.0);

    Report {
        frames_processed,
        average_activity: 0.0,
        jerkiness: 0.0,
        jitter_ms: 0.0,
        mean_interval_ms: 0.0,
        estimated_fps: 0.0,
        smoothness_rating,
        smoothness_description: smoothness_rating.description().to_string(),
        issues: vec![
            "Insufficient data: fewer than 2 usable samples were collected.".to_string(),
        ],
        problem_windows: Vec::new(),
        summary: format!(
            "Insufficient data: only {frames_processed} usable sample(s) were collected; \
             no smoothness statistics available."
        ),
        insufficient_data: true,
        activity_series: Vec::new(),
        interval_series: Vec::new(),
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "SCROLL SMOOTHNESS REPORT")?;
        writeln!(f, "{}", "=".repeat(50))?;

        if self.insufficient_data {
            writeln!(f, "INSUFFICIENT DATA")?;
            writeln!(f, "{}", self.summary)?;
            writeln!(f, "{}", "=".repeat(50))?;
            return Ok(());
        }

        writeln!(f, "Frames processed: {}", self.frames_processed)?;
        writeln!(f)?;
        writeln!(f, "Overall rating: {}", self.smoothness_rating)?;
        writeln!(f, "  {}", self.smoothness_description)?;
        writeln!(f)?;
        writeln!(f, "Key metrics:")?;
        writeln!(
            f,
            "  Activity score: {:.2} (content movement level)",
            self.average_activity,
        )?;
        writeln!(
            f,
            "  Jerkiness: {:.2} (motion consistency, lower is better)",
            self.jerkiness,
        )?;
        writeln!(
            f,
            "  Frame-time jitter: {:.2} ms (timing stability)",
            self.jitter_ms,
        )?;
        writeln!(f, "  Estimated FPS: {:.1} (target: 60 FPS)", self.estimated_fps)?;
        writeln!(f)?;
        writeln!(f, "Key takeaways:")?;
        for issue in &self.issues {
            writeln!(f, "  - {issue}")?;
        }

        if !self.problem_windows.is_empty() {
            writeln!(f)?;
            writeln!(f, "Where the experience is weakest:")?;
            for window in &self.problem_windows {
                writeln!(f, "  - {window}")?;
            }
        }

        writeln!(f, "{}", "=".repeat(50))?;
        Ok(())
    }
}
