//! Head-to-head comparison of two recordings.
//!
//! [`compare`] runs the full pipeline once per recording, then derives
//! per-metric winners and a tie-broken overall winner. A single scalar
//! score would obscure which axis actually differs between two recordings
//! of equal qualitative rating, so every axis is reported separately and
//! the overall verdict is a multi-level tie-break: rating, then jitter,
//! then jerkiness, then an explicit tie — never a silent coin-flip.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::analysis::analyze_impl;
use crate::error::ScrollGaugeError;
use crate::options::AnalysisOptions;
use crate::progress::OperationType;
use crate::report::Report;
use crate::source::FrameSource;

/// Which recording won a metric (or the overall verdict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// The first recording.
    #[serde(rename = "recording_1")]
    First,
    /// The second recording.
    #[serde(rename = "recording_2")]
    Second,
    /// Exactly equal on this axis.
    #[serde(rename = "tie")]
    Tie,
}

impl Display for Winner {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Winner::First => "Recording 1",
            Winner::Second => "Recording 2",
            Winner::Tie => "Tie",
        };
        write!(f, "{label}")
    }
}

/// The outcome of comparing two recordings.
///
/// Holds both full reports plus the derived winners. Winners are always
/// resolvable: every field is `First`, `Second`, or `Tie`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Full report for the first recording.
    pub first: Report,
    /// Full report for the second recording.
    pub second: Report,
    /// Lower jerkiness wins.
    pub better_jerkiness: Winner,
    /// Lower jitter wins.
    pub better_jitter: Winner,
    /// Higher estimated FPS wins.
    pub better_fps: Winner,
    /// Tie-broken overall verdict: rating, then jitter, then jerkiness.
    pub overall_winner: Winner,
}

impl Display for ComparisonResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "COMPARISON RESULTS")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Overall winner: {}", self.overall_winner)?;
        writeln!(f)?;
        writeln!(
            f,
            "Rating:      {} vs {}",
            self.first.smoothness_rating, self.second.smoothness_rating,
        )?;
        writeln!(
            f,
            "Jerkiness:   {:.2} vs {:.2} (lower is better) -> {}",
            self.first.jerkiness, self.second.jerkiness, self.better_jerkiness,
        )?;
        writeln!(
            f,
            "Jitter:      {:.2} ms vs {:.2} ms (lower is better) -> {}",
            self.first.jitter_ms, self.second.jitter_ms, self.better_jitter,
        )?;
        writeln!(
            f,
            "Est. FPS:    {:.1} vs {:.1} (higher is better) -> {}",
            self.first.estimated_fps, self.second.estimated_fps, self.better_fps,
        )?;
        writeln!(f, "{}", "=".repeat(60))?;
        Ok(())
    }
}

/// Analyze two recordings and compare them.
///
/// Runs [`analyze`](crate::analyze) on each source sequentially with the
/// same options, then combines the reports via [`compare_reports`]. The
/// two pipelines share no mutable state, so a parallel variant (feature
/// `rayon`) produces identical output.
///
/// # Errors
///
/// Any error from analyzing either recording, reported for the first
/// source first.
pub fn compare<A, B>(
    first: A,
    second: B,
    options: &AnalysisOptions,
) -> Result<ComparisonResult, ScrollGaugeError>
where
    A: FrameSource,
    B: FrameSource,
{
    options.validate()?;

    log::debug!("Comparing two recordings");
    let first = analyze_impl(first, options, OperationType::Comparison)?;
    let second = analyze_impl(second, options, OperationType::Comparison)?;

    Ok(compare_reports(first, second))
}

/// Derive winners from two already-built reports.
///
/// Per-metric: lower jerkiness wins, lower jitter wins, higher FPS wins;
/// exact equality is an explicit [`Winner::Tie`]. Overall: higher rating
/// wins; on a rating tie, lower jitter; then lower jerkiness; then tie.
pub fn compare_reports(first: Report, second: Report) -> ComparisonResult {
    let better_jerkiness = lower_wins(first.jerkiness, second.jerkiness);
    let better_jitter = lower_wins(first.jitter_ms, second.jitter_ms);
    let better_fps = higher_wins(first.estimated_fps, second.estimated_fps);

    let overall_winner = if first.smoothness_rating != second.smoothness_rating {
        if first.smoothness_rating > second.smoothness_rating {
            Winner::First
        } else {
            Winner::Second
        }
    } else if better_jitter != Winner::Tie {
        better_jitter
    } else {
        better_jerkiness
    };

    ComparisonResult {
        first,
        second,
        better_jerkiness,
        better_jitter,
        better_fps,
        overall_winner,
    }
}

/// Winner for a lower-is-better metric.
fn lower_wins(first: f64, second: f64) -> Winner {
    if first < second {
        Winner::First
    } else if second < first {
        Winner::Second
    } else {
        Winner::Tie
    }
}

/// Winner for a higher-is-better metric.
fn higher_wins(first: f64, second: f64) -> Winner {
    lower_wins(second, first)
}
