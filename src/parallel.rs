//! Parallel two-recording comparison.
//!
//! This module provides [`compare_parallel`] which analyzes the two
//! recordings of a comparison on separate rayon threads. The two pipelines
//! share no mutable state (each worker owns its source and its series), so
//! the result is identical to the sequential [`compare`](crate::compare) —
//! parallelism here is purely a wall-clock optimization.
//!
//! Available when the `rayon` feature is enabled.

use crate::analysis::analyze_impl;
use crate::compare::{ComparisonResult, compare_reports};
use crate::error::ScrollGaugeError;
use crate::options::AnalysisOptions;
use crate::progress::OperationType;
use crate::source::FrameSource;

/// Analyze two recordings on rayon threads and compare them.
///
/// Semantically identical to [`compare`](crate::compare); sources must be
/// [`Send`] so they can move to worker threads. When both analyses fail,
/// the first recording's error is reported.
///
/// # Errors
///
/// Same as [`compare`](crate::compare).
pub fn compare_parallel<A, B>(
    first: A,
    second: B,
    options: &AnalysisOptions,
) -> Result<ComparisonResult, ScrollGaugeError>
where
    A: FrameSource + Send,
    B: FrameSource + Send,
{
    options.validate()?;

    log::debug!("Comparing two recordings (parallel)");
    let (first, second) = rayon::join(
        || analyze_impl(first, options, OperationType::Comparison),
        || analyze_impl(second, options, OperationType::Comparison),
    );

    Ok(compare_reports(first?, second?))
}
