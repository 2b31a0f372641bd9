//! The analysis pipeline.
//!
//! [`analyze`] runs the whole chain for one recording: validate the
//! configuration, sample the frame stream, estimate per-pair motion
//! activity, accumulate inter-sample intervals, and assemble the
//! [`Report`].
//!
//! The pipeline is single-threaded and strictly frame-ordered — jitter and
//! motion-spike detection are defined over ordered time series, so there
//! is no reordering and nothing suspends. Memory stays flat: only the
//! previous and current grayscale frame are alive at any point, plus the
//! accumulating numeric series.
//!
//! # Example
//!
//! ```no_run
//! use scrollgauge::{AnalysisOptions, ImageSequenceSource, analyze};
//!
//! let source = ImageSequenceSource::open("session_output", 8.0)?;
//! let report = analyze(source, &AnalysisOptions::new())?;
//!
//! println!("Rating: {}", report.smoothness_rating);
//! for issue in &report.issues {
//!     println!("  {issue}");
//! }
//! # Ok::<(), scrollgauge::ScrollGaugeError>(())
//! ```

use image::GrayImage;

use crate::error::ScrollGaugeError;
use crate::motion;
use crate::options::AnalysisOptions;
use crate::progress::{OperationType, ProgressTracker};
use crate::report::{self, Report};
use crate::sampler::FrameSampler;
use crate::source::FrameSource;

/// Analyze one recording and produce its smoothness [`Report`].
///
/// Reads the source exactly once, in order, honoring the configured stride
/// and sample cap. A recording that yields fewer than two usable samples
/// produces a report with its `insufficient_data` marker set rather than
/// an error.
///
/// # Errors
///
/// - [`ScrollGaugeError::InvalidConfiguration`] before any frame is read.
/// - [`ScrollGaugeError::FirstFrameDecode`] if the very first frame cannot
///   be decoded (later decode failures are skipped silently).
/// - [`ScrollGaugeError::Cancelled`] when the configured token fires.
pub fn analyze<S: FrameSource>(
    source: S,
    options: &AnalysisOptions,
) -> Result<Report, ScrollGaugeError> {
    analyze_impl(source, options, OperationType::Analysis)
}

pub(crate) fn analyze_impl<S: FrameSource>(
    source: S,
    options: &AnalysisOptions,
    operation: OperationType,
) -> Result<Report, ScrollGaugeError> {
    options.validate()?;

    log::debug!(
        "Analyzing recording (frame_skip={}, max_samples={}, block_size={})",
        options.frame_skip,
        options.max_samples,
        options.block_size,
    );

    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        operation,
        options.max_samples as u64,
        options.batch_size,
    );

    let mut previous: Option<GrayImage> = None;
    let mut last_timestamp_ms: Option<f64> = None;
    let mut activity: Vec<f64> = Vec::new();
    let mut intervals: Vec<f64> = Vec::new();
    let mut sample_times_ms: Vec<f64> = Vec::new();
    let mut samples = 0usize;

    for sample in FrameSampler::new(source, options) {
        if options.is_cancelled() {
            return Err(ScrollGaugeError::Cancelled);
        }

        let sample = sample?;

        if let Some(last) = last_timestamp_ms {
            intervals.push(sample.timestamp_ms - last);
        }
        last_timestamp_ms = Some(sample.timestamp_ms);

        if let Some(previous_image) = previous.as_ref() {
            activity.push(motion::block_activity(
                previous_image,
                &sample.image,
                options.block_size,
            ));
            sample_times_ms.push(sample.timestamp_ms);
        }

        tracker.advance(sample.frame_index, sample.timestamp_ms);

        // Release the older frame; only (previous, current) stay alive.
        previous = Some(sample.image);
        samples += 1;
    }

    tracker.finish();

    debug_assert_eq!(activity.len(), intervals.len());
    debug_assert_eq!(activity.len(), samples.saturating_sub(1));

    log::debug!(
        "Collected {samples} samples ({} activity values)",
        activity.len(),
    );

    Ok(report::build(
        samples,
        activity,
        intervals,
        &sample_times_ms,
        options,
    ))
}
