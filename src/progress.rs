//! Progress reporting and cancellation support.
//!
//! This module provides [`ProgressCallback`] for monitoring analysis
//! progress, [`CancellationToken`] for cooperative cancellation, and
//! [`ProgressInfo`] for per-sample progress snapshots.
//!
//! The analysis core never talks to a UI directly: it reports through the
//! callback and returns values, and the calling layer (CLI progress bar,
//! GUI channel, web socket) decides what to do with the notifications.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scrollgauge::{
//!     AnalysisOptions, CancellationToken, ImageSequenceSource, ProgressCallback,
//!     ProgressInfo, ScrollGaugeError, analyze,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("[{:?}] {} samples", info.operation, info.samples);
//!     }
//! }
//!
//! let source = ImageSequenceSource::open("session_output", 8.0)?;
//! let options = AnalysisOptions::new().with_progress(Arc::new(PrintProgress));
//! let report = analyze(source, &options)?;
//! # Ok::<(), ScrollGaugeError>(())
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

/// The kind of operation currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Analyzing a single recording.
    Analysis,
    /// Analyzing two recordings for comparison.
    Comparison,
}

/// A snapshot of analysis progress.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled
/// by [`AnalysisOptions::with_batch_size`](crate::AnalysisOptions).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many samples have been retained so far.
    pub samples: u64,
    /// Upper bound on samples (the configured cap). The actual total may
    /// be lower when the source runs out first.
    pub sample_cap: u64,
    /// Wall-clock time elapsed since the operation started.
    pub elapsed: Duration,
    /// Decoded-stream index of the frame currently being processed.
    pub current_frame: Option<u64>,
    /// Capture timestamp (ms) of the frame currently being processed.
    pub current_timestamp_ms: Option<f64>,
}

/// Trait for receiving progress updates during analysis.
///
/// Implementations must be [`Send`] and [`Sync`] because callbacks may be
/// invoked from worker threads when two recordings are analyzed in
/// parallel.
///
/// Progress callbacks are **infallible** — they observe but cannot halt
/// the operation. Use [`CancellationToken`] for cooperative cancellation.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during an analysis run.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clone this token and share it between threads; call
/// [`cancel`](CancellationToken::cancel) from any thread to request
/// cancellation of the associated operation. The analysis loop checks
/// [`is_cancelled`](CancellationToken::is_cancelled) before each sample.
///
/// # Example
///
/// ```
/// use scrollgauge::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// // From another thread (or a signal handler, etc.):
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    ///
    /// All clones of this token will observe the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal helper that tracks progress timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    sample_cap: u64,
    samples: u64,
    batch_size: u64,
    start_time: Instant,
    samples_since_last_report: u64,
}

impl ProgressTracker {
    /// Create a new tracker.
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        sample_cap: u64,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            sample_cap,
            samples: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            samples_since_last_report: 0,
        }
    }

    /// Record one retained sample and fire the callback if the batch
    /// threshold is reached.
    pub(crate) fn advance(&mut self, frame_index: u64, timestamp_ms: f64) {
        self.samples += 1;
        self.samples_since_last_report += 1;

        if self.samples_since_last_report >= self.batch_size {
            self.report(Some(frame_index), Some(timestamp_ms));
            self.samples_since_last_report = 0;
        }
    }

    /// Unconditionally emit a final progress report.
    pub(crate) fn finish(&mut self) {
        self.report(None, None);
    }

    fn report(&self, current_frame: Option<u64>, current_timestamp_ms: Option<f64>) {
        let info = ProgressInfo {
            operation: self.operation,
            samples: self.samples,
            sample_cap: self.sample_cap,
            elapsed: self.start_time.elapsed(),
            current_frame,
            current_timestamp_ms,
        };

        self.callback.on_progress(&info);
    }
}
