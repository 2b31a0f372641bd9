//! Analysis configuration.
//!
//! [`AnalysisOptions`] is a builder that threads sampling parameters,
//! rating thresholds, progress callbacks, and cancellation tokens through
//! the pipeline without polluting every function signature.
//!
//! # Example
//!
//! ```
//! use scrollgauge::{AnalysisOptions, CancellationToken};
//!
//! let token = CancellationToken::new();
//! let options = AnalysisOptions::new()
//!     .with_frame_skip(2)
//!     .with_max_samples(500)
//!     .with_cancellation(token.clone());
//! assert!(options.validate().is_ok());
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::classify::RatingThresholds;
use crate::error::ScrollGaugeError;
use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};

/// Configuration for analysis operations.
///
/// All fields have defaults matching the reference scroll-capture setup:
/// every 5th frame is retained, at most 2000 samples, 32-pixel motion
/// blocks, 2-sample minimum problem windows, and the 60 FPS threshold
/// table.
///
/// Invalid values are not clamped at build time; [`analyze`](crate::analyze)
/// calls [`validate`](AnalysisOptions::validate) and rejects the
/// configuration before reading any frame.
#[derive(Clone)]
pub struct AnalysisOptions {
    /// Retain every `frame_skip`-th decoded frame. Must be ≥ 1.
    pub frame_skip: u32,
    /// Hard cap on retained samples. Must be > 0. Guarantees termination
    /// even on unbounded sources.
    pub max_samples: usize,
    /// Edge length of the square motion-estimation blocks, in pixels.
    /// Must be > 0.
    pub block_size: u32,
    /// Minimum contiguous length (in samples) of a reported problem
    /// window. Must be ≥ 1.
    pub min_window_len: usize,
    /// Rating threshold table.
    pub thresholds: RatingThresholds,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Cancellation token. `None` means never cancelled.
    pub(crate) cancellation: Option<CancellationToken>,
    /// How often to fire the progress callback (every N samples).
    pub(crate) batch_size: u64,
}

impl Debug for AnalysisOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnalysisOptions")
            .field("frame_skip", &self.frame_skip)
            .field("max_samples", &self.max_samples)
            .field("block_size", &self.block_size)
            .field("min_window_len", &self.min_window_len)
            .field("thresholds", &self.thresholds)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisOptions {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self {
            frame_skip: 5,
            max_samples: 2000,
            block_size: 32,
            min_window_len: 2,
            thresholds: RatingThresholds::default(),
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
        }
    }

    /// Set the sampling stride (retain every Nth decoded frame).
    #[must_use]
    pub fn with_frame_skip(mut self, frame_skip: u32) -> Self {
        self.frame_skip = frame_skip;
        self
    }

    /// Set the hard cap on retained samples.
    #[must_use]
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Set the motion-estimation block edge length in pixels.
    #[must_use]
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the minimum problem-window length in samples.
    #[must_use]
    pub fn with_min_window_len(mut self, min_window_len: usize) -> Self {
        self.min_window_len = min_window_len;
        self
    }

    /// Replace the rating threshold table.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: RatingThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Attach a progress callback.
    ///
    /// The callback is invoked every
    /// [`batch_size`](AnalysisOptions::with_batch_size) retained samples.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled, the analysis loop stops and returns
    /// [`ScrollGaugeError::Cancelled`].
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set how often the progress callback fires.
    ///
    /// A value of 1 means every sample; 10 means every 10th sample.
    /// Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Check the configuration for invalid values.
    ///
    /// Called by [`analyze`](crate::analyze) before any frame is read.
    ///
    /// # Errors
    ///
    /// [`ScrollGaugeError::InvalidConfiguration`] naming the offending
    /// field.
    pub fn validate(&self) -> Result<(), ScrollGaugeError> {
        if self.frame_skip < 1 {
            return Err(ScrollGaugeError::InvalidConfiguration(
                "frame_skip must be at least 1".to_string(),
            ));
        }
        if self.max_samples == 0 {
            return Err(ScrollGaugeError::InvalidConfiguration(
                "max_samples must be greater than 0".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(ScrollGaugeError::InvalidConfiguration(
                "block_size must be greater than 0".to_string(),
            ));
        }
        if self.min_window_len < 1 {
            return Err(ScrollGaugeError::InvalidConfiguration(
                "min_window_len must be at least 1".to_string(),
            ));
        }
        self.thresholds
            .check()
            .map_err(ScrollGaugeError::InvalidConfiguration)?;
        Ok(())
    }

    /// Returns `true` if cancellation has been requested.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}
