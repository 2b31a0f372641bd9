//! Frame-timing statistics.
//!
//! [`TimingSummary`] condenses an inter-sample interval series into mean
//! interval, jitter (standard deviation), and estimated FPS. Degenerate
//! inputs (zero or one sample, zero mean) yield zeros rather than NaNs or
//! division faults.

/// Derived timing statistics for one recording.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingSummary {
    /// Mean gap between consecutive samples, in milliseconds.
    pub mean_interval_ms: f64,
    /// Standard deviation of the gaps, in milliseconds.
    pub jitter_ms: f64,
    /// `1000 / mean_interval_ms`, or `0.0` when the mean is not positive.
    pub estimated_fps: f64,
}

impl TimingSummary {
    /// Summarize an interval series.
    ///
    /// An empty series yields all zeros.
    pub fn from_intervals(intervals: &[f64]) -> Self {
        if intervals.is_empty() {
            return Self::default();
        }

        let mean_interval_ms = mean(intervals);
        let jitter_ms = std_dev(intervals);
        let estimated_fps = if mean_interval_ms > 0.0 {
            1000.0 / mean_interval_ms
        } else {
            0.0
        };

        Self {
            mean_interval_ms,
            jitter_ms,
            estimated_fps,
        }
    }
}

/// Arithmetic mean. `0.0` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. `0.0` for an empty slice.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
