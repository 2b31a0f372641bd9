//! Smoothness rating and diagnostic issue detection.
//!
//! The rating is a pure function of jerkiness and jitter against a
//! threshold table. A recording must clear *both* bands to earn a rating —
//! equivalently, it gets the worse of its two individual bands. The table
//! itself is a configuration parameter ([`RatingThresholds`]) because the
//! appropriate bounds depend on the capture pipeline's target frame rate;
//! the defaults are calibrated for a 60 FPS scroll (16.67 ms frames).

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Categorical smoothness rating.
///
/// Ordered worst-to-best, so the derived `Ord` ranks `Excellent` highest —
/// comparison logic relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    /// Significant stutter and lag.
    Poor,
    /// Noticeable lag or stutter, but acceptable.
    Fair,
    /// Smooth with minimal stutter.
    Good,
    /// Perfectly smooth.
    Excellent,
}

impl Rating {
    /// One-line description of what the rating means for the viewer.
    pub fn description(self) -> &'static str {
        match self {
            Rating::Excellent => "Perfectly smooth scrolling - meets industry benchmark standards",
            Rating::Good => "Smooth scrolling with minimal stutter",
            Rating::Fair => "Noticeable lag or stutter, but acceptable performance",
            Rating::Poor => "Significant stutter and lag - below industry standards",
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        };
        write!(f, "{label}")
    }
}

/// Rating threshold table.
///
/// A metric value strictly below the `excellent`/`good`/`fair` bound falls
/// in that band; at or above the `fair` bound it is `Poor`. Bounds must be
/// strictly increasing — [`AnalysisOptions::validate`] enforces this.
///
/// [`AnalysisOptions::validate`]: crate::AnalysisOptions::validate
///
/// # Example
///
/// ```
/// use scrollgauge::{Rating, RatingThresholds};
///
/// let thresholds = RatingThresholds::default();
/// assert_eq!(thresholds.classify(0.5, 1.0), Rating::Excellent);
/// assert_eq!(thresholds.classify(0.5, 20.0), Rating::Poor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct RatingThresholds {
    /// Jerkiness below this is Excellent.
    pub jerkiness_excellent: f64,
    /// Jerkiness below this is Good.
    pub jerkiness_good: f64,
    /// Jerkiness below this is Fair; at or above, Poor.
    pub jerkiness_fair: f64,
    /// Jitter (ms) below this is Excellent.
    pub jitter_excellent_ms: f64,
    /// Jitter (ms) below this is Good.
    pub jitter_good_ms: f64,
    /// Jitter (ms) below this is Fair; at or above, Poor.
    pub jitter_fair_ms: f64,
}

impl Default for RatingThresholds {
    /// 60 FPS target: 16.67 ms per frame.
    fn default() -> Self {
        Self {
            jerkiness_excellent: 2.0,
            jerkiness_good: 5.0,
            jerkiness_fair: 10.0,
            jitter_excellent_ms: 3.0,
            jitter_good_ms: 8.0,
            jitter_fair_ms: 16.0,
        }
    }
}

impl RatingThresholds {
    /// Classify a (jerkiness, jitter) pair.
    ///
    /// Pure and deterministic: the result is the worse of the two
    /// per-metric bands, so improving one metric never hurts the rating.
    pub fn classify(&self, jerkiness: f64, jitter_ms: f64) -> Rating {
        let jerkiness_band = band(
            jerkiness,
            self.jerkiness_excellent,
            self.jerkiness_good,
            self.jerkiness_fair,
        );
        let jitter_band = band(
            jitter_ms,
            self.jitter_excellent_ms,
            self.jitter_good_ms,
            self.jitter_fair_ms,
        );
        jerkiness_band.min(jitter_band)
    }

    /// Returns an error message when the bounds are not strictly
    /// increasing.
    pub(crate) fn check(&self) -> Result<(), String> {
        let jerkiness_ordered = self.jerkiness_excellent < self.jerkiness_good
            && self.jerkiness_good < self.jerkiness_fair;
        let jitter_ordered = self.jitter_excellent_ms < self.jitter_good_ms
            && self.jitter_good_ms < self.jitter_fair_ms;

        if !jerkiness_ordered || !jitter_ordered {
            return Err(format!(
                "rating thresholds must be strictly increasing \
                 (jerkiness {}/{}/{}, jitter {}/{}/{})",
                self.jerkiness_excellent,
                self.jerkiness_good,
                self.jerkiness_fair,
                self.jitter_excellent_ms,
                self.jitter_good_ms,
                self.jitter_fair_ms,
            ));
        }
        Ok(())
    }
}

/// Band a single metric against its three upper bounds.
fn band(value: f64, excellent: f64, good: f64, fair: f64) -> Rating {
    if value < excellent {
        Rating::Excellent
    } else if value < good {
        Rating::Good
    } else if value < fair {
        Rating::Fair
    } else {
        Rating::Poor
    }
}

/// Estimated FPS below this triggers a "low frame rate" issue.
const LOW_FPS_BOUND: f64 = 50.0;

/// Mean activity below this triggers a "low scroll activity" issue.
const LOW_ACTIVITY_BOUND: f64 = 1.0;

/// Build the diagnostic issue list for a recording.
///
/// Issues are additive, not mutually exclusive, and appear in a fixed
/// check order: jerkiness, jitter, frame rate, activity. When nothing
/// fires, a single all-clear entry is returned so the list is never empty.
pub(crate) fn diagnose(
    jerkiness: f64,
    jitter_ms: f64,
    estimated_fps: f64,
    average_activity: f64,
    thresholds: &RatingThresholds,
) -> Vec<String> {
    let mut issues = Vec::new();

    if jerkiness >= thresholds.jerkiness_fair {
        issues.push(format!(
            "High jerkiness ({jerkiness:.2}): Scrolling motion is very uneven and jerky."
        ));
    } else if jerkiness >= thresholds.jerkiness_good {
        issues.push(format!(
            "Moderate jerkiness ({jerkiness:.2}): Some uneven motion detected."
        ));
    }

    if jitter_ms >= thresholds.jitter_fair_ms {
        issues.push(format!(
            "High frame-time jitter ({jitter_ms:.2} ms): Significant frame timing variation \
             causing stutter (target: < {:.0}ms for 60 FPS).",
            thresholds.jitter_fair_ms,
        ));
    } else if jitter_ms >= thresholds.jitter_good_ms {
        issues.push(format!(
            "Moderate frame-time jitter ({jitter_ms:.2} ms): Some frame timing inconsistency \
             (target: < {:.0}ms for smooth).",
            thresholds.jitter_good_ms,
        ));
    }

    if estimated_fps > 0.0 && estimated_fps < LOW_FPS_BOUND {
        issues.push(format!(
            "Low frame rate (estimated {estimated_fps:.1} FPS): Below optimal 60 FPS target."
        ));
    }

    if average_activity < LOW_ACTIVITY_BOUND {
        issues.push(
            "Low scroll activity: Scrolling speed is very low and may feel sluggish.".to_string(),
        );
    }

    if issues.is_empty() {
        issues.push(
            "No major problems detected — scrolling meets industry standards.".to_string(),
        );
    }

    issues
}
