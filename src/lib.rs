//! # scrollgauge
//!
//! Quantify scrolling smoothness from decoded video frames.
//!
//! `scrollgauge` turns raw frame-to-frame pixel changes and frame arrival
//! timestamps into motion-activity, jerkiness, and timing-jitter metrics,
//! a categorical smoothness rating, flagged problem windows, and — when
//! two recordings are supplied — a head-to-head comparison with a declared
//! winner per metric and overall.
//!
//! The crate is the analysis core only: frames arrive already decoded,
//! through any [`FrameSource`] (screen-capture drivers, video decoders,
//! image sequences on disk, in-memory buffers). Container demuxing, chart
//! rendering, and device automation live in the calling layers.
//!
//! ## Quick Start
//!
//! ### Analyze a capture session
//!
//! ```no_run
//! use scrollgauge::{AnalysisOptions, ImageSequenceSource, analyze};
//!
//! let source = ImageSequenceSource::open("session_output", 8.0).unwrap();
//! let report = analyze(source, &AnalysisOptions::new()).unwrap();
//!
//! println!("{report}");
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```
//!
//! ### Compare two recordings
//!
//! ```no_run
//! use scrollgauge::{AnalysisOptions, ImageSequenceSource, compare};
//!
//! let before = ImageSequenceSource::open("before", 8.0).unwrap();
//! let after = ImageSequenceSource::open("after", 8.0).unwrap();
//!
//! let result = compare(before, after, &AnalysisOptions::new()).unwrap();
//! println!("Overall winner: {}", result.overall_winner);
//! ```
//!
//! ## How the metrics are computed
//!
//! - **Activity** — consecutive sampled frames are partitioned into
//!   32-pixel blocks; each pair contributes the mean of per-block mean
//!   absolute pixel differences.
//! - **Jerkiness** — standard deviation of the activity series; motion
//!   consistency, lower is better.
//! - **Jitter** — standard deviation of inter-sample intervals in
//!   milliseconds; timing consistency, lower is better.
//! - **Rating** — the worse of the jerkiness and jitter bands against a
//!   configurable threshold table ([`RatingThresholds`]).
//! - **Problem windows** — contiguous spans where activity or intervals
//!   sit far outside their own distribution.
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `rayon` | [`compare_parallel`] analyzes the two recordings of a comparison on rayon threads |

pub mod analysis;
pub mod classify;
pub mod compare;
pub mod error;
pub mod motion;
pub mod options;
#[cfg(feature = "rayon")]
pub mod parallel;
pub mod progress;
pub mod report;
pub mod sampler;
pub mod source;
pub mod timing;
pub mod windows;

pub use analysis::analyze;
pub use classify::{Rating, RatingThresholds};
pub use compare::{ComparisonResult, Winner, compare, compare_reports};
pub use error::{FrameDecodeError, ScrollGaugeError};
pub use motion::{block_activity, changed_fraction, screen_moved};
pub use options::AnalysisOptions;
#[cfg(feature = "rayon")]
pub use parallel::compare_parallel;
pub use progress::{CancellationToken, OperationType, ProgressCallback, ProgressInfo};
pub use report::Report;
pub use sampler::{FrameSampler, Sample};
pub use source::{FrameSource, ImageSequenceSource, MemorySource, TimedFrame};
pub use timing::TimingSummary;
pub use windows::{ProblemWindow, WindowKind};
