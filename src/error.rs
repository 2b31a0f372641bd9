//! Error types for the `scrollgauge` crate.
//!
//! This module defines [`ScrollGaugeError`], the unified error type returned
//! by all fallible operations in the crate, plus [`FrameDecodeError`], the
//! lightweight per-frame failure a [`FrameSource`](crate::FrameSource)
//! reports when a single frame cannot be produced.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `scrollgauge` operations.
///
/// Every public method that can fail returns `Result<T, ScrollGaugeError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
///
/// Note that two of the outcomes described by the analysis contract are
/// deliberately *not* variants here: a non-first frame that fails to decode
/// is skipped silently (it only lowers the effective sample count), and a
/// recording with fewer than two usable samples produces a [`Report`] with
/// its `insufficient_data` marker set rather than an error.
///
/// [`Report`]: crate::Report
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScrollGaugeError {
    /// The frame source could not be opened.
    #[error("Failed to open frame source at {path}: {reason}")]
    SourceOpen {
        /// Path that was passed to the source constructor.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The very first frame of the source could not be decoded.
    ///
    /// Later frames are allowed to fail (they are skipped), but an
    /// undecodable first frame means the source as a whole is unusable.
    #[error("Failed to decode the first frame: {0}")]
    FirstFrameDecode(String),

    /// Invalid analysis configuration, rejected before any frame is read.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The operation was cancelled via a
    /// [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,

    /// An I/O error occurred while reading source frames.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during frame loading or conversion.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

/// A single frame could not be decoded or read.
///
/// Returned by [`FrameSource::next_frame`](crate::FrameSource::next_frame)
/// for per-frame failures. The stream itself may still be able to continue;
/// the sampler decides whether the failure is fatal (first frame) or
/// skippable (any later frame).
#[derive(Debug, Clone, Error)]
#[error("Failed to decode frame: {reason}")]
pub struct FrameDecodeError {
    /// Human-readable reason the frame could not be produced.
    pub reason: String,
}

impl FrameDecodeError {
    /// Build a decode error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
