//! Frame sources: where decoded frames come from.
//!
//! The analysis pipeline never opens or demuxes video containers itself —
//! it consumes any [`FrameSource`], an ordered provider of decoded frames
//! with capture timestamps. Screen-capture drivers, decoders, and test
//! harnesses all plug in behind this trait.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemorySource`] — frames already held in memory.
//! - [`ImageSequenceSource`] — numbered still images on disk
//!   (`frame_0.png`, `frame_1.png`, …), the layout written by
//!   screenshot-based capture sessions.
//!
//! # Example
//!
//! ```no_run
//! use scrollgauge::{AnalysisOptions, ImageSequenceSource, analyze};
//!
//! let source = ImageSequenceSource::open("session_output", 8.0)?;
//! let report = analyze(source, &AnalysisOptions::new())?;
//! println!("{report}");
//! # Ok::<(), scrollgauge::ScrollGaugeError>(())
//! ```

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{FrameDecodeError, ScrollGaugeError};

/// A decoded frame paired with its capture timestamp.
///
/// Timestamps are in milliseconds from the start of the recording and must
/// be non-decreasing across a source.
#[derive(Debug, Clone)]
pub struct TimedFrame {
    /// Capture timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// The decoded raster image. Converted to grayscale by the sampler.
    pub image: DynamicImage,
}

/// An ordered, pull-based provider of decoded frames.
///
/// Semantics of [`next_frame`](FrameSource::next_frame):
///
/// - `Ok(Some(frame))` — the next frame in capture order.
/// - `Ok(None)` — the stream is exhausted.
/// - `Err(_)` — this particular frame could not be produced. The stream is
///   not necessarily dead: the caller may pull again. The sampler treats a
///   failure on the very first frame as fatal and skips any later one.
///
/// Sources are not restartable; the pipeline reads each source exactly once,
/// in order.
pub trait FrameSource {
    /// Pull the next decoded frame, if any.
    fn next_frame(&mut self) -> Result<Option<TimedFrame>, FrameDecodeError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn next_frame(&mut self) -> Result<Option<TimedFrame>, FrameDecodeError> {
        (**self).next_frame()
    }
}

/// A frame source backed by an in-memory vector of frames.
///
/// Useful for GUI/web layers that already hold decoded frames, for capture
/// drivers that buffer screenshots, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    frames: Vec<TimedFrame>,
    position: usize,
}

impl MemorySource {
    /// Wrap a vector of frames. Frames are yielded in vector order.
    pub fn new(frames: Vec<TimedFrame>) -> Self {
        Self {
            frames,
            position: 0,
        }
    }

    /// Number of frames remaining.
    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.position)
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<TimedFrame>, FrameDecodeError> {
        let frame = self.frames.get(self.position).cloned();
        if frame.is_some() {
            self.position += 1;
        }
        Ok(frame)
    }
}

/// A frame source that reads a directory of numbered still images.
///
/// Capture sessions store one screenshot per scroll step (`frame_0.png`,
/// `frame_1.png`, …). The files carry no timestamps of their own, so this
/// source synthesizes them from the capture rate: frame `i` is stamped
/// `i * 1000 / fps` milliseconds.
///
/// Files are ordered by their numeric suffix, not lexically, so `frame_10`
/// sorts after `frame_9`.
#[derive(Debug)]
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    position: usize,
    frame_interval_ms: f64,
}

impl ImageSequenceSource {
    /// Supported image extensions, matched case-insensitively.
    const EXTENSIONS: [&'static str; 4] = ["png", "jpg", "jpeg", "bmp"];

    /// Open a directory of frame images captured at `fps` frames per second.
    ///
    /// # Errors
    ///
    /// Returns [`ScrollGaugeError::SourceOpen`] if the directory cannot be
    /// read, contains no image files, or `fps` is not positive.
    pub fn open(directory: impl AsRef<Path>, fps: f64) -> Result<Self, ScrollGaugeError> {
        let directory = directory.as_ref();

        if fps <= 0.0 {
            return Err(ScrollGaugeError::SourceOpen {
                path: directory.to_path_buf(),
                reason: format!("capture fps must be positive, got {fps}"),
            });
        }

        let entries = std::fs::read_dir(directory).map_err(|e| ScrollGaugeError::SourceOpen {
            path: directory.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        Self::EXTENSIONS
                            .iter()
                            .any(|supported| ext.eq_ignore_ascii_case(supported))
                    })
            })
            .collect();

        if paths.is_empty() {
            return Err(ScrollGaugeError::SourceOpen {
                path: directory.to_path_buf(),
                reason: "directory contains no frame images".to_string(),
            });
        }

        paths.sort_by_key(|path| (frame_sort_key(path), path.clone()));

        log::debug!(
            "Opened image sequence at {} ({} frames, {:.1} fps)",
            directory.display(),
            paths.len(),
            fps,
        );

        Ok(Self {
            paths,
            position: 0,
            frame_interval_ms: 1000.0 / fps,
        })
    }

    /// Total number of image files discovered at open time.
    pub fn frame_count(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<TimedFrame>, FrameDecodeError> {
        let Some(path) = self.paths.get(self.position) else {
            return Ok(None);
        };

        let index = self.position;
        self.position += 1;

        match image::open(path) {
            Ok(image) => Ok(Some(TimedFrame {
                timestamp_ms: index as f64 * self.frame_interval_ms,
                image,
            })),
            Err(e) => Err(FrameDecodeError::new(format!(
                "{}: {e}",
                path.display()
            ))),
        }
    }
}

/// Numeric sort key for `frame_<N>.<ext>` style names.
///
/// Files without a trailing number sort before numbered ones, among
/// themselves by path.
fn frame_sort_key(path: &Path) -> u64 {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| {
            let digits: String = stem
                .chars()
                .rev()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.chars().rev().collect::<String>().parse().ok()
        })
        .unwrap_or(0)
}
