//! Lazy, pull-based frame sampling.
//!
//! [`FrameSampler`] implements [`Iterator`] and pulls frames on demand —
//! each call to [`next()`](Iterator::next) reads just enough source frames
//! to produce the next retained sample. Only every `frame_skip`-th decoded
//! frame is kept, and at most `max_samples` samples are ever produced, so
//! iteration terminates even on sources that never signal end-of-stream.
//!
//! Retained frames are converted to grayscale here; downstream stages never
//! see color data.

use image::GrayImage;

use crate::error::ScrollGaugeError;
use crate::options::AnalysisOptions;
use crate::source::FrameSource;

/// One retained, decoded, timestamped frame.
///
/// Produced by [`FrameSampler`] after stride and cap filtering. The
/// grayscale image is owned by the sample and dropped as soon as the motion
/// estimator has consumed it — the pipeline holds at most two at a time.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Capture timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Index of this frame in the decoded stream (before stride filtering).
    pub frame_index: u64,
    /// The frame, converted to 8-bit grayscale.
    pub image: GrayImage,
}

/// A lazy iterator over retained [`Sample`]s.
///
/// Yields `Err` at most once, for a fatal first-frame decode failure;
/// decode failures on later frames are skipped with a debug log and only
/// lower the effective sample count. The iterator fuses after the first
/// error or after the sample cap is reached.
pub struct FrameSampler<S> {
    source: S,
    frame_skip: u64,
    max_samples: usize,
    /// Index of the next frame expected from the source.
    frame_index: u64,
    /// Samples yielded so far.
    collected: usize,
    done: bool,
}

impl<S: FrameSource> FrameSampler<S> {
    /// Create a sampler over `source` with the stride and cap from
    /// `options`.
    ///
    /// The options are assumed to be validated; [`analyze`](crate::analyze)
    /// rejects invalid configurations before constructing a sampler.
    pub fn new(source: S, options: &AnalysisOptions) -> Self {
        Self {
            source,
            frame_skip: u64::from(options.frame_skip.max(1)),
            max_samples: options.max_samples,
            frame_index: 0,
            collected: 0,
            done: false,
        }
    }

    /// Number of samples yielded so far.
    pub fn samples_collected(&self) -> usize {
        self.collected
    }
}

impl<S: FrameSource> Iterator for FrameSampler<S> {
    type Item = Result<Sample, ScrollGaugeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.collected >= self.max_samples {
            return None;
        }

        loop {
            let index = self.frame_index;

            match self.source.next_frame() {
                Ok(Some(frame)) => {
                    self.frame_index += 1;

                    // Stride filter: keep frame 0, frame_skip, 2*frame_skip, …
                    if index % self.frame_skip != 0 {
                        continue;
                    }

                    self.collected += 1;
                    return Some(Ok(Sample {
                        timestamp_ms: frame.timestamp_ms,
                        frame_index: index,
                        image: frame.image.into_luma8(),
                    }));
                }
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) if index == 0 => {
                    // An unreadable first frame means the source itself is
                    // broken, not just one frame of it.
                    self.done = true;
                    return Some(Err(ScrollGaugeError::FirstFrameDecode(e.reason)));
                }
                Err(e) => {
                    log::debug!("Skipping undecodable frame {index}: {}", e.reason);
                    self.frame_index += 1;
                    // Keep pulling; the next decodable on-stride frame
                    // becomes the sample.
                }
            }
        }
    }
}
