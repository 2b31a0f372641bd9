//! FrameSampler stride, cap, and conversion tests.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use scrollgauge::{
    AnalysisOptions, FrameDecodeError, FrameSampler, FrameSource, MemorySource, TimedFrame,
};

fn gray_frame(index: usize, value: u8) -> TimedFrame {
    TimedFrame {
        timestamp_ms: index as f64 * 100.0,
        image: DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 16, Luma([value]))),
    }
}

fn frames(count: usize) -> MemorySource {
    MemorySource::new((0..count).map(|i| gray_frame(i, 128)).collect())
}

#[test]
fn stride_keeps_every_nth_frame_anchored_at_zero() {
    let options = AnalysisOptions::new().with_frame_skip(5);
    let samples: Vec<_> = FrameSampler::new(frames(20), &options)
        .collect::<Result<Vec<_>, _>>()
        .expect("Sampling should succeed");

    let indices: Vec<u64> = samples.iter().map(|s| s.frame_index).collect();
    assert_eq!(indices, vec![0, 5, 10, 15]);
}

#[test]
fn stride_of_one_keeps_everything() {
    let options = AnalysisOptions::new().with_frame_skip(1);
    let samples: Vec<_> = FrameSampler::new(frames(7), &options)
        .collect::<Result<Vec<_>, _>>()
        .expect("Sampling should succeed");
    assert_eq!(samples.len(), 7);
}

#[test]
fn sample_cap_terminates_unbounded_sources() {
    /// A source that never signals end-of-stream.
    struct EndlessSource {
        index: usize,
    }

    impl FrameSource for EndlessSource {
        fn next_frame(&mut self) -> Result<Option<TimedFrame>, FrameDecodeError> {
            let frame = gray_frame(self.index, 0);
            self.index += 1;
            Ok(Some(frame))
        }
    }

    let options = AnalysisOptions::new().with_frame_skip(1).with_max_samples(10);
    let samples: Vec<_> = FrameSampler::new(EndlessSource { index: 0 }, &options)
        .collect::<Result<Vec<_>, _>>()
        .expect("Sampling should succeed");
    assert_eq!(samples.len(), 10);
}

#[test]
fn timestamps_survive_sampling() {
    let options = AnalysisOptions::new().with_frame_skip(2);
    let samples: Vec<_> = FrameSampler::new(frames(6), &options)
        .collect::<Result<Vec<_>, _>>()
        .expect("Sampling should succeed");

    let times: Vec<f64> = samples.iter().map(|s| s.timestamp_ms).collect();
    assert_eq!(times, vec![0.0, 200.0, 400.0]);
}

#[test]
fn color_frames_are_converted_to_grayscale() {
    let color = TimedFrame {
        timestamp_ms: 0.0,
        image: DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 0, 0]))),
    };
    let options = AnalysisOptions::new().with_frame_skip(1);
    let samples: Vec<_> = FrameSampler::new(MemorySource::new(vec![color]), &options)
        .collect::<Result<Vec<_>, _>>()
        .expect("Sampling should succeed");

    assert_eq!(samples.len(), 1);
    // Pure red converts to a mid-dark gray, not black or white.
    let luma = samples[0].image.get_pixel(0, 0).0[0];
    assert!(luma > 0 && luma < 128, "Unexpected luma for red: {luma}");
}

#[test]
fn sampler_is_fused_after_exhaustion() {
    let options = AnalysisOptions::new().with_frame_skip(1);
    let mut sampler = FrameSampler::new(frames(2), &options);
    assert!(sampler.next().is_some());
    assert!(sampler.next().is_some());
    assert!(sampler.next().is_none());
    assert!(sampler.next().is_none());
    assert_eq!(sampler.samples_collected(), 2);
}
