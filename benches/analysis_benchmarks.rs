//! Benchmarks for motion estimation and full-pipeline analysis.
//!
//! Run with: cargo bench
//! Run with all features: cargo bench --all-features
//!
//! All inputs are synthesized in memory, so the benchmarks need no
//! fixtures and produce deterministic workloads.

use criterion::Criterion;
use image::{DynamicImage, GrayImage, Luma};
use scrollgauge::{
    AnalysisOptions, MemorySource, TimedFrame, analyze, block_activity, changed_fraction,
    compare,
};

/// A frame with a deterministic diagonal gradient shifted by `offset`,
/// approximating scrolled page content.
fn gradient_frame(width: u32, height: u32, offset: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        Luma([((x + y + offset) % 256) as u8])
    })
}

/// A synthetic scroll recording: the gradient shifts by `step` pixels per
/// frame at a steady 16 ms cadence.
fn scroll_recording(frames: usize, width: u32, height: u32, step: u32) -> MemorySource {
    MemorySource::new(
        (0..frames)
            .map(|i| TimedFrame {
                timestamp_ms: i as f64 * 16.0,
                image: DynamicImage::ImageLuma8(gradient_frame(
                    width,
                    height,
                    i as u32 * step,
                )),
            })
            .collect(),
    )
}

fn benchmark_block_activity(criterion: &mut Criterion) {
    let previous = gradient_frame(1280, 720, 0);
    let current = gradient_frame(1280, 720, 7);

    criterion.bench_function("block activity 720p (32px blocks)", |bencher| {
        bencher.iter(|| block_activity(&previous, &current, 32));
    });

    criterion.bench_function("block activity 720p (16px blocks)", |bencher| {
        bencher.iter(|| block_activity(&previous, &current, 16));
    });

    let small_previous = gradient_frame(640, 360, 0);
    let small_current = gradient_frame(640, 360, 7);
    criterion.bench_function("block activity 360p (32px blocks)", |bencher| {
        bencher.iter(|| block_activity(&small_previous, &small_current, 32));
    });
}

fn benchmark_changed_fraction(criterion: &mut Criterion) {
    let previous = gradient_frame(1280, 720, 0);
    let current = gradient_frame(1280, 720, 40);

    criterion.bench_function("changed fraction 720p", |bencher| {
        bencher.iter(|| changed_fraction(&previous, &current));
    });
}

fn benchmark_full_analysis(criterion: &mut Criterion) {
    let options = AnalysisOptions::new().with_frame_skip(1);

    criterion.bench_function("analyze 60 frames at 360p", |bencher| {
        bencher.iter(|| {
            analyze(scroll_recording(60, 640, 360, 5), &options).unwrap();
        });
    });

    let strided = AnalysisOptions::new().with_frame_skip(5);
    criterion.bench_function("analyze 300 frames at 360p (stride 5)", |bencher| {
        bencher.iter(|| {
            analyze(scroll_recording(300, 640, 360, 5), &strided).unwrap();
        });
    });
}

fn benchmark_comparison(criterion: &mut Criterion) {
    let options = AnalysisOptions::new().with_frame_skip(1);

    criterion.bench_function("compare two 60-frame recordings", |bencher| {
        bencher.iter(|| {
            compare(
                scroll_recording(60, 640, 360, 5),
                scroll_recording(60, 640, 360, 9),
                &options,
            )
            .unwrap();
        });
    });
}

#[cfg(feature = "rayon")]
fn benchmark_parallel_comparison(criterion: &mut Criterion) {
    let options = AnalysisOptions::new().with_frame_skip(1);

    criterion.bench_function("compare two 60-frame recordings (parallel)", |bencher| {
        bencher.iter(|| {
            scrollgauge::compare_parallel(
                scroll_recording(60, 640, 360, 5),
                scroll_recording(60, 640, 360, 9),
                &options,
            )
            .unwrap();
        });
    });
}

#[cfg(not(feature = "rayon"))]
fn benchmark_parallel_comparison(_criterion: &mut Criterion) {}

criterion::criterion_group!(
    benches,
    benchmark_block_activity,
    benchmark_changed_fraction,
    benchmark_full_analysis,
    benchmark_comparison,
    benchmark_parallel_comparison,
);
criterion::criterion_main!(benches);
