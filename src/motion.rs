//! Block-based motion activity estimation.
//!
//! Motion between two consecutive grayscale frames is summarized as a
//! single scalar: the frames are partitioned into non-overlapping square
//! blocks, each block contributes its mean absolute pixel difference, and
//! the activity value is the mean of the block means. Averaging per block
//! dampens single-pixel sensor noise while staying far cheaper than dense
//! optical flow.
//!
//! Also provides [`changed_fraction`] and [`screen_moved`], the cheap
//! did-anything-move predicate capture drivers use to detect the end of a
//! scrollable page.

use image::{GrayImage, imageops::FilterType, imageops::resize};

/// Pixel difference above which a pixel counts as "changed" for
/// [`changed_fraction`].
const CHANGED_PIXEL_THRESHOLD: u8 = 20;

/// Compute the block-mean motion activity between two grayscale frames.
///
/// Both frames are partitioned into `block_size`×`block_size` blocks;
/// partial trailing rows and columns are excluded. If `current` differs in
/// resolution from `previous` it is resampled to match first, so the call
/// never fails on mismatched inputs.
///
/// Identical frames yield exactly `0.0`. Frames smaller than one block in
/// either dimension also yield `0.0` (no blocks to compare).
pub fn block_activity(previous: &GrayImage, current: &GrayImage, block_size: u32) -> f64 {
    let current = matched_resolution(previous, current);

    let (width, height) = previous.dimensions();
    let block_size = block_size.max(1);
    let columns = width / block_size;
    let rows = height / block_size;

    if columns == 0 || rows == 0 {
        return 0.0;
    }

    let pixels_per_block = f64::from(block_size) * f64::from(block_size);
    let mut block_mean_sum = 0.0;

    for row in 0..rows {
        for column in 0..columns {
            let x0 = column * block_size;
            let y0 = row * block_size;

            let mut difference_sum = 0u64;
            for y in y0..y0 + block_size {
                for x in x0..x0 + block_size {
                    let a = previous.get_pixel(x, y).0[0];
                    let b = current.get_pixel(x, y).0[0];
                    difference_sum += u64::from(a.abs_diff(b));
                }
            }

            block_mean_sum += difference_sum as f64 / pixels_per_block;
        }
    }

    block_mean_sum / f64::from(rows * columns)
}

/// Fraction of pixels whose absolute difference exceeds a small threshold.
///
/// Unlike [`block_activity`] this is a ratio in `0.0..=1.0`, independent of
/// how large the per-pixel changes are — a full-screen 21-level shift and a
/// full-screen 255-level shift both report `1.0`.
pub fn changed_fraction(previous: &GrayImage, current: &GrayImage) -> f64 {
    let current = matched_resolution(previous, current);

    let total = previous.as_raw().len();
    if total == 0 {
        return 0.0;
    }

    let changed = previous
        .as_raw()
        .iter()
        .zip(current.as_raw().iter())
        .filter(|(a, b)| a.abs_diff(**b) > CHANGED_PIXEL_THRESHOLD)
        .count();

    changed as f64 / total as f64
}

/// Returns `true` if the screen content moved between two frames.
///
/// `movement_threshold` is the minimum [`changed_fraction`] that counts as
/// movement; capture drivers typically use a value around `0.015`.
pub fn screen_moved(previous: &GrayImage, current: &GrayImage, movement_threshold: f64) -> bool {
    changed_fraction(previous, current) > movement_threshold
}

/// Resample `current` to `previous`'s dimensions when they differ.
///
/// Borrows `current` unchanged in the common matching case.
fn matched_resolution<'a>(
    previous: &GrayImage,
    current: &'a GrayImage,
) -> std::borrow::Cow<'a, GrayImage> {
    if previous.dimensions() == current.dimensions() {
        std::borrow::Cow::Borrowed(current)
    } else {
        let (width, height) = previous.dimensions();
        std::borrow::Cow::Owned(resize(current, width, height, FilterType::Triangle))
    }
}
