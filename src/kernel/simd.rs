//! SIMD convolution kernel using the `wide` crate.
//!
//! Interior spans, where no tap of the filter leaves the image horizontally,
//! are processed eight output pixels at a time with `f32x8`: every lane keeps
//! its own accumulator and sees the taps in the same order as the scalar
//! kernel. Border pixels and the ragged tail fall back to the scalar path.

use crate::image::Image;
use crate::kernel::scalar::{accumulate_pixel, fused_pixel};
use crate::kernel::{filter_channel, RowKernel};
use crate::util::math::clamp_coord;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Vectorized row kernel.
pub struct SimdKernel;

/// Output columns whose whole filter footprint lies inside the row.
fn interior_span(width: usize, filter_width: usize) -> Option<(usize, usize)> {
    if filter_width > width {
        return None;
    }
    let cx = filter_width / 2;
    Some((cx, width - filter_width + cx + 1))
}

/// Accumulates plane `c` taps for output pixels `x..x + LANES` of row `y`.
///
/// All horizontal taps must be in bounds.
#[inline]
fn accumulate_block(
    image: &Image,
    filter: &Image,
    fc: usize,
    c: usize,
    x: usize,
    y: usize,
    mut acc: f32x8,
) -> f32x8 {
    let width = image.width();
    let plane = image.plane_len();
    let src = &image.data()[c * plane..(c + 1) * plane];

    let fw = filter.width();
    let fh = filter.height();
    let fplane = filter.plane_len();
    let taps = &filter.data()[fc * fplane..(fc + 1) * fplane];

    let left = x - fw / 2;
    let y0 = y as isize - (fh / 2) as isize;
    for ty in 0..fh {
        let sy = clamp_coord(y0 + ty as isize, image.height());
        let row = &src[sy * width..(sy + 1) * width];
        let tap_row = &taps[ty * fw..(ty + 1) * fw];
        for (tx, &tap) in tap_row.iter().enumerate() {
            acc += f32x8::splat(tap) * load_f32x8(&row[left + tx..]);
        }
    }
    acc
}

impl RowKernel for SimdKernel {
    fn fused_row(image: &Image, filter: &Image, y: usize, out: &mut [f32]) {
        let width = out.len();
        let channels = image.channels() as f32;
        let mut x = 0;
        if let Some((start, end)) = interior_span(width, filter.width()) {
            while x < start {
                out[x] = fused_pixel(image, filter, x, y);
                x += 1;
            }
            while x + LANES <= end {
                let mut acc = f32x8::ZERO;
                for c in 0..image.channels() {
                    acc = accumulate_block(image, filter, filter_channel(filter, c), c, x, y, acc);
                }
                for (dst, v) in out[x..x + LANES].iter_mut().zip(acc.to_array()) {
                    *dst = v / channels;
                }
                x += LANES;
            }
        }
        while x < width {
            out[x] = fused_pixel(image, filter, x, y);
            x += 1;
        }
    }

    fn channel_row(image: &Image, filter: &Image, c: usize, y: usize, out: &mut [f32]) {
        let width = out.len();
        let fc = filter_channel(filter, c);
        let mut x = 0;
        if let Some((start, end)) = interior_span(width, filter.width()) {
            while x < start {
                out[x] = accumulate_pixel(image, filter, fc, c, x, y, 0.0);
                x += 1;
            }
            while x + LANES <= end {
                let acc = accumulate_block(image, filter, fc, c, x, y, f32x8::ZERO);
                out[x..x + LANES].copy_from_slice(&acc.to_array());
                x += LANES;
            }
        }
        while x < width {
            out[x] = accumulate_pixel(image, filter, fc, c, x, y, 0.0);
            x += 1;
        }
    }
}
