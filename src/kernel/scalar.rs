//! Scalar reference convolution kernel.

use crate::image::Image;
use crate::kernel::{filter_channel, RowKernel};
use crate::util::math::clamp_coord;

/// Per-pixel convolution with clamped reads on every tap.
pub struct ScalarKernel;

/// Adds the taps of filter plane `fc` over image plane `c` at `(x, y)` to
/// `acc`, in row-major tap order.
#[inline]
pub(crate) fn accumulate_pixel(
    image: &Image,
    filter: &Image,
    fc: usize,
    c: usize,
    x: usize,
    y: usize,
    mut acc: f32,
) -> f32 {
    let width = image.width();
    let height = image.height();
    let plane = image.plane_len();
    let src = &image.data()[c * plane..(c + 1) * plane];

    let fw = filter.width();
    let fh = filter.height();
    let fplane = filter.plane_len();
    let taps = &filter.data()[fc * fplane..(fc + 1) * fplane];

    let x0 = x as isize - (fw / 2) as isize;
    let y0 = y as isize - (fh / 2) as isize;
    for ty in 0..fh {
        let sy = clamp_coord(y0 + ty as isize, height);
        let row = &src[sy * width..(sy + 1) * width];
        let tap_row = &taps[ty * fw..(ty + 1) * fw];
        for (tx, &tap) in tap_row.iter().enumerate() {
            let sx = clamp_coord(x0 + tx as isize, width);
            acc += tap * row[sx];
        }
    }
    acc
}

/// Channel-fused response at `(x, y)`.
#[inline]
pub(crate) fn fused_pixel(image: &Image, filter: &Image, x: usize, y: usize) -> f32 {
    let mut acc = 0.0f32;
    for c in 0..image.channels() {
        acc = accumulate_pixel(image, filter, filter_channel(filter, c), c, x, y, acc);
    }
    acc / image.channels() as f32
}

impl RowKernel for ScalarKernel {
    fn fused_row(image: &Image, filter: &Image, y: usize, out: &mut [f32]) {
        for (x, dst) in out.iter_mut().enumerate() {
            *dst = fused_pixel(image, filter, x, y);
        }
    }

    fn channel_row(image: &Image, filter: &Image, c: usize, y: usize, out: &mut [f32]) {
        let fc = filter_channel(filter, c);
        for (x, dst) in out.iter_mut().enumerate() {
            *dst = accumulate_pixel(image, filter, fc, c, x, y, 0.0);
        }
    }
}
