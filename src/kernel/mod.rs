//! Spatial convolution against arbitrary filter images.
//!
//! Convolution here is correlation-style (the kernel is not flipped) with the
//! filter centered at `(filter.width() / 2, filter.height() / 2)`. Every read
//! outside the source image is edge-clamped. Two channel modes exist:
//!
//! - [`ChannelMode::Fuse`]: one output channel; taps of every input channel
//!   are summed into a single accumulator which is then divided by the input
//!   channel count.
//! - [`ChannelMode::Preserve`]: one output channel per input channel, each
//!   computed on its own.
//!
//! A filter must have one channel (broadcast to every input channel) or as
//! many channels as the image.
//!
//! Work is split into output rows through the [`RowKernel`] trait. The
//! scalar kernel is the reference; the `simd` feature swaps in a vectorized
//! kernel and the `rayon` feature adds a row-parallel driver. Each output
//! pixel accumulates its taps in the same order on every path, so results are
//! bit-identical.

use crate::filter::gaussian_1d;
use crate::image::Image;
use crate::trace::trace_span;
use crate::util::{CornerConvError, CornerConvResult};

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

#[cfg(not(feature = "simd"))]
pub(crate) type ActiveKernel = scalar::ScalarKernel;
#[cfg(feature = "simd")]
pub(crate) type ActiveKernel = simd::SimdKernel;

/// How input channels map to output channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    /// Sum all channels into one response and divide by the channel count.
    Fuse,
    /// Convolve every channel independently.
    Preserve,
}

impl ChannelMode {
    /// Maps the classic `preserve` flag onto a mode.
    pub fn from_preserve(preserve: bool) -> Self {
        if preserve {
            ChannelMode::Preserve
        } else {
            ChannelMode::Fuse
        }
    }
}

/// Row-level convolution kernel.
pub trait RowKernel {
    /// Writes output row `y` of the channel-fused response.
    fn fused_row(image: &Image, filter: &Image, y: usize, out: &mut [f32]);

    /// Writes output row `y` of channel `c` in preserve mode.
    fn channel_row(image: &Image, filter: &Image, c: usize, y: usize, out: &mut [f32]);
}

/// Convolves `image` with `filter`.
///
/// With `preserve == false` the result has a single channel; otherwise it has
/// `image.channels()` channels.
pub fn convolve(image: &Image, filter: &Image, preserve: bool) -> CornerConvResult<Image> {
    convolve_with(image, filter, ChannelMode::from_preserve(preserve), false)
}

/// Convolves with an explicit channel mode, optionally splitting rows across
/// threads.
///
/// `parallel` only takes effect with the `rayon` feature enabled.
pub fn convolve_with(
    image: &Image,
    filter: &Image,
    mode: ChannelMode,
    parallel: bool,
) -> CornerConvResult<Image> {
    let mut out = prepare_output(image, filter, mode)?;
    let _span = trace_span!(
        "convolve",
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        taps = filter.plane_len()
    )
    .entered();

    #[cfg(feature = "rayon")]
    if parallel {
        self::rayon::convolve_rows_par::<ActiveKernel>(image, filter, mode, &mut out);
        return Ok(out);
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;

    convolve_rows::<ActiveKernel>(image, filter, mode, &mut out);
    Ok(out)
}

/// Separable Gaussian blur that keeps every channel.
///
/// Runs a horizontal 1D Gaussian pass and then the same taps as a column.
pub fn smooth(image: &Image, sigma: f32) -> CornerConvResult<Image> {
    smooth_with(image, sigma, false)
}

pub(crate) fn smooth_with(image: &Image, sigma: f32, parallel: bool) -> CornerConvResult<Image> {
    let row = gaussian_1d(sigma)?;
    let _span = trace_span!("smooth", sigma = sigma, taps = row.width()).entered();
    let horizontal = convolve_with(image, &row, ChannelMode::Preserve, parallel)?;
    let taps = row.width();
    let column = row.reshape(1, taps)?;
    convolve_with(&horizontal, &column, ChannelMode::Preserve, parallel)
}

/// Validates filter/image compatibility and allocates the output image.
pub(crate) fn prepare_output(
    image: &Image,
    filter: &Image,
    mode: ChannelMode,
) -> CornerConvResult<Image> {
    if filter.channels() != 1 && filter.channels() != image.channels() {
        return Err(CornerConvError::ShapeMismatch {
            image_channels: image.channels(),
            filter_channels: filter.channels(),
        });
    }
    let channels = match mode {
        ChannelMode::Fuse => 1,
        ChannelMode::Preserve => image.channels(),
    };
    Image::new(image.width(), image.height(), channels)
}

/// Filter channel used for input channel `c`.
#[inline]
pub(crate) fn filter_channel(filter: &Image, c: usize) -> usize {
    if filter.channels() == 1 {
        0
    } else {
        c
    }
}

/// Computes one output row; `row` indexes rows across all output planes.
#[inline]
pub(crate) fn row_task<K: RowKernel>(
    image: &Image,
    filter: &Image,
    mode: ChannelMode,
    row: usize,
    out: &mut [f32],
) {
    match mode {
        ChannelMode::Fuse => K::fused_row(image, filter, row, out),
        ChannelMode::Preserve => {
            let height = image.height();
            K::channel_row(image, filter, row / height, row % height, out)
        }
    }
}

fn convolve_rows<K: RowKernel>(image: &Image, filter: &Image, mode: ChannelMode, out: &mut Image) {
    let width = out.width();
    for (row, out_row) in out.data_mut().chunks_mut(width).enumerate() {
        row_task::<K>(image, filter, mode, row, out_row);
    }
}
