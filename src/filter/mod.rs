//! Filter kernel generators.
//!
//! Every generator returns a fresh single-channel [`Image`] that can be passed
//! to [`crate::kernel::convolve`]. Kernels are centered at
//! `(width / 2, height / 2)`; all generated kernels have odd sizes except a
//! box filter built with an even width.

mod normalize;

pub use normalize::{feature_normalize, l1_normalize};

use crate::image::Image;
use crate::util::math::gaussian_size;
use crate::util::CornerConvResult;

/// Normalized `size x size` averaging filter.
pub fn box_filter(size: usize) -> CornerConvResult<Image> {
    let mut filter = Image::new(size, size, 1)?;
    let unit = 1.0 / (size as f32 * size as f32);
    filter.data_mut().fill(unit);
    Ok(filter)
}

/// Dense 2D Gaussian of side `gaussian_size(sigma)`, L1-normalized.
pub fn gaussian_filter(sigma: f32) -> CornerConvResult<Image> {
    let size = gaussian_size(sigma)?;
    let mut filter = Image::new(size, size, 1)?;
    let center = (size / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let data = filter.data_mut();
    for y in 0..size {
        let dy = (center - y as isize) as f32;
        for x in 0..size {
            let dx = (center - x as isize) as f32;
            data[y * size + x] = (-(dx * dx + dy * dy) / denom).exp();
        }
    }
    l1_normalize(&mut filter);
    Ok(filter)
}

/// Horizontal 1D Gaussian (one row), L1-normalized.
///
/// Reshape the result to `1 x size` for the vertical pass of a separable
/// blur.
pub fn gaussian_1d(sigma: f32) -> CornerConvResult<Image> {
    let size = gaussian_size(sigma)?;
    let mut filter = Image::new(size, 1, 1)?;
    let center = (size / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let gain = 2.5 * sigma;
    for (x, tap) in filter.data_mut().iter_mut().enumerate() {
        let dx = (center - x as isize) as f32;
        *tap = (-(dx * dx) / denom).exp() * gain;
    }
    l1_normalize(&mut filter);
    Ok(filter)
}

/// Horizontal Sobel derivative.
pub fn gx_filter() -> Image {
    Image::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
}

/// Vertical Sobel derivative.
pub fn gy_filter() -> Image {
    Image::from_rows([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]])
}

/// 4-neighbour Laplacian highpass.
pub fn highpass_filter() -> Image {
    Image::from_rows([[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]])
}

/// Identity plus highpass.
pub fn sharpen_filter() -> Image {
    Image::from_rows([[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]])
}

/// Diagonal relief filter.
pub fn emboss_filter() -> Image {
    Image::from_rows([[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]])
}

/// Top-left edge filter.
pub fn edge_filter() -> Image {
    Image::from_rows([[-1.0, -1.0, 0.0], [-1.0, 4.0, 0.0], [0.0, 0.0, 0.0]])
}
