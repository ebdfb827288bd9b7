//! Sobel gradient magnitude and direction.

use crate::filter::{gx_filter, gy_filter};
use crate::image::Image;
use crate::kernel::{convolve_with, ChannelMode};
use crate::util::CornerConvResult;

/// Horizontal and vertical Sobel responses, channel-fused.
pub fn sobel_xy(image: &Image) -> CornerConvResult<(Image, Image)> {
    sobel_xy_with(image, false)
}

pub(crate) fn sobel_xy_with(image: &Image, parallel: bool) -> CornerConvResult<(Image, Image)> {
    let gx = convolve_with(image, &gx_filter(), ChannelMode::Fuse, parallel)?;
    let gy = convolve_with(image, &gy_filter(), ChannelMode::Fuse, parallel)?;
    Ok((gx, gy))
}

/// Gradient magnitude `sqrt(gx^2 + gy^2)` and direction `atan2(gy, gx)`.
///
/// Both outputs are single-channel with the input's spatial size; direction
/// is in radians in `[-pi, pi]`.
pub fn sobel(image: &Image) -> CornerConvResult<(Image, Image)> {
    let (gx, gy) = sobel_xy(image)?;
    let mut magnitude = Image::new(image.width(), image.height(), 1)?;
    let mut direction = Image::new(image.width(), image.height(), 1)?;
    let pixels = gx.data().iter().zip(gy.data());
    let outputs = magnitude.data_mut().iter_mut().zip(direction.data_mut());
    for ((&dx, &dy), (mag, dir)) in pixels.zip(outputs) {
        *mag = (dx * dx + dy * dy).sqrt();
        *dir = dy.atan2(dx);
    }
    Ok((magnitude, direction))
}
