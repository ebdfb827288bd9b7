//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Pixel values are mapped
//! between `u8` and `[0, 1]`.

use crate::image::Image;
use crate::util::{CornerConvError, CornerConvResult};
use std::path::Path;

/// Converts a decoded image into a planar image.
///
/// Grayscale sources become one channel; anything with color becomes three
/// (alpha is dropped).
pub fn from_dynamic_image(img: &image::DynamicImage) -> CornerConvResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    if img.color().has_color() {
        let rgb = img.to_rgb8();
        let plane = width * height;
        let mut data = vec![0.0f32; plane * 3];
        for (i, px) in rgb.pixels().enumerate() {
            for c in 0..3 {
                data[c * plane + i] = f32::from(px.0[c]) / 255.0;
            }
        }
        Image::from_vec(data, width, height, 3)
    } else {
        let gray = img.to_luma8();
        let data = gray.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect();
        Image::from_vec(data, width, height, 1)
    }
}

/// Loads an image from disk into a planar image.
pub fn load_image<P: AsRef<Path>>(path: P) -> CornerConvResult<Image> {
    let img = image::open(path).map_err(|err| CornerConvError::ImageIo {
        reason: err.to_string(),
    })?;
    from_dynamic_image(&img)
}

/// Saves a one- or three-channel image, clamping values into `[0, 1]`.
///
/// The format is chosen from the path extension.
pub fn save_image<P: AsRef<Path>>(im: &Image, path: P) -> CornerConvResult<()> {
    let width = u32::try_from(im.width())
        .map_err(|_| CornerConvError::InvalidParameter("image too wide to encode"))?;
    let height = u32::try_from(im.height())
        .map_err(|_| CornerConvError::InvalidParameter("image too tall to encode"))?;
    let plane = im.plane_len();
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;

    let result = match im.channels() {
        1 => {
            let raw: Vec<u8> = im.data().iter().copied().map(to_u8).collect();
            image::GrayImage::from_raw(width, height, raw)
                .ok_or(CornerConvError::BufferSizeMismatch {
                    expected: plane,
                    got: im.data().len(),
                })?
                .save(path)
        }
        3 => {
            let data = im.data();
            let mut raw = Vec::with_capacity(plane * 3);
            for i in 0..plane {
                for c in 0..3 {
                    raw.push(to_u8(data[c * plane + i]));
                }
            }
            image::RgbImage::from_raw(width, height, raw)
                .ok_or(CornerConvError::BufferSizeMismatch {
                    expected: plane * 3,
                    got: im.data().len(),
                })?
                .save(path)
        }
        _ => {
            return Err(CornerConvError::InvalidParameter(
                "only 1- or 3-channel images can be saved",
            ))
        }
    };
    result.map_err(|err| CornerConvError::ImageIo {
        reason: err.to_string(),
    })
}
