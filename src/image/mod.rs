//! Planar floating-point images.
//!
//! `Image` owns a channel-major buffer: all of channel 0 row by row, then
//! channel 1, and so on, so `data.len() == width * height * channels` always
//! holds. Reads through [`Image::get`] accept any signed coordinate and clamp
//! it to the nearest edge pixel; this replicated border is what every filter
//! in the crate sees outside the image. Writes are bounds-checked and never
//! clamp.

use crate::trace::trace_warn;
use crate::util::math::clamp_coord;
use crate::util::{CornerConvError, CornerConvResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Owned planar `f32` image with one or more channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    data: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
}

impl Image {
    /// Allocates a zero-filled image.
    pub fn new(width: usize, height: usize, channels: usize) -> CornerConvResult<Self> {
        let len = buffer_len(width, height, channels)?;
        Ok(Self {
            data: vec![0.0; len],
            width,
            height,
            channels,
        })
    }

    /// Wraps an existing channel-major buffer.
    pub fn from_vec(
        data: Vec<f32>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> CornerConvResult<Self> {
        let expected = buffer_len(width, height, channels)?;
        if data.len() != expected {
            return Err(CornerConvError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels in one channel plane.
    pub fn plane_len(&self) -> usize {
        self.width * self.height
    }

    /// Returns the whole channel-major buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the whole channel-major buffer for in-place edits.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the plane for channel `c`.
    pub fn channel(&self, c: usize) -> Option<&[f32]> {
        if c >= self.channels {
            return None;
        }
        let plane = self.plane_len();
        self.data.get(c * plane..(c + 1) * plane)
    }

    /// Returns the plane for channel `c` for in-place edits.
    pub fn channel_mut(&mut self, c: usize) -> Option<&mut [f32]> {
        if c >= self.channels {
            return None;
        }
        let plane = self.plane_len();
        self.data.get_mut(c * plane..(c + 1) * plane)
    }

    /// Reads a pixel with edge clamping.
    ///
    /// `x` and `y` are clamped into the image. A channel outside
    /// `[0, channels)` is reported and reads as `0.0`.
    #[inline]
    pub fn get(&self, x: isize, y: isize, c: usize) -> f32 {
        if c >= self.channels {
            trace_warn!("invalid_channel", channel = c, channels = self.channels);
            return 0.0;
        }
        self.data[self.clamped_index(x, y, c)]
    }

    /// Reads a pixel with edge clamping, rejecting bad channels.
    pub fn try_get(&self, x: isize, y: isize, c: usize) -> CornerConvResult<f32> {
        if c >= self.channels {
            return Err(CornerConvError::InvalidChannel {
                channel: c,
                channels: self.channels,
            });
        }
        Ok(self.data[self.clamped_index(x, y, c)])
    }

    /// Writes a pixel.
    ///
    /// Out-of-range coordinates or channels leave the image untouched and
    /// return [`CornerConvError::OutOfBounds`].
    pub fn set(&mut self, x: usize, y: usize, c: usize, value: f32) -> CornerConvResult<()> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return Err(CornerConvError::OutOfBounds {
                x,
                y,
                channel: c,
                width: self.width,
                height: self.height,
                channels: self.channels,
            });
        }
        let idx = self.index(x, y, c);
        self.data[idx] = value;
        Ok(())
    }

    /// Reinterprets the buffer with a new width and height.
    ///
    /// The buffer is moved, not copied; `width * height` must equal the
    /// current plane size.
    pub fn reshape(self, width: usize, height: usize) -> CornerConvResult<Self> {
        Self::from_vec(self.data, width, height, self.channels)
    }

    /// Builds a single-channel kernel from literal rows.
    pub(crate) fn from_rows<const W: usize, const H: usize>(rows: [[f32; W]; H]) -> Self {
        Self {
            data: rows.concat(),
            width: W,
            height: H,
            channels: 1,
        }
    }

    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize, c: usize) -> usize {
        c * self.width * self.height + y * self.width + x
    }

    #[inline]
    fn clamped_index(&self, x: isize, y: isize, c: usize) -> usize {
        let x = clamp_coord(x, self.width);
        let y = clamp_coord(y, self.height);
        self.index(x, y, c)
    }
}

fn buffer_len(width: usize, height: usize, channels: usize) -> CornerConvResult<usize> {
    let invalid = CornerConvError::InvalidDimensions {
        width,
        height,
        channels,
    };
    if width == 0 || height == 0 || channels == 0 {
        return Err(invalid);
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(invalid)
}
