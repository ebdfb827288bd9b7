//! Smoothed second-moment (structure) tensor.
//!
//! The tensor is stored as a three-channel [`Image`] aligned pixel for pixel
//! with its source: [`StructureTensor::XX`] holds smoothed `Ix^2`,
//! [`StructureTensor::YY`] smoothed `Iy^2` and [`StructureTensor::XY`]
//! smoothed `Ix * Iy`.

use crate::gradient::sobel_xy_with;
use crate::image::Image;
use crate::kernel::smooth_with;
use crate::trace::trace_span;
use crate::util::math::check_sigma;
use crate::util::CornerConvResult;

/// Tensor entries at one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TensorSample {
    /// Smoothed `Ix^2`.
    pub xx: f32,
    /// Smoothed `Iy^2`.
    pub yy: f32,
    /// Smoothed `Ix * Iy`.
    pub xy: f32,
}

impl TensorSample {
    /// Determinant of `[[xx, xy], [xy, yy]]`.
    pub fn det(&self) -> f32 {
        self.xx * self.yy - self.xy * self.xy
    }

    /// Trace of the tensor.
    pub fn trace(&self) -> f32 {
        self.xx + self.yy
    }
}

/// Per-pixel structure tensor of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct StructureTensor {
    image: Image,
}

impl StructureTensor {
    /// Channel holding smoothed `Ix^2`.
    pub const XX: usize = 0;
    /// Channel holding smoothed `Iy^2`.
    pub const YY: usize = 1;
    /// Channel holding smoothed `Ix * Iy`.
    pub const XY: usize = 2;

    /// Builds the tensor of `image` with Gaussian window `sigma`.
    pub fn build(image: &Image, sigma: f32) -> CornerConvResult<Self> {
        Self::build_with(image, sigma, false)
    }

    pub(crate) fn build_with(image: &Image, sigma: f32, parallel: bool) -> CornerConvResult<Self> {
        check_sigma(sigma)?;
        let _span = trace_span!(
            "structure_tensor",
            width = image.width(),
            height = image.height(),
            sigma = sigma
        )
        .entered();

        let (ix, iy) = sobel_xy_with(image, parallel)?;
        let mut products = Image::new(image.width(), image.height(), 3)?;
        let plane = products.plane_len();
        let (xx, rest) = products.data_mut().split_at_mut(plane);
        let (yy, xy) = rest.split_at_mut(plane);
        for (i, (&gx, &gy)) in ix.data().iter().zip(iy.data()).enumerate() {
            xx[i] = gx * gx;
            yy[i] = gy * gy;
            xy[i] = gx * gy;
        }

        let image = smooth_with(&products, sigma, parallel)?;
        Ok(Self { image })
    }

    /// Wraps an existing three-channel image laid out as `XX, YY, XY`.
    pub fn from_image(image: Image) -> Option<Self> {
        (image.channels() == 3).then_some(Self { image })
    }

    /// Returns the tensor width.
    pub fn width(&self) -> usize {
        self.image.width()
    }

    /// Returns the tensor height.
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Tensor entries at `(x, y)`, clamped to the nearest edge pixel like
    /// [`Image::get`].
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> TensorSample {
        let x = x.min(self.width() - 1);
        let y = y.min(self.height() - 1);
        let data = self.image.data();
        TensorSample {
            xx: data[self.image.index(x, y, Self::XX)],
            yy: data[self.image.index(x, y, Self::YY)],
            xy: data[self.image.index(x, y, Self::XY)],
        }
    }

    /// Borrows the underlying three-channel image.
    pub fn as_image(&self) -> &Image {
        &self.image
    }

    /// Consumes the tensor and returns the three-channel image.
    pub fn into_image(self) -> Image {
        self.image
    }
}

/// Builds the structure tensor of `image` as a three-channel image.
pub fn structure_tensor(image: &Image, sigma: f32) -> CornerConvResult<Image> {
    StructureTensor::build(image, sigma).map(StructureTensor::into_image)
}
