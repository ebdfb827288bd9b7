//! Harris corner detection with local descriptors.
//!
//! The pipeline runs in five stages:
//!
//! 1. structure tensor of the image at window `sigma`,
//! 2. cornerness response `det - alpha * trace^2`,
//! 3. dense non-maximum suppression with radius `nms_radius`,
//! 4. selection of every response strictly above `threshold`, in row-major
//!    order,
//! 5. a [`Descriptor`] per selected pixel, read from the source image.
//!
//! The output order is part of the contract: corners are listed top row first,
//! left to right within a row.

mod descriptor;
mod response;

pub use descriptor::{describe_at, Descriptor, DESCRIPTOR_WINDOW};
pub use response::{cornerness, cornerness_with_alpha, HARRIS_ALPHA};

use crate::candidate::nms::non_max_suppress;
use crate::candidate::peak::select_peaks;
use crate::image::Image;
use crate::structure::StructureTensor;
use crate::trace::{trace_event, trace_span};
use crate::util::math::check_sigma;
use crate::util::{CornerConvError, CornerConvResult};

/// Parameters of the Harris detector.
#[derive(Clone, Debug, PartialEq)]
pub struct HarrisConfig {
    /// Standard deviation of the structure-tensor window.
    pub sigma: f32,
    /// Responses must be strictly greater than this to become corners.
    pub threshold: f32,
    /// Chebyshev radius of the non-maximum suppression window.
    pub nms_radius: usize,
    /// Harris sensitivity; larger values reject more edge-like points.
    pub alpha: f32,
    /// Split convolutions across threads (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for HarrisConfig {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            threshold: 50.0,
            nms_radius: 3,
            alpha: HARRIS_ALPHA,
            parallel: false,
        }
    }
}

impl HarrisConfig {
    /// Checks that every parameter is usable.
    pub fn validate(&self) -> CornerConvResult<()> {
        check_sigma(self.sigma)?;
        if !self.threshold.is_finite() {
            return Err(CornerConvError::InvalidParameter("threshold must be finite"));
        }
        if !self.alpha.is_finite() {
            return Err(CornerConvError::InvalidParameter("alpha must be finite"));
        }
        Ok(())
    }
}

/// Harris corner detector.
#[derive(Clone, Debug, Default)]
pub struct HarrisDetector {
    cfg: HarrisConfig,
}

impl HarrisDetector {
    /// Creates a detector with the given configuration.
    pub fn new(cfg: HarrisConfig) -> Self {
        Self { cfg }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: HarrisConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &HarrisConfig {
        &self.cfg
    }

    /// Computes the raw (unsuppressed) cornerness map of `image`.
    pub fn response(&self, image: &Image) -> CornerConvResult<Image> {
        self.cfg.validate()?;
        let tensor = StructureTensor::build_with(image, self.cfg.sigma, self.cfg.parallel)?;
        cornerness_with_alpha(&tensor, self.cfg.alpha)
    }

    /// Detects corners and describes each one.
    pub fn detect(&self, image: &Image) -> CornerConvResult<Vec<Descriptor>> {
        let _span = trace_span!(
            "harris_detect",
            width = image.width(),
            height = image.height(),
            channels = image.channels()
        )
        .entered();

        let response = self.response(image)?;
        let suppressed = non_max_suppress(&response, self.cfg.nms_radius);
        let peaks = select_peaks(&suppressed, self.cfg.threshold);
        let descriptors: Vec<Descriptor> = peaks
            .iter()
            .map(|peak| describe_at(image, peak.x, peak.y))
            .collect();

        trace_event!("harris_corners", count = descriptors.len());
        Ok(descriptors)
    }
}

/// Runs Harris detection with the default `alpha`.
pub fn detect_corners(
    image: &Image,
    sigma: f32,
    threshold: f32,
    nms_radius: usize,
) -> CornerConvResult<Vec<Descriptor>> {
    HarrisDetector::new(HarrisConfig {
        sigma,
        threshold,
        nms_radius,
        ..HarrisConfig::default()
    })
    .detect(image)
}
