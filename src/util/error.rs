//! Error types for cornerconv.

use thiserror::Error;

/// Result alias for cornerconv operations.
pub type CornerConvResult<T> = std::result::Result<T, CornerConvError>;

/// Errors that can occur when building or filtering images.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CornerConvError {
    /// Width, height and channel count must all be positive.
    #[error("invalid dimensions: {width}x{height}x{channels}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        channels: usize,
    },
    /// A buffer does not hold exactly `width * height * channels` values.
    #[error("buffer size mismatch: expected {expected}, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// Filter channel count is neither 1 nor the image channel count.
    #[error("filter has {filter_channels} channels, image has {image_channels}")]
    ShapeMismatch {
        image_channels: usize,
        filter_channels: usize,
    },
    /// Channel index outside `[0, channels)`.
    #[error("invalid channel {channel} (image has {channels})")]
    InvalidChannel { channel: usize, channels: usize },
    /// Pixel write outside the image.
    #[error("pixel ({x}, {y}, {channel}) out of bounds for {width}x{height}x{channels}")]
    OutOfBounds {
        x: usize,
        y: usize,
        channel: usize,
        width: usize,
        height: usize,
        channels: usize,
    },
    /// Gaussian standard deviation must be finite and positive.
    #[error("invalid sigma: {sigma}")]
    InvalidSigma { sigma: f32 },
    /// A configuration parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// Image decode or encode failed.
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
}
