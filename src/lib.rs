//! cornerconv computes dense image filters and Harris corner features.
//!
//! The crate is built around a planar `f32` [`Image`] with edge-clamped
//! reads. On top of it sit a channel-aware convolution engine
//! ([`convolve`]), analytic filter generators ([`filter`]), the structure
//! tensor ([`StructureTensor`]) and a Harris detector that returns one
//! [`Descriptor`] per corner ([`detect_corners`]).
//!
//! Optional features: `rayon` (row-parallel convolution), `simd` (vectorized
//! convolution rows), `image-io` (load/save through the `image` crate) and
//! `tracing` (spans and events).

mod candidate;
pub mod detect;
pub mod filter;
pub mod gradient;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod structure;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use candidate::nms::{non_max_suppress, SUPPRESSED_SCORE};
pub use candidate::peak::{select_peaks, Peak};
pub use detect::{
    cornerness, detect_corners, Descriptor, HarrisConfig, HarrisDetector, DESCRIPTOR_WINDOW,
};
pub use crate::image::Image;
pub use kernel::{convolve, convolve_with, smooth, ChannelMode};
pub use structure::{structure_tensor, StructureTensor, TensorSample};
pub use util::{CornerConvError, CornerConvResult};
