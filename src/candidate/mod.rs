//! Candidate selection over response maps.
//!
//! Includes dense spatial non-maximum suppression and thresholded peak
//! extraction in row-major order.

pub(crate) mod nms;
pub(crate) mod peak;
