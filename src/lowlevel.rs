//! Low-level building blocks for custom filtering pipelines.
//!
//! These expose the row kernels, individual detector stages and normalizers
//! behind the top-level `convolve` and `HarrisDetector` API.

pub use crate::candidate::nms::{non_max_suppress, SUPPRESSED_SCORE};
pub use crate::candidate::peak::{select_peaks, Peak};
pub use crate::detect::{cornerness_with_alpha, describe_at, HARRIS_ALPHA};
pub use crate::filter::{feature_normalize, gaussian_1d, l1_normalize};
pub use crate::gradient::{sobel, sobel_xy};
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::convolve_par;
pub use crate::kernel::scalar::ScalarKernel;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::SimdKernel;
pub use crate::kernel::RowKernel;
