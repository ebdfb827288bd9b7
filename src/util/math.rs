//! Index and kernel-size helpers shared by the filters.

use crate::util::{CornerConvError, CornerConvResult};

/// Clamps a signed coordinate into `[0, len - 1]`.
///
/// `len` must be non-zero; images never have an empty axis.
#[inline]
pub(crate) fn clamp_coord(v: isize, len: usize) -> usize {
    if v <= 0 {
        0
    } else if v as usize >= len {
        len - 1
    } else {
        v as usize
    }
}

/// Rejects non-finite or non-positive standard deviations.
pub(crate) fn check_sigma(sigma: f32) -> CornerConvResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CornerConvError::InvalidSigma { sigma });
    }
    Ok(())
}

/// Smallest odd integer that is at least `ceil(6 * sigma)`.
///
/// Rejects sigmas whose extent does not fit in an index.
pub(crate) fn gaussian_size(sigma: f32) -> CornerConvResult<usize> {
    check_sigma(sigma)?;
    let extent = (6.0 * sigma).ceil();
    if extent >= isize::MAX as f32 {
        return Err(CornerConvError::InvalidSigma { sigma });
    }
    let size = extent as usize;
    Ok(if size % 2 == 1 { size } else { size + 1 })
}
