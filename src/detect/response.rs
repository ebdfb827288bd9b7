//! Harris cornerness response.

use crate::image::Image;
use crate::structure::StructureTensor;
use crate::util::CornerConvResult;

/// Default Harris sensitivity `alpha`.
pub const HARRIS_ALPHA: f32 = 0.06;

/// Harris response `det(S) - alpha * trace(S)^2` with the default alpha.
pub fn cornerness(tensor: &StructureTensor) -> CornerConvResult<Image> {
    cornerness_with_alpha(tensor, HARRIS_ALPHA)
}

/// Harris response with an explicit `alpha`.
///
/// The result is a single-channel map the size of the tensor. Positive values
/// mark corners, negative values edges, values near zero flat regions.
pub fn cornerness_with_alpha(tensor: &StructureTensor, alpha: f32) -> CornerConvResult<Image> {
    let width = tensor.width();
    let mut map = Image::new(width, tensor.height(), 1)?;
    for (i, score) in map.data_mut().iter_mut().enumerate() {
        let s = tensor.at(i % width, i / width);
        let trace = s.trace();
        *score = s.det() - alpha * (trace * trace);
    }
    Ok(map)
}
