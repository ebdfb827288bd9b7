//! Rayon-parallel convolution driver (feature-gated).
//!
//! Output rows are independent, so every row across every output plane is a
//! separate task. Each row is produced by the same [`RowKernel`] as the
//! sequential path.

use crate::image::Image;
use crate::kernel::{prepare_output, row_task, ActiveKernel, ChannelMode, RowKernel};
use crate::util::CornerConvResult;
use rayon::prelude::*;

/// Row-parallel counterpart of [`crate::kernel::convolve`].
pub fn convolve_par(image: &Image, filter: &Image, preserve: bool) -> CornerConvResult<Image> {
    let mode = ChannelMode::from_preserve(preserve);
    let mut out = prepare_output(image, filter, mode)?;
    convolve_rows_par::<ActiveKernel>(image, filter, mode, &mut out);
    Ok(out)
}

/// Fills `out` (already shaped for `mode`) with rows computed in parallel.
pub(crate) fn convolve_rows_par<K: RowKernel>(
    image: &Image,
    filter: &Image,
    mode: ChannelMode,
    out: &mut Image,
) {
    let width = out.width();
    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| row_task::<K>(image, filter, mode, row, out_row));
}
