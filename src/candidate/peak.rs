//! Thresholded peak extraction.

use crate::image::Image;

/// Response-map location that passed the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the peak.
    pub x: usize,
    /// Y coordinate (row) of the peak.
    pub y: usize,
    /// Response value at the peak.
    pub score: f32,
}

/// Collects every pixel of channel 0 whose value is strictly greater than
/// `threshold`, in row-major order (y ascending, then x ascending).
pub fn select_peaks(map: &Image, threshold: f32) -> Vec<Peak> {
    let width = map.width();
    let plane = &map.data()[..map.plane_len()];
    plane
        .iter()
        .enumerate()
        .filter(|(_, &score)| score > threshold)
        .map(|(i, &score)| Peak {
            x: i % width,
            y: i / width,
            score,
        })
        .collect()
}
