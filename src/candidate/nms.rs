//! Dense non-maximum suppression over a response map.

use crate::image::Image;
use crate::trace::{trace_event, trace_span};

/// Score written over responses that are not local maxima.
pub const SUPPRESSED_SCORE: f32 = -999_999.0;

/// Suppresses every response that has a strictly greater neighbour within
/// Chebyshev distance `radius`.
///
/// The window is clipped at the image border rather than edge-clamped. Equal
/// neighbours never suppress each other, so plateaus survive intact. Each
/// channel is processed on its own and the input is left untouched.
pub fn non_max_suppress(map: &Image, radius: usize) -> Image {
    let _span = trace_span!("non_max_suppress", radius = radius).entered();
    let width = map.width();
    let height = map.height();
    let plane = map.plane_len();
    let mut out = map.clone();
    let mut suppressed = 0usize;

    for (src, dst) in map.data().chunks(plane).zip(out.data_mut().chunks_mut(plane)) {
        for y in 0..height {
            let y0 = y.saturating_sub(radius);
            let y1 = y.saturating_add(radius).saturating_add(1).min(height);
            for x in 0..width {
                let x0 = x.saturating_sub(radius);
                let x1 = x.saturating_add(radius).saturating_add(1).min(width);
                let v = src[y * width + x];
                let beaten = (y0..y1).any(|ny| {
                    src[ny * width + x0..ny * width + x1]
                        .iter()
                        .any(|&n| n > v)
                });
                if beaten {
                    dst[y * width + x] = SUPPRESSED_SCORE;
                    suppressed += 1;
                }
            }
        }
    }

    trace_event!("nms_suppressed", count = suppressed);
    out
}
