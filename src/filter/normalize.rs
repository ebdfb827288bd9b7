//! In-place per-channel normalizers.
//!
//! A channel whose sum (L1) or range (min-max) is zero cannot be normalized.
//! Such channels are left exactly as they were and reported through
//! `trace_warn!`; the remaining channels are still normalized.

use crate::image::Image;
use crate::trace::trace_warn;

/// Scales each channel so that its values sum to 1.
pub fn l1_normalize(im: &mut Image) {
    for c in 0..im.channels() {
        let Some(plane) = im.channel_mut(c) else {
            continue;
        };
        let sum: f32 = plane.iter().sum();
        if sum == 0.0 {
            trace_warn!("degenerate_l1_normalize", channel = c);
            continue;
        }
        for v in plane.iter_mut() {
            *v /= sum;
        }
    }
}

/// Rescales each channel linearly onto `[0, 1]` using its min and max.
pub fn feature_normalize(im: &mut Image) {
    for c in 0..im.channels() {
        let Some(plane) = im.channel_mut(c) else {
            continue;
        };
        let (min, max) = plane
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        if range == 0.0 {
            trace_warn!("degenerate_feature_normalize", channel = c);
            continue;
        }
        for v in plane.iter_mut() {
            *v = (*v - min) / range;
        }
    }
}
