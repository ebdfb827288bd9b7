//! Fixed-window local descriptors.

use crate::image::Image;

/// Side of the square descriptor window.
pub const DESCRIPTOR_WINDOW: usize = 5;

/// Local appearance around a detected corner.
///
/// `data` holds `DESCRIPTOR_WINDOW^2 * channels` entries. For every channel,
/// each entry is the center value minus one neighbour, with `dx` in `[-2, 2]`
/// as the outer loop and `dy` in `[-2, 2]` as the inner loop. Neighbours
/// outside the image are edge-clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct Descriptor {
    /// Column of the corner.
    pub x: usize,
    /// Row of the corner.
    pub y: usize,
    /// Contrast values relative to the center pixel.
    pub data: Vec<f32>,
}

impl Descriptor {
    /// Number of feature values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the descriptor carries no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Describes the pixel `(x, y)` of `image`, which must lie inside it.
pub fn describe_at(image: &Image, x: usize, y: usize) -> Descriptor {
    let half = (DESCRIPTOR_WINDOW / 2) as isize;
    let mut data = Vec::with_capacity(DESCRIPTOR_WINDOW * DESCRIPTOR_WINDOW * image.channels());
    let (cx, cy) = (x as isize, y as isize);
    for c in 0..image.channels() {
        let center = image.get(cx, cy, c);
        for dx in -half..=half {
            for dy in -half..=half {
                data.push(center - image.get(cx + dx, cy + dy, c));
            }
        }
    }
    Descriptor { x, y, data }
}

#[cfg(test)]
mod tests {
    use super::{describe_at, DESCRIPTOR_WINDOW};
    use crate::image::Image;

    #[test]
    fn descriptor_orders_dx_outer_dy_inner() {
        // value = 10 * x + y makes every entry identify its offset.
        let mut im = Image::new(7, 7, 1).unwrap();
        for y in 0..7 {
            for x in 0..7 {
                im.set(x, y, 0, (10 * x + y) as f32).unwrap();
            }
        }
        let d = describe_at(&im, 3, 3);
        assert_eq!(d.len(), DESCRIPTOR_WINDOW * DESCRIPTOR_WINDOW);
        // First entry: dx = -2, dy = -2.
        assert_eq!(d.data[0], 22.0);
        // Second entry: dx = -2, dy = -1.
        assert_eq!(d.data[1], 21.0);
        // Sixth entry: dx = -1, dy = -2.
        assert_eq!(d.data[5], 12.0);
        // Center.
        assert_eq!(d.data[12], 0.0);
    }

    #[test]
    fn descriptor_clamps_at_corner() {
        let im = Image::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2, 1).unwrap();
        let d = describe_at(&im, 0, 0);
        // dx = -2, dy = -2 clamps onto the center itself.
        assert_eq!(d.data[0], 0.0);
        // dx = 2, dy = 2 clamps onto (1, 1).
        assert_eq!(d.data[24], -3.0);
    }
}
