use cornerconv::detect::{cornerness_with_alpha, describe_at};
use cornerconv::{
    cornerness, detect_corners, non_max_suppress, structure_tensor, CornerConvError,
    HarrisConfig, HarrisDetector, Image, StructureTensor, DESCRIPTOR_WINDOW, SUPPRESSED_SCORE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn square_image(size: usize, x0: usize, side: usize, channels: usize) -> Image {
    let mut im = Image::new(size, size, channels).unwrap();
    for c in 0..channels {
        for y in x0..x0 + side {
            for x in x0..x0 + side {
                im.set(x, y, c, 1.0 / (c + 1) as f32).unwrap();
            }
        }
    }
    im
}

fn random_image(rng: &mut StdRng, width: usize, height: usize, channels: usize) -> Image {
    let data = (0..width * height * channels)
        .map(|_| rng.random::<f32>())
        .collect();
    Image::from_vec(data, width, height, channels).unwrap()
}

fn rotate_180(im: &Image) -> Image {
    let mut out = Image::new(im.width(), im.height(), im.channels()).unwrap();
    let (w, h) = (im.width() as isize, im.height() as isize);
    for c in 0..im.channels() {
        for y in 0..h {
            for x in 0..w {
                let v = im.get(w - 1 - x, h - 1 - y, c);
                out.set(x as usize, y as usize, c, v).unwrap();
            }
        }
    }
    out
}

#[test]
fn flat_image_has_no_corners() {
    let mut im = Image::new(10, 10, 1).unwrap();
    im.data_mut().fill(0.5);

    let tensor = structure_tensor(&im, 1.0).unwrap();
    assert_eq!(tensor.channels(), 3);
    assert!(tensor.data().iter().all(|&v| v == 0.0));

    let tensor = StructureTensor::build(&im, 1.0).unwrap();
    let map = cornerness(&tensor).unwrap();
    assert!(map.data().iter().all(|&v| v == 0.0));

    let corners = detect_corners(&im, 1.0, 1e-3, 2).unwrap();
    assert!(corners.is_empty());
}

#[test]
fn small_square_yields_single_centered_corner() {
    let im = square_image(15, 6, 3, 1);
    let corners = detect_corners(&im, 1.0, 0.0, 2).unwrap();
    assert_eq!(corners.len(), 1);
    let corner = &corners[0];
    assert!(corner.x.abs_diff(7) <= 1, "x = {}", corner.x);
    assert!(corner.y.abs_diff(7) <= 1, "y = {}", corner.y);
    assert_eq!(corner.len(), DESCRIPTOR_WINDOW * DESCRIPTOR_WINDOW);
}

#[test]
fn large_square_yields_four_corners_in_row_major_order() {
    let im = square_image(24, 8, 8, 1);
    let corners = detect_corners(&im, 1.0, 0.5, 3).unwrap();
    let positions: Vec<(usize, usize)> = corners.iter().map(|d| (d.x, d.y)).collect();
    assert_eq!(positions, vec![(8, 8), (15, 8), (8, 15), (15, 15)]);
}

#[test]
fn multichannel_descriptors_cover_every_channel() {
    let im = square_image(24, 8, 8, 3);
    let corners = detect_corners(&im, 1.0, 0.1, 3).unwrap();
    assert!(!corners.is_empty());
    for d in &corners {
        assert_eq!(d.len(), DESCRIPTOR_WINDOW * DESCRIPTOR_WINDOW * 3);
        assert_eq!(*d, describe_at(&im, d.x, d.y));
    }
}

#[test]
fn descriptor_measures_contrast_against_center() {
    let im = square_image(24, 8, 8, 1);
    let corners = detect_corners(&im, 1.0, 0.5, 3).unwrap();
    let top_left = &corners[0];
    assert_eq!((top_left.x, top_left.y), (8, 8));
    // Entry for (dx, dy) sits at (dx + 2) * 5 + (dy + 2).
    let at = |dx: isize, dy: isize| top_left.data[((dx + 2) * 5 + (dy + 2)) as usize];
    assert_eq!(at(0, 0), 0.0);
    assert_eq!(at(-1, 0), 1.0);
    assert_eq!(at(0, -2), 1.0);
    assert_eq!(at(2, 2), 0.0);
}

#[test]
fn corners_are_listed_row_major() {
    let mut rng = StdRng::seed_from_u64(99);
    let im = random_image(&mut rng, 40, 30, 1);
    let corners = detect_corners(&im, 1.0, 0.0, 2).unwrap();
    assert!(!corners.is_empty());
    for pair in corners.windows(2) {
        assert!((pair[0].y, pair[0].x) < (pair[1].y, pair[1].x));
    }
}

#[test]
fn threshold_above_every_response_yields_nothing() {
    let im = square_image(24, 8, 8, 1);
    assert!(detect_corners(&im, 1.0, 1e9, 3).unwrap().is_empty());
}

#[test]
fn oversized_nms_radius_keeps_only_global_maximum() {
    let mut im = Image::new(8, 8, 1).unwrap();
    im.set(4, 4, 0, 1.0).unwrap();
    let tensor = StructureTensor::build(&im, 1.0).unwrap();
    let map = cornerness(&tensor).unwrap();
    let best = map.data().iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert!(best > 0.0);

    let corners = detect_corners(&im, 1.0, 0.0, usize::MAX).unwrap();
    assert!(!corners.is_empty());
    for d in &corners {
        assert_eq!(map.get(d.x as isize, d.y as isize, 0), best);
    }

    let suppressed = non_max_suppress(&map, usize::MAX);
    for (&v, &s) in map.data().iter().zip(suppressed.data()) {
        if v == best {
            assert_eq!(s, best);
        } else {
            assert_eq!(s, SUPPRESSED_SCORE);
        }
    }
}

#[test]
fn detector_rejects_invalid_sigma() {
    let im = square_image(12, 4, 4, 1);
    let err = detect_corners(&im, -2.0, 0.0, 2).err().unwrap();
    assert_eq!(err, CornerConvError::InvalidSigma { sigma: -2.0 });
}

#[test]
fn detection_leaves_source_untouched() {
    let im = square_image(20, 6, 6, 2);
    let before = im.clone();
    let _ = detect_corners(&im, 1.5, 0.1, 2).unwrap();
    assert_eq!(im, before);
}

#[test]
fn detector_response_matches_free_functions() {
    let mut rng = StdRng::seed_from_u64(4);
    let im = random_image(&mut rng, 16, 16, 2);
    let cfg = HarrisConfig {
        sigma: 1.5,
        alpha: 0.04,
        ..HarrisConfig::default()
    };
    let response = HarrisDetector::new(cfg).response(&im).unwrap();
    let tensor = StructureTensor::build(&im, 1.5).unwrap();
    assert_eq!(response, cornerness_with_alpha(&tensor, 0.04).unwrap());
}

#[test]
fn cornerness_is_symmetric_under_rotation() {
    let mut rng = StdRng::seed_from_u64(17);
    let im = random_image(&mut rng, 14, 11, 1);
    let rotated = rotate_180(&im);

    let direct = cornerness(&StructureTensor::build(&im, 1.0).unwrap()).unwrap();
    let from_rotated = cornerness(&StructureTensor::build(&rotated, 1.0).unwrap()).unwrap();
    let expected = rotate_180(&direct);

    for (a, b) in from_rotated.data().iter().zip(expected.data()) {
        let tol = 1e-3 * a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= tol, "{a} vs {b}");
    }
}

#[test]
fn non_max_suppression_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(23);
    let map = random_image(&mut rng, 20, 15, 1);
    let once = non_max_suppress(&map, 2);
    let twice = non_max_suppress(&once, 2);
    assert_eq!(once, twice);
    assert!(once.data().contains(&SUPPRESSED_SCORE));
    assert!(once.data().iter().any(|&v| v != SUPPRESSED_SCORE));
}

#[test]
fn suppressed_pixels_never_pass_threshold() {
    let im = square_image(24, 8, 8, 1);
    let tensor = StructureTensor::build(&im, 1.0).unwrap();
    let map = cornerness(&tensor).unwrap();
    let suppressed = non_max_suppress(&map, 3);
    let survivors = suppressed.data().iter().filter(|&&v| v > 0.5).count();
    assert_eq!(survivors, 4);
    assert_eq!(map.get(8, 8, 0), suppressed.get(8, 8, 0));
}
