use cornerconv::{CornerConvError, Image};

fn ramp(width: usize, height: usize, channels: usize) -> Image {
    let data = (0..width * height * channels).map(|v| v as f32).collect();
    Image::from_vec(data, width, height, channels).unwrap()
}

#[test]
fn image_rejects_invalid_dimensions() {
    let err = Image::new(0, 3, 1).err().unwrap();
    assert_eq!(
        err,
        CornerConvError::InvalidDimensions {
            width: 0,
            height: 3,
            channels: 1,
        }
    );

    let err = Image::new(3, 3, 0).err().unwrap();
    assert_eq!(
        err,
        CornerConvError::InvalidDimensions {
            width: 3,
            height: 3,
            channels: 0,
        }
    );
}

#[test]
fn image_new_is_zero_filled() {
    let im = Image::new(4, 3, 2).unwrap();
    assert_eq!(im.data().len(), 24);
    assert!(im.data().iter().all(|&v| v == 0.0));
}

#[test]
fn from_vec_rejects_wrong_length() {
    let err = Image::from_vec(vec![0.0; 5], 2, 2, 1).err().unwrap();
    assert_eq!(
        err,
        CornerConvError::BufferSizeMismatch {
            expected: 4,
            got: 5,
        }
    );
}

#[test]
fn buffer_is_channel_major() {
    let im = ramp(3, 2, 2);
    assert_eq!(im.channel(0).unwrap(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(im.channel(1).unwrap(), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
    assert!(im.channel(2).is_none());
    assert_eq!(im.get(2, 1, 1), 11.0);
}

#[test]
fn reads_clamp_to_nearest_edge() {
    let im = ramp(3, 2, 1);
    assert_eq!(im.get(-5, -5, 0), 0.0);
    assert_eq!(im.get(10, 0, 0), 2.0);
    assert_eq!(im.get(1, 9, 0), 4.0);
    assert_eq!(im.get(-1, 1, 0), 3.0);
    assert_eq!(im.get(isize::MAX, isize::MAX, 0), 5.0);
}

#[test]
fn invalid_channel_reads_zero() {
    let im = ramp(2, 2, 1);
    assert_eq!(im.get(0, 0, 1), 0.0);
    assert_eq!(
        im.try_get(0, 0, 3).err(),
        Some(CornerConvError::InvalidChannel {
            channel: 3,
            channels: 1,
        })
    );
    assert_eq!(im.try_get(-1, 7, 0), Ok(2.0));
}

#[test]
fn set_rejects_out_of_range_and_leaves_image_untouched() {
    let mut im = ramp(2, 2, 2);
    let before = im.clone();

    let err = im.set(2, 0, 0, 9.0).err().unwrap();
    assert_eq!(
        err,
        CornerConvError::OutOfBounds {
            x: 2,
            y: 0,
            channel: 0,
            width: 2,
            height: 2,
            channels: 2,
        }
    );
    assert!(im.set(0, 2, 0, 9.0).is_err());
    // One past the last channel is rejected as well.
    assert!(im.set(0, 0, 2, 9.0).is_err());
    assert_eq!(im, before);

    im.set(1, 1, 1, -3.0).unwrap();
    assert_eq!(im.get(1, 1, 1), -3.0);
}

#[test]
fn copy_is_independent_of_original() {
    let original = ramp(4, 4, 3);
    let mut copy = original.clone();
    for c in 0..3 {
        for y in 0..4 {
            for x in 0..4 {
                copy.set(x, y, c, 100.0).unwrap();
            }
        }
    }
    assert_eq!(original, ramp(4, 4, 3));
    assert!(copy.data().iter().all(|&v| v == 100.0));
}

#[test]
fn reshape_reuses_buffer_with_new_shape() {
    let row = ramp(5, 1, 1);
    let column = row.reshape(1, 5).unwrap();
    assert_eq!((column.width(), column.height()), (1, 5));
    assert_eq!(column.get(0, 4, 0), 4.0);

    let err = column.reshape(2, 2).err().unwrap();
    assert_eq!(
        err,
        CornerConvError::BufferSizeMismatch {
            expected: 4,
            got: 5,
        }
    );
}
