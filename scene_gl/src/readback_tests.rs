use crate::camera::DEFAULT_CLIP_PLANES;
use crate::device::{ClearMask, MockGlDevice};
use super::*;

#[test]
fn test_pixel_index_does_not_wrap_past_u32() {
    assert_eq!(pixel_index(70_000, 5, 70_000), 4_900_000_005);
    assert_eq!(pixel_index(4, 3, 2), 11);
}

#[test]
fn test_bgr_rows_are_flipped() {
    let device = MockGlDevice::new(3, 2);
    // Bottom row red, top row blue
    device.set_pixel_source(|_, y| if y == 0 { [255, 0, 0, 255] } else { [0, 0, 255, 255] });

    let image = read_bgr_image(&device, 3, 2);

    assert_eq!(image.width(), 3);
    assert_eq!(image.height(), 2);
    assert_eq!(image.as_bytes().len(), 3 * 2 * 3);
    assert_eq!(image.pixel(0, 0), [255, 0, 0]);
    assert_eq!(image.pixel(2, 1), [0, 0, 255]);
}

#[test]
fn test_bgr_to_rgb_image() {
    let device = MockGlDevice::new(2, 2);
    device.set_pixel_source(|x, _| [x as u8 * 100, 50, 7, 255]);

    let rgb = read_bgr_image(&device, 2, 2).to_rgb_image();

    assert_eq!(rgb.dimensions(), (2, 2));
    assert_eq!(rgb.get_pixel(1, 0).0, [100, 50, 7]);
}

#[test]
fn test_cleared_depth_reads_as_background() {
    let device = MockGlDevice::new(4, 4);
    device.clear(ClearMask::DEPTH);

    let depth = read_depth_image(&device, 4, 4, DEFAULT_CLIP_PLANES);

    assert!(depth.as_slice().iter().all(|&d| d == 0.0));
}

#[test]
fn test_depth_is_linearized_and_flipped() {
    let device = MockGlDevice::new(2, 2);
    device.set_depth_source(|_, y| if y == 0 { 0.0 } else { 1.0 });

    let depth = read_depth_image(&device, 2, 2, DEFAULT_CLIP_PLANES);

    // Top row is background, bottom row sits on the near plane
    assert_eq!(depth.depth(0, 0), 0.0);
    assert!((depth.depth(1, 1) - 0.1).abs() < 1e-6);
    assert_eq!(depth.to_luma_image().get_pixel(1, 1).0[0], depth.depth(1, 1));
}

#[test]
fn test_flip_rows() {
    assert_eq!(flip_rows(&[1, 2, 3, 4, 5, 6], 2), vec![5, 6, 3, 4, 1, 2]);
    assert!(flip_rows::<u8>(&[], 0).is_empty());
}
