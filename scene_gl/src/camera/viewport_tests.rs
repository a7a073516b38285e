use glam::Vec2;
use crate::device::{Capability, GlDevice, MockGlDevice, PixelRect};
use super::*;

#[test]
fn test_full_window() {
    let rect = viewport_rect(Vec2::ZERO, Vec2::ONE, (640, 480));
    assert_eq!(rect, PixelRect::new(0, 0, 640, 480));
}

#[test]
fn test_centred_quarter() {
    let rect = viewport_rect(Vec2::new(0.25, 0.25), Vec2::new(0.75, 0.75), (800, 600));
    assert_eq!(rect, PixelRect::new(200, 150, 400, 300));
}

#[test]
fn test_top_half_maps_to_upper_pixels() {
    let rect = viewport_rect(Vec2::ZERO, Vec2::new(1.0, 0.5), (640, 480));
    assert_eq!(rect, PixelRect::new(0, 240, 640, 240));
}

#[test]
fn test_bottom_right_quadrant() {
    let rect = viewport_rect(Vec2::new(0.5, 0.5), Vec2::ONE, (100, 60));
    assert_eq!(rect, PixelRect::new(50, 0, 50, 30));
}

#[test]
fn test_fractions_are_rounded() {
    let rect = viewport_rect(Vec2::new(0.333, 0.0), Vec2::new(0.667, 1.0), (100, 100));
    assert_eq!(rect, PixelRect::new(33, 0, 34, 100));
}

#[test]
fn test_out_of_range_fractions_are_clamped() {
    let rect = viewport_rect(Vec2::new(-0.5, -1.0), Vec2::new(2.0, 1.5), (320, 240));
    assert_eq!(rect, PixelRect::new(0, 0, 320, 240));
}

#[test]
fn test_set_viewport_configures_device() {
    let device = MockGlDevice::new(800, 600);
    let rect = set_viewport(&device, Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.5), (800, 600));

    assert_eq!(rect, PixelRect::new(400, 300, 400, 300));
    let state = device.state();
    assert_eq!(state.viewport, rect);
    assert_eq!(state.scissor, rect);
    assert!(device.is_enabled(Capability::ScissorTest));
}
