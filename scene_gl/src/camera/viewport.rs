/// Viewport — fractional window rectangles mapped to pixel space.
///
/// Fractions are given with (0, 0) at the top-left of the window and
/// (1, 1) at the bottom-right. Pixel rectangles use the OpenGL convention
/// of a bottom-left origin, so the vertical fraction is flipped.

use glam::Vec2;
use crate::device::{Capability, GlDevice, PixelRect};

/// Pixel rectangle covered by a fractional sub-window
///
/// Fractions are clamped to [0, 1].
pub fn viewport_rect(top_left: Vec2, bottom_right: Vec2, window_size: (u32, u32)) -> PixelRect {
    let top_left = top_left.clamp(Vec2::ZERO, Vec2::ONE);
    let bottom_right = bottom_right.clamp(Vec2::ZERO, Vec2::ONE);
    let (width, height) = (window_size.0 as f32, window_size.1 as f32);

    let left = (top_left.x * width).round() as i32;
    let right = (bottom_right.x * width).round() as i32;
    let bottom = ((1.0 - bottom_right.y) * height).round() as i32;
    let top = ((1.0 - top_left.y) * height).round() as i32;

    PixelRect::new(left, bottom, right - left, top - bottom)
}

/// Restrict rendering to a fractional sub-window
///
/// Sets both the viewport and the scissor box and enables the scissor
/// test, so clears are clipped to the sub-window as well.
pub fn set_viewport(
    device: &dyn GlDevice,
    top_left: Vec2,
    bottom_right: Vec2,
    window_size: (u32, u32),
) -> PixelRect {
    let rect = viewport_rect(top_left, bottom_right, window_size);
    device.viewport(rect);
    device.scissor(rect);
    device.enable(Capability::ScissorTest);
    rect
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
