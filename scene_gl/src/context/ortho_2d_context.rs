/// 2-D overlay context — draw in unit window coordinates.
///
/// Inside the guard (0, 0) is the top-left of the viewport and (1, 1) the
/// bottom-right, and depth writes are off so overlays never occlude later
/// 3-D drawing. Both matrix stacks are pushed and restored.

use glam::Vec3;
use crate::device::{GlDevice, MatrixMode};

/// Guard over the 2-D overlay projection
pub struct Ortho2dContext<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> Ortho2dContext<'d> {
    pub fn new(device: &'d dyn GlDevice) -> Self {
        device.matrix_mode(MatrixMode::Projection);
        device.push_matrix();
        device.load_identity();
        device.ortho(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);

        device.matrix_mode(MatrixMode::ModelView);
        device.push_matrix();
        device.load_identity();
        device.translate(Vec3::new(0.0, 1.0, 0.0));
        device.scale(Vec3::new(1.0, -1.0, 1.0));

        device.depth_mask(false);
        Self { device }
    }
}

impl Drop for Ortho2dContext<'_> {
    fn drop(&mut self) {
        self.device.depth_mask(true);
        self.device.matrix_mode(MatrixMode::ModelView);
        self.device.pop_matrix();
        self.device.matrix_mode(MatrixMode::Projection);
        self.device.pop_matrix();
        self.device.matrix_mode(MatrixMode::ModelView);
    }
}

#[cfg(test)]
#[path = "ortho_2d_context_tests.rs"]
mod tests;
