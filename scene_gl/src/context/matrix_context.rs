/// Matrix context — temporary change of one matrix stack.
///
/// Selects the stack, pushes a copy of its top and lets the caller modify
/// it. Dropping the guard selects the same stack again and pops, so the
/// matrix is restored bit for bit. The selected matrix mode after the drop
/// is the guard's mode.

use glam::Mat4;
use crate::device::{GlDevice, MatrixMode};

/// Guard over one pushed matrix
pub struct MatrixContext<'d> {
    device: &'d dyn GlDevice,
    mode: MatrixMode,
}

impl<'d> MatrixContext<'d> {
    /// Push the `mode` stack and apply `change` to its new top
    pub fn new<F>(device: &'d dyn GlDevice, mode: MatrixMode, change: F) -> Self
    where
        F: FnOnce(&dyn GlDevice),
    {
        device.matrix_mode(mode);
        device.push_matrix();
        change(device);
        Self { device, mode }
    }

    /// Push the `mode` stack and replace its top with `matrix`
    pub fn load(device: &'d dyn GlDevice, mode: MatrixMode, matrix: &Mat4) -> Self {
        Self::new(device, mode, |d| d.load_matrix(matrix))
    }

    pub fn mode(&self) -> MatrixMode {
        self.mode
    }
}

impl Drop for MatrixContext<'_> {
    fn drop(&mut self) {
        self.device.matrix_mode(self.mode);
        self.device.pop_matrix();
    }
}

#[cfg(test)]
#[path = "matrix_context_tests.rs"]
mod tests;
