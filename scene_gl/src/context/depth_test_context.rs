/// Depth test context — temporary depth testing with a given comparison.

use crate::device::{AttribMask, Capability, CompareFunc, GlDevice};

/// Guard over the DEPTH_BUFFER attribute group
pub struct DepthTestContext<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> DepthTestContext<'d> {
    pub fn new(device: &'d dyn GlDevice, func: CompareFunc) -> Self {
        device.push_attrib(AttribMask::DEPTH_BUFFER);
        device.depth_func(func);
        device.enable(Capability::DepthTest);
        Self { device }
    }
}

impl Drop for DepthTestContext<'_> {
    fn drop(&mut self) {
        self.device.pop_attrib();
    }
}

#[cfg(test)]
#[path = "depth_test_context_tests.rs"]
mod tests;
