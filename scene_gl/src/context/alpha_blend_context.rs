/// Alpha-blend context — temporary source-over blending.

use crate::device::{AttribMask, BlendFactor, Capability, GlDevice};

/// Guard over the COLOR_BUFFER attribute group
pub struct AlphaBlendContext<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> AlphaBlendContext<'d> {
    pub fn new(device: &'d dyn GlDevice) -> Self {
        device.push_attrib(AttribMask::COLOR_BUFFER);
        device.enable(Capability::Blend);
        device.blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        Self { device }
    }
}

impl Drop for AlphaBlendContext<'_> {
    fn drop(&mut self) {
        self.device.pop_attrib();
    }
}

#[cfg(test)]
#[path = "alpha_blend_context_tests.rs"]
mod tests;
