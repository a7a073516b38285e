/// Attribute contexts — save and restore server attribute groups and
/// client vertex array state.

use crate::device::{AttribMask, GlDevice};

/// Guard over one `push_attrib`
pub struct AttribContext<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> AttribContext<'d> {
    pub fn new(device: &'d dyn GlDevice, mask: AttribMask) -> Self {
        device.push_attrib(mask);
        Self { device }
    }
}

impl Drop for AttribContext<'_> {
    fn drop(&mut self) {
        self.device.pop_attrib();
    }
}

/// Guard over one `push_client_attrib`
pub struct ClientAttribContext<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> ClientAttribContext<'d> {
    pub fn new(device: &'d dyn GlDevice) -> Self {
        device.push_client_attrib();
        Self { device }
    }
}

impl Drop for ClientAttribContext<'_> {
    fn drop(&mut self) {
        self.device.pop_client_attrib();
    }
}

#[cfg(test)]
#[path = "attrib_context_tests.rs"]
mod tests;
