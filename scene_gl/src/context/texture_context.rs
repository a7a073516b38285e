/// Texture context — temporary 2-D texturing with one bound texture.

use crate::device::{AttribMask, Capability, GlDevice};
use crate::texture::Texture;

/// Guard that keeps a texture bound with TEXTURE_2D enabled
///
/// The device is taken from the texture.
pub struct TextureContext<'t, 'd> {
    texture: &'t Texture<'d>,
}

impl<'t, 'd> TextureContext<'t, 'd> {
    pub fn new(texture: &'t Texture<'d>) -> Self {
        let device = texture.device();
        device.push_attrib(AttribMask::ENABLE);
        device.enable(Capability::Texture2D);
        texture.bind();
        Self { texture }
    }

    pub fn texture(&self) -> &Texture<'d> {
        self.texture
    }

    fn device(&self) -> &dyn GlDevice {
        self.texture.device()
    }
}

impl Drop for TextureContext<'_, '_> {
    fn drop(&mut self) {
        self.texture.unbind();
        self.device().pop_attrib();
    }
}

#[cfg(test)]
#[path = "texture_context_tests.rs"]
mod tests;
