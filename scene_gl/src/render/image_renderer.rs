/// ImageRenderer — colour images drawn over the current viewport.
///
/// Keeps one texture that is re-filled on every call.

use image::DynamicImage;
use crate::context::{AlphaBlendContext, Ortho2dContext, TextureContext};
use crate::device::GlDevice;
use crate::error::Result;
use crate::shapes::emit_unit_quad;
use crate::texture::Texture;

/// Full-viewport image overlay
pub struct ImageRenderer<'d> {
    texture: Texture<'d>,
}

impl<'d> ImageRenderer<'d> {
    pub fn new(device: &'d dyn GlDevice) -> Self {
        Self { texture: Texture::new(device) }
    }

    pub fn texture(&self) -> &Texture<'d> {
        &self.texture
    }

    /// Draw `image` stretched over the viewport, top row at the top
    ///
    /// With `use_alpha_blending` the image's alpha channel blends it over
    /// what is already drawn. The image must be `ImageRgb8` or
    /// `ImageRgba8`; anything else is an `InvalidArgument` and nothing is
    /// drawn.
    pub fn render_image(&self, image: &DynamicImage, use_alpha_blending: bool) -> Result<()> {
        self.texture.set_image(image)?;

        let device = self.texture.device();
        let _blend = use_alpha_blending.then(|| AlphaBlendContext::new(device));
        let _overlay = Ortho2dContext::new(device);
        let _texture = TextureContext::new(&self.texture);
        emit_unit_quad(device);
        Ok(())
    }

    /// Delete the texture (idempotent)
    pub fn release(&mut self) {
        self.texture.release();
    }
}

#[cfg(test)]
#[path = "image_renderer_tests.rs"]
mod tests;
