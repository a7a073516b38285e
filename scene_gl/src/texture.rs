/// Texture — one GPU texture object.
///
/// Created empty; `set_image` uploads an 8-bit RGB or RGBA image and sets
/// linear filtering with clamp-to-edge wrapping. The native object is
/// released exactly once, by `release` or on drop. A failed release is
/// logged and otherwise ignored.

use std::cell::Cell;
use image::DynamicImage;
use crate::device::{GlDevice, PixelFormat, TextureFilter, TextureHandle, TextureWrap};
use crate::error::Result;

const SOURCE: &str = "scenegl::Texture";

/// Owned GPU texture
pub struct Texture<'d> {
    device: &'d dyn GlDevice,
    handle: TextureHandle,
    format: Cell<Option<PixelFormat>>,
    size: Cell<(u32, u32)>,
    alive: bool,
}

impl<'d> Texture<'d> {
    /// Create an empty texture object
    pub fn new(device: &'d dyn GlDevice) -> Self {
        let handle = device.gen_texture();
        crate::scenegl_trace!(SOURCE, "Created texture {:?}", handle);
        Self {
            device,
            handle,
            format: Cell::new(None),
            size: Cell::new((0, 0)),
            alive: true,
        }
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn device(&self) -> &'d dyn GlDevice {
        self.device
    }

    /// Pixel layout of the current image (`None` until the first upload)
    pub fn format(&self) -> Option<PixelFormat> {
        self.format.get()
    }

    /// Width and height of the current image
    pub fn size(&self) -> (u32, u32) {
        self.size.get()
    }

    pub fn bind(&self) {
        self.device.bind_texture(Some(self.handle));
    }

    pub fn unbind(&self) {
        self.device.bind_texture(None);
    }

    /// Replace the texture contents with `image`
    ///
    /// Only `ImageRgb8` and `ImageRgba8` are accepted; anything else is an
    /// `InvalidArgument` and leaves the texture untouched. The texture is
    /// left bound.
    pub fn set_image(&self, image: &DynamicImage) -> Result<()> {
        let (format, pixels) = match image {
            DynamicImage::ImageRgb8(buffer) => (PixelFormat::Rgb, buffer.as_raw().as_slice()),
            DynamicImage::ImageRgba8(buffer) => (PixelFormat::Rgba, buffer.as_raw().as_slice()),
            other => {
                crate::scenegl_bail!(SOURCE, InvalidArgument,
                    "Texture images must have 3 or 4 8-bit channels (got {:?})", other.color());
            }
        };
        self.upload(format, image.width(), image.height(), pixels)
    }

    /// Replace the texture contents with tightly packed rows of `format` pixels
    pub fn set_pixels(&self, format: PixelFormat, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
        if !matches!(format, PixelFormat::Rgb | PixelFormat::Rgba) {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "Texture pixels must be RGB or RGBA (got {:?})", format);
        }
        let expected = width as usize * height as usize * format.channels();
        if pixels.len() != expected {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "Expected {} bytes for a {}x{} {:?} image (got {})",
                expected, width, height, format, pixels.len());
        }
        self.upload(format, width, height, pixels)
    }

    fn upload(&self, format: PixelFormat, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
        self.bind();
        self.device.tex_image_2d(format, width, height, format, Some(pixels));
        self.device.tex_parameters(TextureFilter::Linear, TextureWrap::ClampToEdge);
        self.format.set(Some(format));
        self.size.set((width, height));
        Ok(())
    }

    /// Delete the native texture (idempotent)
    pub fn release(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        if let Err(e) = self.device.delete_texture(self.handle) {
            crate::scenegl_warn!(SOURCE, "Failed to delete texture {:?}: {}", self.handle, e);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Drop for Texture<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
