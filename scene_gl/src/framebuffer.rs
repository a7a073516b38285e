/// FrameBuffer — off-screen render target.
///
/// A colour texture (RGBA8, linear filtering) plus a 24-bit depth
/// renderbuffer, both `width`×`height`, attached to one frame buffer
/// object. Construction leaves the default target bound. Resizing means
/// dropping the buffer and creating a new one.

use crate::device::{
    FramebufferHandle, FramebufferStatus, GlDevice, PixelFormat, RenderbufferHandle,
    TextureFilter, TextureHandle, TextureWrap,
};
use crate::error::Result;

const SOURCE: &str = "scenegl::FrameBuffer";

/// Owned off-screen target
pub struct FrameBuffer<'d> {
    device: &'d dyn GlDevice,
    handle: FramebufferHandle,
    colour: TextureHandle,
    depth: RenderbufferHandle,
    width: u32,
    height: u32,
    alive: bool,
}

impl<'d> FrameBuffer<'d> {
    /// Allocate a complete frame buffer
    ///
    /// A zero dimension is an `InvalidArgument`. If the device reports the
    /// result incomplete, every object created so far is deleted and
    /// `ResourceCreationFailure` is returned.
    pub fn new(device: &'d dyn GlDevice, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "Frame buffer dimensions must be non-zero (got {}x{})", width, height);
        }

        let colour = device.gen_texture();
        device.bind_texture(Some(colour));
        device.tex_image_2d(PixelFormat::Rgba, width, height, PixelFormat::Rgba, None);
        device.tex_parameters(TextureFilter::Linear, TextureWrap::ClampToEdge);
        device.bind_texture(None);

        let depth = device.gen_renderbuffer();
        device.bind_renderbuffer(Some(depth));
        device.renderbuffer_depth_storage(width, height);
        device.bind_renderbuffer(None);

        let handle = device.gen_framebuffer();
        device.bind_framebuffer(Some(handle));
        device.framebuffer_colour_texture(colour);
        device.framebuffer_depth_renderbuffer(depth);
        let status = device.check_framebuffer_status();
        device.bind_framebuffer(None);

        let mut framebuffer = Self { device, handle, colour, depth, width, height, alive: true };

        if let FramebufferStatus::Incomplete(code) = status {
            framebuffer.release();
            crate::scenegl_bail!(SOURCE, ResourceCreationFailure,
                "Failed to create the {}x{} frame buffer (status 0x{:04X})", width, height, code);
        }

        crate::scenegl_debug!(SOURCE, "Created {}x{} frame buffer {:?}", width, height, handle);
        Ok(framebuffer)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn handle(&self) -> FramebufferHandle {
        self.handle
    }

    /// Texture holding the colour attachment
    pub fn colour_texture(&self) -> TextureHandle {
        self.colour
    }

    /// Direct rendering to this buffer until the returned guard drops
    ///
    /// Activations do not nest: dropping the guard always binds the
    /// default target, whatever was bound before.
    pub fn activate(&self) -> FrameBufferContext<'_, 'd> {
        self.device.bind_framebuffer(Some(self.handle));
        FrameBufferContext { framebuffer: self }
    }

    /// Delete the native objects (idempotent, failures are logged)
    pub fn release(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;

        let results = [
            ("renderbuffer", self.device.delete_renderbuffer(self.depth)),
            ("texture", self.device.delete_texture(self.colour)),
            ("frame buffer", self.device.delete_framebuffer(self.handle)),
        ];
        for (what, result) in results {
            if let Err(e) = result {
                crate::scenegl_warn!(SOURCE, "Failed to delete {} of frame buffer {:?}: {}", what, self.handle, e);
            }
        }
    }
}

impl Drop for FrameBuffer<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Guard returned by `FrameBuffer::activate`
pub struct FrameBufferContext<'f, 'd> {
    framebuffer: &'f FrameBuffer<'d>,
}

impl<'f, 'd> FrameBufferContext<'f, 'd> {
    pub fn framebuffer(&self) -> &'f FrameBuffer<'d> {
        self.framebuffer
    }
}

impl Drop for FrameBufferContext<'_, '_> {
    fn drop(&mut self) {
        self.framebuffer.device.bind_framebuffer(None);
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
