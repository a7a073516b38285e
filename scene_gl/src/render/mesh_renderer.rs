/// MeshRenderer — lit, culled, depth-tested drawing, on screen or off screen.
///
/// `render` draws into whatever target is bound. `render_to_image` renders
/// from a camera pose into a cached off-screen frame buffer and reads the
/// result back; the frame buffer is reused while the requested size stays
/// the same and recreated when it changes.
///
/// Every state change is scoped: after either call the device is in the
/// state it was in before, apart from the cached frame buffer's objects.

use glam::{Mat4, Vec2, Vec3};
use crate::camera::{modelview_from_pose, set_projection_matrix, set_viewport, CameraIntrinsics};
use crate::config::RendererConfig;
use crate::context::{AttribContext, DepthTestContext, LightingContext, MatrixContext};
use crate::device::{AttribMask, Capability, ClearMask, CompareFunc, Face, GlDevice, MatrixMode, MAX_LIGHTS};
use crate::error::Result;
use crate::framebuffer::FrameBuffer;
use crate::readback::{read_bgr_image, read_depth_image, BgrImage, DepthImage};
use super::Renderable;

const SOURCE: &str = "scenegl::MeshRenderer";

/// Colour and depth read back from one off-screen render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImages {
    pub colour: BgrImage,
    pub depth: DepthImage,
}

/// Mesh and scene renderer
pub struct MeshRenderer<'d> {
    device: &'d dyn GlDevice,
    config: RendererConfig,
    framebuffer: Option<FrameBuffer<'d>>,
}

impl<'d> MeshRenderer<'d> {
    pub fn new(device: &'d dyn GlDevice) -> Self {
        Self::with_config(device, RendererConfig::default())
    }

    pub fn with_config(device: &'d dyn GlDevice, config: RendererConfig) -> Self {
        Self { device, config, framebuffer: None }
    }

    pub fn device(&self) -> &'d dyn GlDevice {
        self.device
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Size of the cached off-screen frame buffer, if one exists
    pub fn framebuffer_size(&self) -> Option<(u32, u32)> {
        self.framebuffer.as_ref().map(FrameBuffer::size)
    }

    /// Drop the cached frame buffer
    pub fn release(&mut self) {
        if let Some(mut framebuffer) = self.framebuffer.take() {
            framebuffer.release();
        }
    }

    fn check_light_count(&self, light_dirs: Option<&[Vec3]>) -> Result<()> {
        if let Some(dirs) = light_dirs {
            if dirs.len() > MAX_LIGHTS as usize {
                crate::scenegl_bail!(SOURCE, InvalidArgument,
                    "At most {} light directions can be specified (got {})", MAX_LIGHTS, dirs.len());
            }
        }
        Ok(())
    }

    /// Draw `renderable` lit by directional lights shining from `light_dirs`
    ///
    /// Each direction points from the scene towards its light, so the light
    /// position is `(dir, 0)`.
    ///
    /// `None` selects the two default opposing lights; an empty slice means
    /// no lights at all. More than `MAX_LIGHTS` directions is an
    /// `InvalidArgument`, raised before any device call.
    pub fn render<R: Renderable + ?Sized>(&self, renderable: &R, light_dirs: Option<&[Vec3]>) -> Result<()> {
        self.check_light_count(light_dirs)?;
        let defaults = self.config.default_light_directions();
        let travel: Vec<Vec3> = light_dirs.unwrap_or(&defaults).iter().map(|dir| -*dir).collect();

        let device = self.device;
        let _lighting = LightingContext::directional(device, &travel)?;
        device.cull_face(Face::Back);
        device.enable(Capability::CullFace);
        let _depth = DepthTestContext::new(device, CompareFunc::LessEqual);

        renderable.render();
        Ok(())
    }

    /// Render from `world_from_camera` into a `width`×`height` BGR image
    pub fn render_to_image<R: Renderable + ?Sized>(
        &mut self,
        renderable: &R,
        world_from_camera: &Mat4,
        image_size: (u32, u32),
        intrinsics: &CameraIntrinsics,
        light_dirs: Option<&[Vec3]>,
    ) -> Result<BgrImage> {
        self.render_offscreen(renderable, world_from_camera, image_size, intrinsics, light_dirs, |device, (w, h), _| {
            read_bgr_image(device, w, h)
        })
    }

    /// Like `render_to_image`, also reading back eye-space depth
    ///
    /// Depth is linearized with the configured clip planes; pixels where
    /// nothing was drawn hold 0.0.
    pub fn render_to_image_with_depth<R: Renderable + ?Sized>(
        &mut self,
        renderable: &R,
        world_from_camera: &Mat4,
        image_size: (u32, u32),
        intrinsics: &CameraIntrinsics,
        light_dirs: Option<&[Vec3]>,
    ) -> Result<RenderedImages> {
        self.render_offscreen(renderable, world_from_camera, image_size, intrinsics, light_dirs, |device, (w, h), config| {
            RenderedImages {
                colour: read_bgr_image(device, w, h),
                depth: read_depth_image(device, w, h, config.clip),
            }
        })
    }

    fn render_offscreen<R, T, F>(
        &mut self,
        renderable: &R,
        world_from_camera: &Mat4,
        image_size: (u32, u32),
        intrinsics: &CameraIntrinsics,
        light_dirs: Option<&[Vec3]>,
        read: F,
    ) -> Result<T>
    where
        R: Renderable + ?Sized,
        F: FnOnce(&dyn GlDevice, (u32, u32), &RendererConfig) -> T,
    {
        self.check_light_count(light_dirs)?;
        intrinsics.validate()?;
        self.ensure_framebuffer(image_size)?;

        let this = &*self;
        let device = this.device;
        let (width, height) = image_size;
        let Some(framebuffer) = this.framebuffer.as_ref() else {
            crate::scenegl_bail!(SOURCE, ResourceCreationFailure, "No off-screen frame buffer available");
        };

        let _target = framebuffer.activate();
        let _saved = AttribContext::new(
            device,
            AttribMask::VIEWPORT
                | AttribMask::SCISSOR
                | AttribMask::ENABLE
                | AttribMask::COLOR_BUFFER
                | AttribMask::TRANSFORM,
        );

        set_viewport(device, Vec2::ZERO, Vec2::ONE, image_size);
        device.clear_colour(this.config.clear_colour);
        device.clear(ClearMask::COLOR | ClearMask::DEPTH);

        let clip = this.config.clip;
        let _projection = MatrixContext::new(device, MatrixMode::Projection, |d| {
            set_projection_matrix(d, intrinsics, width, height, clip)
        });
        let _modelview = MatrixContext::load(device, MatrixMode::ModelView, &modelview_from_pose(world_from_camera));

        this.render(renderable, light_dirs)?;
        Ok(read(device, image_size, &this.config))
    }

    /// Make sure the cached frame buffer exists with the given size
    fn ensure_framebuffer(&mut self, (width, height): (u32, u32)) -> Result<()> {
        if self.framebuffer_size() == Some((width, height)) {
            return Ok(());
        }
        if let Some((old_w, old_h)) = self.framebuffer_size() {
            crate::scenegl_debug!(SOURCE, "Resizing off-screen buffer {}x{} -> {}x{}", old_w, old_h, width, height);
        }
        self.release();
        self.framebuffer = Some(FrameBuffer::new(self.device, width, height)?);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mesh_renderer_tests.rs"]
mod tests;
