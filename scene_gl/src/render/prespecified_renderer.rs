/// PrespecifiedRenderer — one renderable and its lights, bound up front.
///
/// Wraps a `MeshRenderer` that is either owned (created on demand for the
/// device) or borrowed from the caller, so several prespecified renderers
/// can share one cached frame buffer.

use glam::{Mat4, Vec3};
use crate::camera::CameraIntrinsics;
use crate::device::GlDevice;
use crate::error::Result;
use crate::readback::BgrImage;
use super::{MeshRenderer, Renderable, RenderedImages};

/// Mesh renderer held by a `PrespecifiedRenderer`
pub enum BaseRenderer<'r, 'd> {
    Owned(MeshRenderer<'d>),
    Borrowed(&'r mut MeshRenderer<'d>),
}

impl<'r, 'd> BaseRenderer<'r, 'd> {
    pub fn get(&self) -> &MeshRenderer<'d> {
        match self {
            BaseRenderer::Owned(renderer) => renderer,
            BaseRenderer::Borrowed(renderer) => renderer,
        }
    }

    pub fn get_mut(&mut self) -> &mut MeshRenderer<'d> {
        match self {
            BaseRenderer::Owned(renderer) => renderer,
            BaseRenderer::Borrowed(renderer) => renderer,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, BaseRenderer::Owned(_))
    }
}

/// Renderer with a fixed renderable and light set
pub struct PrespecifiedRenderer<'r, 'd, R: Renderable> {
    base: BaseRenderer<'r, 'd>,
    renderable: R,
    light_dirs: Option<Vec<Vec3>>,
}

impl<'r, 'd, R: Renderable> PrespecifiedRenderer<'r, 'd, R> {
    /// Bind `renderable` to a fresh mesh renderer on `device`
    pub fn new(device: &'d dyn GlDevice, renderable: R, light_dirs: Option<Vec<Vec3>>) -> Self {
        Self {
            base: BaseRenderer::Owned(MeshRenderer::new(device)),
            renderable,
            light_dirs,
        }
    }

    /// Bind `renderable` to a caller-owned mesh renderer
    pub fn with_base(base: &'r mut MeshRenderer<'d>, renderable: R, light_dirs: Option<Vec<Vec3>>) -> Self {
        Self {
            base: BaseRenderer::Borrowed(base),
            renderable,
            light_dirs,
        }
    }

    pub fn base(&self) -> &BaseRenderer<'r, 'd> {
        &self.base
    }

    pub fn renderable(&self) -> &R {
        &self.renderable
    }

    pub fn light_dirs(&self) -> Option<&[Vec3]> {
        self.light_dirs.as_deref()
    }

    /// Draw the renderable into the currently bound target
    pub fn render(&self) -> Result<()> {
        self.base.get().render(&self.renderable, self.light_dirs.as_deref())
    }

    /// Render the bound renderable from `world_from_camera`
    pub fn render_to_image(
        &mut self,
        world_from_camera: &Mat4,
        image_size: (u32, u32),
        intrinsics: &CameraIntrinsics,
    ) -> Result<BgrImage> {
        let Self { base, renderable, light_dirs } = self;
        base.get_mut()
            .render_to_image(&*renderable, world_from_camera, image_size, intrinsics, light_dirs.as_deref())
    }

    /// Like `render_to_image`, also reading back eye-space depth
    pub fn render_to_image_with_depth(
        &mut self,
        world_from_camera: &Mat4,
        image_size: (u32, u32),
        intrinsics: &CameraIntrinsics,
    ) -> Result<RenderedImages> {
        let Self { base, renderable, light_dirs } = self;
        base.get_mut()
            .render_to_image_with_depth(&*renderable, world_from_camera, image_size, intrinsics, light_dirs.as_deref())
    }
}

#[cfg(test)]
#[path = "prespecified_renderer_tests.rs"]
mod tests;
