/// OpenGlDevice - GlDevice over a current compatibility-profile context
///
/// Holds the resolved function table. The context itself belongs to the
/// windowing layer; it must stay current on the calling thread for the
/// device's whole lifetime.

use std::ffi::{c_void, CStr};
use std::ptr;
use glam::{Mat4, Vec2, Vec3};
use scene_gl::scenegl::device::{
    AttribMask, BlendFactor, BufferHandle, BufferTarget, Capability, ClearMask, ClientArray,
    CompareFunc, Face, FramebufferHandle, FramebufferStatus, GlDevice, LightParam, MatrixMode,
    PixelFormat, PixelRect, PrimitiveMode, RenderbufferHandle, TextureFilter, TextureHandle,
    TextureWrap,
};
use scene_gl::scenegl::Result;
use scene_gl::{scenegl_bail, scenegl_err, scenegl_info, scenegl_warn};
use crate::gl;
use crate::gl::types::{GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use crate::opengl_format::*;

const SOURCE: &str = "scenegl::opengl";

/// Backend options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenGlConfig {
    /// Query `glGetError` after state-changing calls and log what it reports
    pub check_errors: bool,
}

impl Default for OpenGlConfig {
    fn default() -> Self {
        Self {
            check_errors: cfg!(debug_assertions) || cfg!(feature = "gl-error-checks"),
        }
    }
}

/// Fixed-function OpenGL device
pub struct OpenGlDevice {
    gl: gl::Gl,
    config: OpenGlConfig,
}

impl OpenGlDevice {
    /// Resolve the function table through `loader`
    ///
    /// Fails with `ResourceCreationFailure` when any entry point SceneGL
    /// relies on cannot be resolved (typically a core-profile context).
    pub fn load_with<F>(mut loader: F, config: OpenGlConfig) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let gl = gl::Gl::load_with(|name| loader(name));

        let required = [
            ("glMatrixMode", gl.MatrixMode.is_loaded()),
            ("glPushAttrib", gl.PushAttrib.is_loaded()),
            ("glLightfv", gl.Lightfv.is_loaded()),
            ("glBegin", gl.Begin.is_loaded()),
            ("glEnableClientState", gl.EnableClientState.is_loaded()),
            ("glGenBuffers", gl.GenBuffers.is_loaded()),
            ("glGenFramebuffers", gl.GenFramebuffers.is_loaded()),
            ("glGenRenderbuffers", gl.GenRenderbuffers.is_loaded()),
            ("glCheckFramebufferStatus", gl.CheckFramebufferStatus.is_loaded()),
            ("glReadPixels", gl.ReadPixels.is_loaded()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, loaded)| !loaded)
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            scenegl_bail!(SOURCE, ResourceCreationFailure,
                "OpenGL entry points not available: {}", missing.join(", "));
        }

        let device = Self { gl, config };
        unsafe {
            device.gl.PixelStorei(gl::PACK_ALIGNMENT, 1);
            device.gl.PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        }
        scenegl_info!(SOURCE, "OpenGL device ready ({})", device.version_string());
        Ok(device)
    }

    pub fn config(&self) -> &OpenGlConfig {
        &self.config
    }

    /// `GL_VERSION` of the current context
    pub fn version_string(&self) -> String {
        unsafe {
            let version = self.gl.GetString(gl::VERSION);
            if version.is_null() {
                return "unknown version".to_string();
            }
            CStr::from_ptr(version.cast()).to_string_lossy().into_owned()
        }
    }

    /// Log every pending GL error after `what`, when error checks are on
    fn check(&self, what: &str) {
        if self.config.check_errors {
            self.drain_errors(what);
        }
    }

    fn drain_errors(&self, what: &str) {
        loop {
            let code = unsafe { self.gl.GetError() };
            if code == gl::NO_ERROR {
                break;
            }
            scenegl_warn!(SOURCE, "{} raised {} (0x{:04X})", what, error_name(code), code);
        }
    }

    /// First GL error raised by the preceding call, if any
    fn take_error(&self) -> Option<GLenum> {
        let code = unsafe { self.gl.GetError() };
        (code != gl::NO_ERROR).then_some(code)
    }

    fn gen_name(&self, gen: unsafe fn(&gl::Gl, GLsizei, *mut GLuint)) -> GLuint {
        let mut name = 0;
        unsafe { gen(&self.gl, 1, &mut name) };
        name
    }

    fn delete_name(
        &self,
        what: &str,
        name: GLuint,
        delete: unsafe fn(&gl::Gl, GLsizei, *const GLuint),
    ) -> Result<()> {
        self.drain_errors("previous call");
        unsafe { delete(&self.gl, 1, &name) };
        match self.take_error() {
            None => Ok(()),
            Some(code) => Err(scenegl_err!(SOURCE, ReleaseFailed,
                "Deleting {} {} raised {} (0x{:04X})", what, name, error_name(code), code)),
        }
    }
}

impl GlDevice for OpenGlDevice {
    // ===== MATRIX STACK =====

    fn matrix_mode(&self, mode: MatrixMode) {
        unsafe { self.gl.MatrixMode(matrix_mode_to_gl(mode)) };
        self.check("glMatrixMode");
    }

    fn push_matrix(&self) {
        unsafe { self.gl.PushMatrix() };
        self.check("glPushMatrix");
    }

    fn pop_matrix(&self) {
        unsafe { self.gl.PopMatrix() };
        self.check("glPopMatrix");
    }

    fn load_identity(&self) {
        unsafe { self.gl.LoadIdentity() };
    }

    fn load_matrix(&self, matrix: &Mat4) {
        let cols = matrix.to_cols_array();
        unsafe { self.gl.LoadMatrixf(cols.as_ptr()) };
    }

    fn mult_matrix(&self, matrix: &Mat4) {
        let cols = matrix.to_cols_array();
        unsafe { self.gl.MultMatrixf(cols.as_ptr()) };
    }

    fn frustum(&self, left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) {
        unsafe { self.gl.Frustum(left, right, bottom, top, near, far) };
        self.check("glFrustum");
    }

    fn ortho(&self, left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) {
        unsafe { self.gl.Ortho(left, right, bottom, top, near, far) };
        self.check("glOrtho");
    }

    fn translate(&self, offset: Vec3) {
        unsafe { self.gl.Translatef(offset.x, offset.y, offset.z) };
    }

    fn scale(&self, factors: Vec3) {
        unsafe { self.gl.Scalef(factors.x, factors.y, factors.z) };
    }

    fn current_matrix(&self, mode: MatrixMode) -> Mat4 {
        let mut cols = [0.0f32; 16];
        unsafe { self.gl.GetFloatv(matrix_query_to_gl(mode), cols.as_mut_ptr()) };
        Mat4::from_cols_array(&cols)
    }

    // ===== ATTRIBUTE STACK =====

    fn push_attrib(&self, mask: AttribMask) {
        unsafe { self.gl.PushAttrib(attrib_mask_to_gl(mask)) };
        self.check("glPushAttrib");
    }

    fn pop_attrib(&self) {
        unsafe { self.gl.PopAttrib() };
        self.check("glPopAttrib");
    }

    fn push_client_attrib(&self) {
        unsafe { self.gl.PushClientAttrib(gl::CLIENT_VERTEX_ARRAY_BIT) };
        self.check("glPushClientAttrib");
    }

    fn pop_client_attrib(&self) {
        unsafe { self.gl.PopClientAttrib() };
        self.check("glPopClientAttrib");
    }

    // ===== CAPABILITIES & FIXED STATE =====

    fn enable(&self, capability: Capability) {
        unsafe { self.gl.Enable(capability_to_gl(capability)) };
        self.check("glEnable");
    }

    fn disable(&self, capability: Capability) {
        unsafe { self.gl.Disable(capability_to_gl(capability)) };
        self.check("glDisable");
    }

    fn is_enabled(&self, capability: Capability) -> bool {
        unsafe { self.gl.IsEnabled(capability_to_gl(capability)) != gl::FALSE }
    }

    fn depth_func(&self, func: CompareFunc) {
        unsafe { self.gl.DepthFunc(compare_func_to_gl(func)) };
    }

    fn depth_mask(&self, write: bool) {
        unsafe { self.gl.DepthMask(if write { gl::TRUE } else { gl::FALSE }) };
    }

    fn cull_face(&self, face: Face) {
        unsafe { self.gl.CullFace(face_to_gl(face)) };
    }

    fn blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        unsafe { self.gl.BlendFunc(blend_factor_to_gl(src), blend_factor_to_gl(dst)) };
    }

    fn light(&self, slot: u8, param: LightParam, value: [f32; 4]) {
        unsafe { self.gl.Lightfv(light_to_gl(slot), light_param_to_gl(param), value.as_ptr()) };
        self.check("glLightfv");
    }

    fn viewport(&self, rect: PixelRect) {
        unsafe { self.gl.Viewport(rect.x, rect.y, rect.width, rect.height) };
        self.check("glViewport");
    }

    fn scissor(&self, rect: PixelRect) {
        unsafe { self.gl.Scissor(rect.x, rect.y, rect.width, rect.height) };
        self.check("glScissor");
    }

    fn clear_colour(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.ClearColor(r, g, b, a) };
    }

    fn clear(&self, mask: ClearMask) {
        unsafe { self.gl.Clear(clear_mask_to_gl(mask)) };
        self.check("glClear");
    }

    fn line_width(&self, width: f32) {
        unsafe { self.gl.LineWidth(width) };
        self.check("glLineWidth");
    }

    // ===== TEXTURES =====

    fn gen_texture(&self) -> TextureHandle {
        TextureHandle(self.gen_name(gl::Gl::GenTextures))
    }

    fn bind_texture(&self, texture: Option<TextureHandle>) {
        unsafe { self.gl.BindTexture(gl::TEXTURE_2D, texture.map_or(0, |t| t.0)) };
        self.check("glBindTexture");
    }

    fn tex_image_2d(
        &self,
        internal_format: PixelFormat,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Option<&[u8]>,
    ) {
        let data = pixels.map_or(ptr::null(), |p| p.as_ptr().cast::<c_void>());
        unsafe {
            self.gl.TexImage2D(
                gl::TEXTURE_2D,
                0,
                internal_format_to_gl(internal_format) as GLint,
                width as GLsizei,
                height as GLsizei,
                0,
                pixel_format_to_gl(format),
                gl::UNSIGNED_BYTE,
                data,
            )
        };
        self.check("glTexImage2D");
    }

    fn tex_parameters(&self, filter: TextureFilter, wrap: TextureWrap) {
        let filter = texture_filter_to_gl(filter) as GLint;
        let wrap = texture_wrap_to_gl(wrap) as GLint;
        unsafe {
            self.gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter);
            self.gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter);
            self.gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap);
            self.gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap);
        }
        self.check("glTexParameteri");
    }

    fn delete_texture(&self, texture: TextureHandle) -> Result<()> {
        self.delete_name("texture", texture.0, gl::Gl::DeleteTextures)
    }

    // ===== RENDERBUFFERS =====

    fn gen_renderbuffer(&self) -> RenderbufferHandle {
        RenderbufferHandle(self.gen_name(gl::Gl::GenRenderbuffers))
    }

    fn bind_renderbuffer(&self, renderbuffer: Option<RenderbufferHandle>) {
        unsafe { self.gl.BindRenderbuffer(gl::RENDERBUFFER, renderbuffer.map_or(0, |r| r.0)) };
        self.check("glBindRenderbuffer");
    }

    fn renderbuffer_depth_storage(&self, width: u32, height: u32) {
        unsafe {
            self.gl.RenderbufferStorage(gl::RENDERBUFFER, gl::DEPTH_COMPONENT24, width as GLsizei, height as GLsizei)
        };
        self.check("glRenderbufferStorage");
    }

    fn delete_renderbuffer(&self, renderbuffer: RenderbufferHandle) -> Result<()> {
        self.delete_name("renderbuffer", renderbuffer.0, gl::Gl::DeleteRenderbuffers)
    }

    // ===== FRAME BUFFERS =====

    fn gen_framebuffer(&self) -> FramebufferHandle {
        FramebufferHandle(self.gen_name(gl::Gl::GenFramebuffers))
    }

    fn bind_framebuffer(&self, framebuffer: Option<FramebufferHandle>) {
        unsafe { self.gl.BindFramebuffer(gl::FRAMEBUFFER, framebuffer.map_or(0, |f| f.0)) };
        self.check("glBindFramebuffer");
    }

    fn framebuffer_colour_texture(&self, texture: TextureHandle) {
        unsafe {
            self.gl.FramebufferTexture2D(gl::FRAMEBUFFER, gl::COLOR_ATTACHMENT0, gl::TEXTURE_2D, texture.0, 0)
        };
        self.check("glFramebufferTexture2D");
    }

    fn framebuffer_depth_renderbuffer(&self, renderbuffer: RenderbufferHandle) {
        unsafe {
            self.gl.FramebufferRenderbuffer(gl::FRAMEBUFFER, gl::DEPTH_ATTACHMENT, gl::RENDERBUFFER, renderbuffer.0)
        };
        self.check("glFramebufferRenderbuffer");
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        framebuffer_status_from_gl(unsafe { self.gl.CheckFramebufferStatus(gl::FRAMEBUFFER) })
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferHandle) -> Result<()> {
        self.delete_name("frame buffer", framebuffer.0, gl::Gl::DeleteFramebuffers)
    }

    // ===== BUFFER OBJECTS =====

    fn gen_buffer(&self) -> BufferHandle {
        BufferHandle(self.gen_name(gl::Gl::GenBuffers))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>) {
        unsafe { self.gl.BindBuffer(buffer_target_to_gl(target), buffer.map_or(0, |b| b.0)) };
        self.check("glBindBuffer");
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl.BufferData(
                buffer_target_to_gl(target),
                data.len() as GLsizeiptr,
                data.as_ptr().cast::<c_void>(),
                gl::STATIC_DRAW,
            )
        };
        self.check("glBufferData");
    }

    fn delete_buffer(&self, buffer: BufferHandle) -> Result<()> {
        self.delete_name("buffer", buffer.0, gl::Gl::DeleteBuffers)
    }

    // ===== VERTEX ARRAYS =====

    fn enable_client_state(&self, array: ClientArray) {
        unsafe { self.gl.EnableClientState(client_array_to_gl(array)) };
    }

    fn disable_client_state(&self, array: ClientArray) {
        unsafe { self.gl.DisableClientState(client_array_to_gl(array)) };
    }

    fn array_pointer(&self, array: ClientArray, components: i32, stride: i32, offset: usize) {
        // Offset into the bound array buffer, passed where GL expects a pointer
        let offset = offset as *const c_void;
        unsafe {
            match array {
                ClientArray::Vertex => self.gl.VertexPointer(components, gl::FLOAT, stride, offset),
                ClientArray::Colour => self.gl.ColorPointer(components, gl::FLOAT, stride, offset),
                ClientArray::Normal => self.gl.NormalPointer(gl::FLOAT, stride, offset),
                ClientArray::TexCoord => self.gl.TexCoordPointer(components, gl::FLOAT, stride, offset),
            }
        }
        self.check("gl*Pointer");
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: i32, offset: usize) {
        unsafe {
            self.gl.DrawElements(primitive_mode_to_gl(mode), count, gl::UNSIGNED_INT, offset as *const c_void)
        };
        self.check("glDrawElements");
    }

    // ===== IMMEDIATE MODE =====
    // glGetError is invalid between glBegin and glEnd, so only `end` checks.

    fn begin(&self, mode: PrimitiveMode) {
        unsafe { self.gl.Begin(primitive_mode_to_gl(mode)) };
    }

    fn end(&self) {
        unsafe { self.gl.End() };
        self.check("glBegin/glEnd");
    }

    fn vertex2(&self, position: Vec2) {
        unsafe { self.gl.Vertex2f(position.x, position.y) };
    }

    fn vertex3(&self, position: Vec3) {
        unsafe { self.gl.Vertex3f(position.x, position.y, position.z) };
    }

    fn colour3(&self, colour: Vec3) {
        unsafe { self.gl.Color3f(colour.x, colour.y, colour.z) };
    }

    fn normal3(&self, normal: Vec3) {
        unsafe { self.gl.Normal3f(normal.x, normal.y, normal.z) };
    }

    fn tex_coord2(&self, uv: Vec2) {
        unsafe { self.gl.TexCoord2f(uv.x, uv.y) };
    }

    // ===== READ-BACK =====

    fn read_pixels(&self, rect: PixelRect, format: PixelFormat) -> Vec<u8> {
        let len = rect.width.max(0) as usize * rect.height.max(0) as usize * format.channels();
        let mut pixels = vec![0u8; len];
        if len > 0 {
            unsafe {
                self.gl.ReadPixels(
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    pixel_format_to_gl(format),
                    gl::UNSIGNED_BYTE,
                    pixels.as_mut_ptr().cast::<c_void>(),
                )
            };
            self.check("glReadPixels");
        }
        pixels
    }

    fn read_depth(&self, rect: PixelRect) -> Vec<f32> {
        let len = rect.width.max(0) as usize * rect.height.max(0) as usize;
        let mut depth = vec![0.0f32; len];
        if len > 0 {
            unsafe {
                self.gl.ReadPixels(
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    gl::DEPTH_COMPONENT,
                    gl::FLOAT,
                    depth.as_mut_ptr().cast::<c_void>(),
                )
            };
            self.check("glReadPixels(depth)");
        }
        depth
    }
}
