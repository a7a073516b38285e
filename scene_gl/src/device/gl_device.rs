/// GlDevice trait - typed surface of the fixed-function OpenGL state machine
///
/// Every SceneGL component talks to OpenGL through this trait. A device
/// stands for one rendering context made current on the calling thread, so
/// the trait is deliberately neither `Send` nor `Sync`: sharing a device
/// across threads is unsupported.
///
/// Mutation of global state goes through the scoped guards in
/// `crate::context`, which undo every change when they are dropped.

use bitflags::bitflags;
use glam::{Mat4, Vec2, Vec3};
use crate::error::Result;

// ============================================================================
// Object handles
// ============================================================================

/// Texture object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// Buffer object name (vertex or index data)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

/// Renderbuffer object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderbufferHandle(pub u32);

/// Frame buffer object name (`None` in bind calls means the default target)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FramebufferHandle(pub u32);

// ============================================================================
// State enums
// ============================================================================

/// Matrix stack selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatrixMode {
    Projection,
    ModelView,
}

/// Number of hardware light slots guaranteed by the fixed-function pipeline
pub const MAX_LIGHTS: u8 = 8;

/// Server-side capabilities toggled with enable/disable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Lighting,
    /// One of the `MAX_LIGHTS` light slots
    Light(u8),
    ColorMaterial,
    CullFace,
    DepthTest,
    Texture2D,
    Blend,
    ScissorTest,
}

impl Capability {
    /// Every capability the pipeline knows about
    pub fn all() -> Vec<Capability> {
        let mut caps = vec![
            Capability::Lighting,
            Capability::ColorMaterial,
            Capability::CullFace,
            Capability::DepthTest,
            Capability::Texture2D,
            Capability::Blend,
            Capability::ScissorTest,
        ];
        caps.extend((0..MAX_LIGHTS).map(Capability::Light));
        caps
    }
}

bitflags! {
    /// Attribute groups saved by `push_attrib`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttribMask: u32 {
        /// Blend enable + function, clear colour
        const COLOR_BUFFER = 1 << 0;
        /// Depth test enable, depth function, depth write mask
        const DEPTH_BUFFER = 1 << 1;
        /// Every capability enable flag
        const ENABLE = 1 << 2;
        /// Lighting enable, light slot enables + parameters, colour material
        const LIGHTING = 1 << 3;
        /// Scissor test enable + box
        const SCISSOR = 1 << 4;
        /// Current matrix mode
        const TRANSFORM = 1 << 5;
        /// Viewport rectangle
        const VIEWPORT = 1 << 6;
        /// Line width
        const LINE = 1 << 7;
    }
}

bitflags! {
    /// Buffers cleared by `clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Polygon face selector for culling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    FrontAndBack,
}

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Light parameter set with `light`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightParam {
    Ambient,
    Diffuse,
    Specular,
    /// Homogeneous position; w = 0 makes the light directional
    Position,
}

/// 8-bit pixel layouts used for uploads and read-back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgb,
    Rgba,
    Bgr,
    Bgra,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
        }
    }
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

/// Buffer binding point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// Client-side vertex attribute stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClientArray {
    Vertex,
    Colour,
    Normal,
    TexCoord,
}

/// Primitive assembly mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Quads,
    QuadStrip,
}

/// Result of the frame buffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferStatus {
    Complete,
    /// Native status code of the failure
    Incomplete(u32),
}

/// Integer rectangle in window coordinates (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

// ============================================================================
// GlDevice trait
// ============================================================================

/// Fixed-function OpenGL device
///
/// Implemented by backend devices (e.g. `OpenGlDevice`) and by
/// `MockGlDevice` for tests. Methods take `&self`: the state lives in the
/// native context, not in the Rust object.
pub trait GlDevice {
    // ===== MATRIX STACK =====

    /// Select the matrix stack subsequent matrix calls apply to
    fn matrix_mode(&self, mode: MatrixMode);

    /// Duplicate the top of the current matrix stack
    fn push_matrix(&self);

    /// Discard the top of the current matrix stack
    fn pop_matrix(&self);

    /// Replace the current matrix with the identity
    fn load_identity(&self);

    /// Replace the current matrix
    fn load_matrix(&self, matrix: &Mat4);

    /// Post-multiply the current matrix
    fn mult_matrix(&self, matrix: &Mat4);

    /// Post-multiply the current matrix by a perspective frustum
    fn frustum(&self, left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64);

    /// Post-multiply the current matrix by an orthographic projection
    fn ortho(&self, left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64);

    /// Post-multiply the current matrix by a translation
    fn translate(&self, offset: Vec3);

    /// Post-multiply the current matrix by a scale
    fn scale(&self, factors: Vec3);

    /// Read the top of the given matrix stack
    fn current_matrix(&self, mode: MatrixMode) -> Mat4;

    // ===== ATTRIBUTE STACK =====

    /// Save the given attribute groups
    fn push_attrib(&self, mask: AttribMask);

    /// Restore the groups saved by the matching `push_attrib`
    fn pop_attrib(&self);

    /// Save the client vertex array state (enables and pointers)
    fn push_client_attrib(&self);

    /// Restore the state saved by the matching `push_client_attrib`
    fn pop_client_attrib(&self);

    // ===== CAPABILITIES & FIXED STATE =====

    fn enable(&self, capability: Capability);

    fn disable(&self, capability: Capability);

    fn is_enabled(&self, capability: Capability) -> bool;

    fn depth_func(&self, func: CompareFunc);

    fn depth_mask(&self, write: bool);

    fn cull_face(&self, face: Face);

    fn blend_func(&self, src: BlendFactor, dst: BlendFactor);

    /// Set a parameter of light slot `slot` (0..MAX_LIGHTS)
    fn light(&self, slot: u8, param: LightParam, value: [f32; 4]);

    fn viewport(&self, rect: PixelRect);

    fn scissor(&self, rect: PixelRect);

    fn clear_colour(&self, rgba: [f32; 4]);

    fn clear(&self, mask: ClearMask);

    fn line_width(&self, width: f32);

    // ===== TEXTURES =====

    fn gen_texture(&self) -> TextureHandle;

    /// Bind a 2-D texture (`None` unbinds)
    fn bind_texture(&self, texture: Option<TextureHandle>);

    /// Specify the bound texture's image; `None` allocates storage only
    fn tex_image_2d(
        &self,
        internal_format: PixelFormat,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Option<&[u8]>,
    );

    /// Set min/mag filter and s/t wrapping of the bound texture
    fn tex_parameters(&self, filter: TextureFilter, wrap: TextureWrap);

    fn delete_texture(&self, texture: TextureHandle) -> Result<()>;

    // ===== RENDERBUFFERS =====

    fn gen_renderbuffer(&self) -> RenderbufferHandle;

    fn bind_renderbuffer(&self, renderbuffer: Option<RenderbufferHandle>);

    /// Allocate 24-bit depth storage for the bound renderbuffer
    fn renderbuffer_depth_storage(&self, width: u32, height: u32);

    fn delete_renderbuffer(&self, renderbuffer: RenderbufferHandle) -> Result<()>;

    // ===== FRAME BUFFERS =====

    fn gen_framebuffer(&self) -> FramebufferHandle;

    /// Bind a render target (`None` binds the default, visible target)
    fn bind_framebuffer(&self, framebuffer: Option<FramebufferHandle>);

    /// Attach a texture as colour attachment 0 of the bound frame buffer
    fn framebuffer_colour_texture(&self, texture: TextureHandle);

    /// Attach a renderbuffer as the depth attachment of the bound frame buffer
    fn framebuffer_depth_renderbuffer(&self, renderbuffer: RenderbufferHandle);

    fn check_framebuffer_status(&self) -> FramebufferStatus;

    fn delete_framebuffer(&self, framebuffer: FramebufferHandle) -> Result<()>;

    // ===== BUFFER OBJECTS =====

    fn gen_buffer(&self) -> BufferHandle;

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>);

    /// Upload static data to the buffer bound at `target`
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);

    fn delete_buffer(&self, buffer: BufferHandle) -> Result<()>;

    // ===== VERTEX ARRAYS =====

    fn enable_client_state(&self, array: ClientArray);

    fn disable_client_state(&self, array: ClientArray);

    /// Point a client array at `f32` data in the bound array buffer
    ///
    /// `components` is ignored for `ClientArray::Normal` (always 3).
    fn array_pointer(&self, array: ClientArray, components: i32, stride: i32, offset: usize);

    /// Draw `count` `u32` indices from the bound element buffer
    fn draw_elements(&self, mode: PrimitiveMode, count: i32, offset: usize);

    // ===== IMMEDIATE MODE =====

    fn begin(&self, mode: PrimitiveMode);

    fn end(&self);

    fn vertex2(&self, position: Vec2);

    fn vertex3(&self, position: Vec3);

    fn colour3(&self, colour: Vec3);

    fn normal3(&self, normal: Vec3);

    fn tex_coord2(&self, uv: Vec2);

    // ===== READ-BACK =====

    /// Read colour pixels of the bound target, rows bottom to top, tightly packed
    fn read_pixels(&self, rect: PixelRect, format: PixelFormat) -> Vec<u8>;

    /// Read depth buffer values in [0, 1], rows bottom to top
    fn read_depth(&self, rect: PixelRect) -> Vec<f32>;
}
