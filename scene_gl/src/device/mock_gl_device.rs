/// Mock GlDevice for tests (no GPU required)
///
/// Models the parts of the fixed-function state machine SceneGL touches:
/// both matrix stacks, the attribute stack, capability flags, light slots,
/// object tables and bindings. Draw traffic is recorded rather than
/// rasterized; read-back returns the last clear values of the bound target
/// unless a synthetic pixel/depth source has been installed.
///
/// Failure injection covers the two native failure modes SceneGL handles:
/// incomplete frame buffers and failing deletions.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use glam::{DMat4, Mat4, Vec2, Vec3};

use crate::device::{
    AttribMask, BlendFactor, BufferHandle, BufferTarget, Capability, ClearMask, ClientArray,
    CompareFunc, Face, FramebufferHandle, FramebufferStatus, GlDevice, LightParam, MatrixMode,
    PixelFormat, PixelRect, PrimitiveMode, RenderbufferHandle, TextureFilter, TextureHandle,
    TextureWrap, MAX_LIGHTS,
};
use crate::error::{Error, Result};
use crate::camera::frustum_matrix;

/// `GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT`
pub const STATUS_INCOMPLETE_ATTACHMENT: u32 = 0x8CD6;
/// `GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT`
pub const STATUS_MISSING_ATTACHMENT: u32 = 0x8CD7;

// ============================================================================
// Modelled state
// ============================================================================

/// Parameters of one light slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockLight {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub position: [f32; 4],
}

impl MockLight {
    /// Initial values mandated for a slot (slot 0 starts white)
    fn initial(slot: u8) -> Self {
        let bright = if slot == 0 { [1.0, 1.0, 1.0, 1.0] } else { [0.0, 0.0, 0.0, 1.0] };
        Self {
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: bright,
            specular: bright,
            position: [0.0, 0.0, 1.0, 0.0],
        }
    }
}

/// Texture object contents
#[derive(Debug, Clone, PartialEq)]
pub struct MockTexture {
    pub width: u32,
    pub height: u32,
    pub internal_format: Option<PixelFormat>,
    pub pixels: Option<Vec<u8>>,
    pub filter: Option<TextureFilter>,
    pub wrap: Option<TextureWrap>,
}

/// Frame buffer object attachments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockFramebuffer {
    pub colour: Option<TextureHandle>,
    pub depth: Option<RenderbufferHandle>,
}

/// One entry of the attribute stack
#[derive(Debug, Clone, PartialEq)]
struct AttribSnapshot {
    mask: AttribMask,
    enabled: BTreeSet<Capability>,
    depth_func: CompareFunc,
    depth_write: bool,
    blend_func: (BlendFactor, BlendFactor),
    clear_colour: [f32; 4],
    lights: [MockLight; MAX_LIGHTS as usize],
    scissor: PixelRect,
    viewport: PixelRect,
    matrix_mode: MatrixMode,
    line_width: f32,
}

/// Client vertex array state saved by `push_client_attrib`
#[derive(Debug, Clone, PartialEq)]
struct ClientArraySnapshot {
    client_arrays: BTreeSet<ClientArray>,
    array_pointers: BTreeMap<ClientArray, (i32, i32, usize)>,
}

/// Complete modelled device state
///
/// Compare two snapshots taken with `MockGlDevice::state()` to check that
/// an operation left the device exactly as it found it.
#[derive(Debug, Clone, PartialEq)]
pub struct MockState {
    pub matrix_mode: MatrixMode,
    pub projection_stack: Vec<Mat4>,
    pub modelview_stack: Vec<Mat4>,
    attrib_stack: Vec<AttribSnapshot>,
    client_attrib_stack: Vec<ClientArraySnapshot>,
    pub enabled: BTreeSet<Capability>,
    pub depth_func: CompareFunc,
    pub depth_write: bool,
    pub cull_face: Face,
    pub blend_func: (BlendFactor, BlendFactor),
    pub lights: [MockLight; MAX_LIGHTS as usize],
    pub viewport: PixelRect,
    pub scissor: PixelRect,
    pub clear_colour: [f32; 4],
    pub line_width: f32,
    pub bound_texture: Option<TextureHandle>,
    pub bound_renderbuffer: Option<RenderbufferHandle>,
    pub bound_framebuffer: Option<FramebufferHandle>,
    pub bound_array_buffer: Option<BufferHandle>,
    pub bound_element_buffer: Option<BufferHandle>,
    pub client_arrays: BTreeSet<ClientArray>,
    pub array_pointers: BTreeMap<ClientArray, (i32, i32, usize)>,
    pub textures: BTreeMap<TextureHandle, MockTexture>,
    pub renderbuffers: BTreeMap<RenderbufferHandle, (u32, u32)>,
    pub framebuffers: BTreeMap<FramebufferHandle, MockFramebuffer>,
    pub buffers: BTreeMap<BufferHandle, Vec<u8>>,
    /// Last clear colour (RGBA8) per target; `None` key is the default target
    pub target_colour: BTreeMap<Option<FramebufferHandle>, [u8; 4]>,
    /// Last clear depth per target
    pub target_depth: BTreeMap<Option<FramebufferHandle>, f32>,
    next_name: u32,
}

impl MockState {
    fn new(window_width: i32, window_height: i32) -> Self {
        let window = PixelRect::new(0, 0, window_width, window_height);
        Self {
            matrix_mode: MatrixMode::ModelView,
            projection_stack: vec![Mat4::IDENTITY],
            modelview_stack: vec![Mat4::IDENTITY],
            attrib_stack: Vec::new(),
            client_attrib_stack: Vec::new(),
            enabled: BTreeSet::new(),
            depth_func: CompareFunc::Less,
            depth_write: true,
            cull_face: Face::Back,
            blend_func: (BlendFactor::One, BlendFactor::Zero),
            lights: std::array::from_fn(|slot| MockLight::initial(slot as u8)),
            viewport: window,
            scissor: window,
            clear_colour: [0.0, 0.0, 0.0, 0.0],
            line_width: 1.0,
            bound_texture: None,
            bound_renderbuffer: None,
            bound_framebuffer: None,
            bound_array_buffer: None,
            bound_element_buffer: None,
            client_arrays: BTreeSet::new(),
            array_pointers: BTreeMap::new(),
            textures: BTreeMap::new(),
            renderbuffers: BTreeMap::new(),
            framebuffers: BTreeMap::new(),
            buffers: BTreeMap::new(),
            target_colour: BTreeMap::new(),
            target_depth: BTreeMap::new(),
            next_name: 1,
        }
    }

    fn stack_mut(&mut self, mode: MatrixMode) -> &mut Vec<Mat4> {
        match mode {
            MatrixMode::Projection => &mut self.projection_stack,
            MatrixMode::ModelView => &mut self.modelview_stack,
        }
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        let mode = self.matrix_mode;
        let stack = self.stack_mut(mode);
        if stack.is_empty() {
            stack.push(Mat4::IDENTITY);
        }
        let last = stack.len() - 1;
        &mut stack[last]
    }

    fn snapshot(&self, mask: AttribMask) -> AttribSnapshot {
        AttribSnapshot {
            mask,
            enabled: self.enabled.clone(),
            depth_func: self.depth_func,
            depth_write: self.depth_write,
            blend_func: self.blend_func,
            clear_colour: self.clear_colour,
            lights: self.lights,
            scissor: self.scissor,
            viewport: self.viewport,
            matrix_mode: self.matrix_mode,
            line_width: self.line_width,
        }
    }

    fn restore(&mut self, snapshot: AttribSnapshot) {
        let mask = snapshot.mask;

        for capability in Capability::all() {
            if covers(mask, capability) {
                if snapshot.enabled.contains(&capability) {
                    self.enabled.insert(capability);
                } else {
                    self.enabled.remove(&capability);
                }
            }
        }
        if mask.contains(AttribMask::DEPTH_BUFFER) {
            self.depth_func = snapshot.depth_func;
            self.depth_write = snapshot.depth_write;
        }
        if mask.contains(AttribMask::COLOR_BUFFER) {
            self.blend_func = snapshot.blend_func;
            self.clear_colour = snapshot.clear_colour;
        }
        if mask.contains(AttribMask::LIGHTING) {
            self.lights = snapshot.lights;
        }
        if mask.contains(AttribMask::SCISSOR) {
            self.scissor = snapshot.scissor;
        }
        if mask.contains(AttribMask::VIEWPORT) {
            self.viewport = snapshot.viewport;
        }
        if mask.contains(AttribMask::TRANSFORM) {
            self.matrix_mode = snapshot.matrix_mode;
        }
        if mask.contains(AttribMask::LINE) {
            self.line_width = snapshot.line_width;
        }
    }

    fn alloc_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }
}

fn top_of(stack: &[Mat4]) -> Mat4 {
    stack.last().copied().unwrap_or(Mat4::IDENTITY)
}

/// Whether an attribute group saves the enable flag of `capability`
fn covers(mask: AttribMask, capability: Capability) -> bool {
    if mask.contains(AttribMask::ENABLE) {
        return true;
    }
    match capability {
        Capability::DepthTest => mask.contains(AttribMask::DEPTH_BUFFER),
        Capability::Blend => mask.contains(AttribMask::COLOR_BUFFER),
        Capability::ScissorTest => mask.contains(AttribMask::SCISSOR),
        Capability::Lighting | Capability::Light(_) | Capability::ColorMaterial => {
            mask.contains(AttribMask::LIGHTING)
        }
        Capability::CullFace | Capability::Texture2D => false,
    }
}

// ============================================================================
// Recorded traffic
// ============================================================================

/// One `draw_elements` call with the state it ran under
#[derive(Debug, Clone, PartialEq)]
pub struct MockDraw {
    pub mode: PrimitiveMode,
    pub count: i32,
    pub client_arrays: BTreeSet<ClientArray>,
    pub array_pointers: BTreeMap<ClientArray, (i32, i32, usize)>,
    pub enabled: BTreeSet<Capability>,
    pub depth_func: CompareFunc,
    pub cull_face: Face,
    pub lights: [MockLight; MAX_LIGHTS as usize],
    pub projection: Mat4,
    pub modelview: Mat4,
    pub framebuffer: Option<FramebufferHandle>,
}

/// One begin/end block of immediate-mode vertices
#[derive(Debug, Clone, PartialEq)]
pub struct MockPrimitive {
    pub mode: PrimitiveMode,
    /// Vertex positions as submitted (object space)
    pub vertices: Vec<Vec3>,
    /// Current colour at each vertex
    pub colours: Vec<Vec3>,
    /// Current normal at each vertex
    pub normals: Vec<Vec3>,
    /// Model-view matrix in effect for the block
    pub modelview: Mat4,
    pub line_width: f32,
}

impl MockPrimitive {
    /// Vertex positions transformed by the block's model-view matrix
    pub fn world_vertices(&self) -> Vec<Vec3> {
        self.vertices
            .iter()
            .map(|v| self.modelview.transform_point3(*v))
            .collect()
    }
}

type PixelSource = Box<dyn Fn(i32, i32) -> [u8; 4]>;
type DepthSource = Box<dyn Fn(i32, i32) -> f32>;

// ============================================================================
// MockGlDevice
// ============================================================================

/// Software stand-in for a fixed-function OpenGL context
pub struct MockGlDevice {
    state: RefCell<MockState>,
    commands: RefCell<Vec<String>>,
    draws: RefCell<Vec<MockDraw>>,
    primitives: RefCell<Vec<MockPrimitive>>,
    immediate: RefCell<Option<MockPrimitive>>,
    current_colour: Cell<Vec3>,
    current_normal: Cell<Vec3>,
    pixel_source: RefCell<Option<PixelSource>>,
    depth_source: RefCell<Option<DepthSource>>,
    forced_framebuffer_status: Cell<Option<u32>>,
    fail_deletes: Cell<bool>,
}

impl MockGlDevice {
    /// Create a device whose default target is `width`×`height`
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            state: RefCell::new(MockState::new(width, height)),
            commands: RefCell::new(Vec::new()),
            draws: RefCell::new(Vec::new()),
            primitives: RefCell::new(Vec::new()),
            immediate: RefCell::new(None),
            current_colour: Cell::new(Vec3::ONE),
            current_normal: Cell::new(Vec3::Z),
            pixel_source: RefCell::new(None),
            depth_source: RefCell::new(None),
            forced_framebuffer_status: Cell::new(None),
            fail_deletes: Cell::new(false),
        }
    }

    // ===== INSPECTION =====

    /// Snapshot of the modelled state
    pub fn state(&self) -> MockState {
        self.state.borrow().clone()
    }

    /// Recorded call names, in order
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Number of recorded calls whose text starts with `prefix`
    pub fn count_commands(&self, prefix: &str) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Recorded indexed draws
    pub fn draws(&self) -> Vec<MockDraw> {
        self.draws.borrow().clone()
    }

    /// Recorded immediate-mode blocks
    pub fn primitives(&self) -> Vec<MockPrimitive> {
        self.primitives.borrow().clone()
    }

    /// Forget recorded traffic (state is kept)
    pub fn clear_records(&self) {
        self.commands.borrow_mut().clear();
        self.draws.borrow_mut().clear();
        self.primitives.borrow_mut().clear();
    }

    /// Depth of the attribute stack
    pub fn attrib_stack_depth(&self) -> usize {
        self.state.borrow().attrib_stack.len()
    }

    /// Depth of the client attribute stack
    pub fn client_attrib_stack_depth(&self) -> usize {
        self.state.borrow().client_attrib_stack.len()
    }

    // ===== SYNTHETIC CONTENT & FAILURE INJECTION =====

    /// Serve read-back colour from `source(x, y)` (y = 0 is the bottom row)
    pub fn set_pixel_source<F: Fn(i32, i32) -> [u8; 4] + 'static>(&self, source: F) {
        *self.pixel_source.borrow_mut() = Some(Box::new(source));
    }

    /// Serve read-back depth from `source(x, y)`
    pub fn set_depth_source<F: Fn(i32, i32) -> f32 + 'static>(&self, source: F) {
        *self.depth_source.borrow_mut() = Some(Box::new(source));
    }

    /// Make `check_framebuffer_status` report the given native code
    pub fn force_framebuffer_status(&self, code: Option<u32>) {
        self.forced_framebuffer_status.set(code);
    }

    /// Make every `delete_*` call fail
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.set(fail);
    }

    // ===== INTERNAL =====

    fn record(&self, command: String) {
        self.commands.borrow_mut().push(command);
    }

    fn check_delete(&self, what: &str) -> Result<()> {
        if self.fail_deletes.get() {
            Err(Error::ReleaseFailed(format!("{} rejected by mock device", what)))
        } else {
            Ok(())
        }
    }

    fn multiply(&self, matrix: Mat4) {
        let mut state = self.state.borrow_mut();
        let top = state.top_mut();
        *top = *top * matrix;
    }

    fn emit_vertex(&self, position: Vec3) {
        let colour = self.current_colour.get();
        let normal = self.current_normal.get();
        if let Some(block) = self.immediate.borrow_mut().as_mut() {
            block.vertices.push(position);
            block.colours.push(colour);
            block.normals.push(normal);
        }
    }
}

impl GlDevice for MockGlDevice {
    fn matrix_mode(&self, mode: MatrixMode) {
        self.record(format!("matrix_mode({:?})", mode));
        self.state.borrow_mut().matrix_mode = mode;
    }

    fn push_matrix(&self) {
        self.record("push_matrix".to_string());
        let mut state = self.state.borrow_mut();
        let mode = state.matrix_mode;
        let stack = state.stack_mut(mode);
        let top = top_of(stack);
        stack.push(top);
    }

    fn pop_matrix(&self) {
        self.record("pop_matrix".to_string());
        let mut state = self.state.borrow_mut();
        let mode = state.matrix_mode;
        let stack = state.stack_mut(mode);
        // Underflow is a GL error that leaves the stack untouched
        if stack.len() > 1 {
            stack.pop();
        }
    }

    fn load_identity(&self) {
        self.record("load_identity".to_string());
        *self.state.borrow_mut().top_mut() = Mat4::IDENTITY;
    }

    fn load_matrix(&self, matrix: &Mat4) {
        self.record("load_matrix".to_string());
        *self.state.borrow_mut().top_mut() = *matrix;
    }

    fn mult_matrix(&self, matrix: &Mat4) {
        self.record("mult_matrix".to_string());
        self.multiply(*matrix);
    }

    fn frustum(&self, left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) {
        self.record(format!("frustum({}, {}, {}, {}, {}, {})", left, right, bottom, top, near, far));
        self.multiply(frustum_matrix(left, right, bottom, top, near, far).as_mat4());
    }

    fn ortho(&self, left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) {
        self.record(format!("ortho({}, {}, {}, {}, {}, {})", left, right, bottom, top, near, far));
        self.multiply(DMat4::orthographic_rh_gl(left, right, bottom, top, near, far).as_mat4());
    }

    fn translate(&self, offset: Vec3) {
        self.record(format!("translate({:?})", offset));
        self.multiply(Mat4::from_translation(offset));
    }

    fn scale(&self, factors: Vec3) {
        self.record(format!("scale({:?})", factors));
        self.multiply(Mat4::from_scale(factors));
    }

    fn current_matrix(&self, mode: MatrixMode) -> Mat4 {
        let state = self.state.borrow();
        let stack = match mode {
            MatrixMode::Projection => &state.projection_stack,
            MatrixMode::ModelView => &state.modelview_stack,
        };
        top_of(stack)
    }

    fn push_attrib(&self, mask: AttribMask) {
        self.record(format!("push_attrib({:?})", mask));
        let mut state = self.state.borrow_mut();
        let snapshot = state.snapshot(mask);
        state.attrib_stack.push(snapshot);
    }

    fn pop_attrib(&self) {
        self.record("pop_attrib".to_string());
        let mut state = self.state.borrow_mut();
        if let Some(snapshot) = state.attrib_stack.pop() {
            state.restore(snapshot);
        }
    }

    fn push_client_attrib(&self) {
        self.record("push_client_attrib".to_string());
        let mut state = self.state.borrow_mut();
        let snapshot = ClientArraySnapshot {
            client_arrays: state.client_arrays.clone(),
            array_pointers: state.array_pointers.clone(),
        };
        state.client_attrib_stack.push(snapshot);
    }

    fn pop_client_attrib(&self) {
        self.record("pop_client_attrib".to_string());
        let mut state = self.state.borrow_mut();
        if let Some(snapshot) = state.client_attrib_stack.pop() {
            state.client_arrays = snapshot.client_arrays;
            state.array_pointers = snapshot.array_pointers;
        }
    }

    fn enable(&self, capability: Capability) {
        self.record(format!("enable({:?})", capability));
        self.state.borrow_mut().enabled.insert(capability);
    }

    fn disable(&self, capability: Capability) {
        self.record(format!("disable({:?})", capability));
        self.state.borrow_mut().enabled.remove(&capability);
    }

    fn is_enabled(&self, capability: Capability) -> bool {
        self.state.borrow().enabled.contains(&capability)
    }

    fn depth_func(&self, func: CompareFunc) {
        self.record(format!("depth_func({:?})", func));
        self.state.borrow_mut().depth_func = func;
    }

    fn depth_mask(&self, write: bool) {
        self.record(format!("depth_mask({})", write));
        self.state.borrow_mut().depth_write = write;
    }

    fn cull_face(&self, face: Face) {
        self.record(format!("cull_face({:?})", face));
        self.state.borrow_mut().cull_face = face;
    }

    fn blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        self.record(format!("blend_func({:?}, {:?})", src, dst));
        self.state.borrow_mut().blend_func = (src, dst);
    }

    fn light(&self, slot: u8, param: LightParam, value: [f32; 4]) {
        self.record(format!("light({}, {:?}, {:?})", slot, param, value));
        let mut state = self.state.borrow_mut();
        if let Some(light) = state.lights.get_mut(slot as usize) {
            match param {
                LightParam::Ambient => light.ambient = value,
                LightParam::Diffuse => light.diffuse = value,
                LightParam::Specular => light.specular = value,
                LightParam::Position => light.position = value,
            }
        }
    }

    fn viewport(&self, rect: PixelRect) {
        self.record(format!("viewport({:?})", rect));
        self.state.borrow_mut().viewport = rect;
    }

    fn scissor(&self, rect: PixelRect) {
        self.record(format!("scissor({:?})", rect));
        self.state.borrow_mut().scissor = rect;
    }

    fn clear_colour(&self, rgba: [f32; 4]) {
        self.record(format!("clear_colour({:?})", rgba));
        self.state.borrow_mut().clear_colour = rgba;
    }

    fn clear(&self, mask: ClearMask) {
        self.record(format!("clear({:?})", mask));
        let mut state = self.state.borrow_mut();
        let target = state.bound_framebuffer;
        if mask.contains(ClearMask::COLOR) {
            let rgba = state.clear_colour.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
            state.target_colour.insert(target, rgba);
        }
        if mask.contains(ClearMask::DEPTH) {
            state.target_depth.insert(target, 1.0);
        }
    }

    fn line_width(&self, width: f32) {
        self.record(format!("line_width({})", width));
        self.state.borrow_mut().line_width = width;
    }

    fn gen_texture(&self) -> TextureHandle {
        let mut state = self.state.borrow_mut();
        let handle = TextureHandle(state.alloc_name());
        state.textures.insert(handle, MockTexture {
            width: 0,
            height: 0,
            internal_format: None,
            pixels: None,
            filter: None,
            wrap: None,
        });
        drop(state);
        self.record(format!("gen_texture -> {:?}", handle));
        handle
    }

    fn bind_texture(&self, texture: Option<TextureHandle>) {
        self.record(format!("bind_texture({:?})", texture));
        self.state.borrow_mut().bound_texture = texture;
    }

    fn tex_image_2d(
        &self,
        internal_format: PixelFormat,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Option<&[u8]>,
    ) {
        self.record(format!("tex_image_2d({:?}, {}, {}, {:?})", internal_format, width, height, format));
        let mut state = self.state.borrow_mut();
        if let Some(bound) = state.bound_texture {
            if let Some(texture) = state.textures.get_mut(&bound) {
                texture.width = width;
                texture.height = height;
                texture.internal_format = Some(internal_format);
                texture.pixels = pixels.map(|p| p.to_vec());
            }
        }
    }

    fn tex_parameters(&self, filter: TextureFilter, wrap: TextureWrap) {
        self.record(format!("tex_parameters({:?}, {:?})", filter, wrap));
        let mut state = self.state.borrow_mut();
        if let Some(bound) = state.bound_texture {
            if let Some(texture) = state.textures.get_mut(&bound) {
                texture.filter = Some(filter);
                texture.wrap = Some(wrap);
            }
        }
    }

    fn delete_texture(&self, texture: TextureHandle) -> Result<()> {
        self.record(format!("delete_texture({:?})", texture));
        self.check_delete("delete_texture")?;
        let mut state = self.state.borrow_mut();
        state.textures.remove(&texture);
        if state.bound_texture == Some(texture) {
            state.bound_texture = None;
        }
        Ok(())
    }

    fn gen_renderbuffer(&self) -> RenderbufferHandle {
        let mut state = self.state.borrow_mut();
        let handle = RenderbufferHandle(state.alloc_name());
        state.renderbuffers.insert(handle, (0, 0));
        drop(state);
        self.record(format!("gen_renderbuffer -> {:?}", handle));
        handle
    }

    fn bind_renderbuffer(&self, renderbuffer: Option<RenderbufferHandle>) {
        self.record(format!("bind_renderbuffer({:?})", renderbuffer));
        self.state.borrow_mut().bound_renderbuffer = renderbuffer;
    }

    fn renderbuffer_depth_storage(&self, width: u32, height: u32) {
        self.record(format!("renderbuffer_depth_storage({}, {})", width, height));
        let mut state = self.state.borrow_mut();
        if let Some(bound) = state.bound_renderbuffer {
            state.renderbuffers.insert(bound, (width, height));
        }
    }

    fn delete_renderbuffer(&self, renderbuffer: RenderbufferHandle) -> Result<()> {
        self.record(format!("delete_renderbuffer({:?})", renderbuffer));
        self.check_delete("delete_renderbuffer")?;
        let mut state = self.state.borrow_mut();
        state.renderbuffers.remove(&renderbuffer);
        if state.bound_renderbuffer == Some(renderbuffer) {
            state.bound_renderbuffer = None;
        }
        Ok(())
    }

    fn gen_framebuffer(&self) -> FramebufferHandle {
        let mut state = self.state.borrow_mut();
        let handle = FramebufferHandle(state.alloc_name());
        state.framebuffers.insert(handle, MockFramebuffer::default());
        drop(state);
        self.record(format!("gen_framebuffer -> {:?}", handle));
        handle
    }

    fn bind_framebuffer(&self, framebuffer: Option<FramebufferHandle>) {
        self.record(format!("bind_framebuffer({:?})", framebuffer));
        self.state.borrow_mut().bound_framebuffer = framebuffer;
    }

    fn framebuffer_colour_texture(&self, texture: TextureHandle) {
        self.record(format!("framebuffer_colour_texture({:?})", texture));
        let mut state = self.state.borrow_mut();
        if let Some(bound) = state.bound_framebuffer {
            if let Some(fb) = state.framebuffers.get_mut(&bound) {
                fb.colour = Some(texture);
            }
        }
    }

    fn framebuffer_depth_renderbuffer(&self, renderbuffer: RenderbufferHandle) {
        self.record(format!("framebuffer_depth_renderbuffer({:?})", renderbuffer));
        let mut state = self.state.borrow_mut();
        if let Some(bound) = state.bound_framebuffer {
            if let Some(fb) = state.framebuffers.get_mut(&bound) {
                fb.depth = Some(renderbuffer);
            }
        }
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        self.record("check_framebuffer_status".to_string());
        if let Some(code) = self.forced_framebuffer_status.get() {
            return FramebufferStatus::Incomplete(code);
        }

        let state = self.state.borrow();
        let Some(fb) = state.bound_framebuffer.and_then(|h| state.framebuffers.get(&h)) else {
            // The default target is always complete
            return FramebufferStatus::Complete;
        };
        let (Some(colour), Some(depth)) = (fb.colour, fb.depth) else {
            return FramebufferStatus::Incomplete(STATUS_MISSING_ATTACHMENT);
        };
        match (state.textures.get(&colour), state.renderbuffers.get(&depth)) {
            (Some(tex), Some(&(w, h)))
                if tex.width > 0 && tex.height > 0 && (tex.width, tex.height) == (w, h) =>
            {
                FramebufferStatus::Complete
            }
            _ => FramebufferStatus::Incomplete(STATUS_INCOMPLETE_ATTACHMENT),
        }
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferHandle) -> Result<()> {
        self.record(format!("delete_framebuffer({:?})", framebuffer));
        self.check_delete("delete_framebuffer")?;
        let mut state = self.state.borrow_mut();
        state.framebuffers.remove(&framebuffer);
        state.target_colour.remove(&Some(framebuffer));
        state.target_depth.remove(&Some(framebuffer));
        if state.bound_framebuffer == Some(framebuffer) {
            state.bound_framebuffer = None;
        }
        Ok(())
    }

    fn gen_buffer(&self) -> BufferHandle {
        let mut state = self.state.borrow_mut();
        let handle = BufferHandle(state.alloc_name());
        state.buffers.insert(handle, Vec::new());
        drop(state);
        self.record(format!("gen_buffer -> {:?}", handle));
        handle
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>) {
        self.record(format!("bind_buffer({:?}, {:?})", target, buffer));
        let mut state = self.state.borrow_mut();
        match target {
            BufferTarget::Array => state.bound_array_buffer = buffer,
            BufferTarget::ElementArray => state.bound_element_buffer = buffer,
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(format!("buffer_data({:?}, {} bytes)", target, data.len()));
        let mut state = self.state.borrow_mut();
        let bound = match target {
            BufferTarget::Array => state.bound_array_buffer,
            BufferTarget::ElementArray => state.bound_element_buffer,
        };
        if let Some(handle) = bound {
            state.buffers.insert(handle, data.to_vec());
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) -> Result<()> {
        self.record(format!("delete_buffer({:?})", buffer));
        self.check_delete("delete_buffer")?;
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        if state.bound_array_buffer == Some(buffer) {
            state.bound_array_buffer = None;
        }
        if state.bound_element_buffer == Some(buffer) {
            state.bound_element_buffer = None;
        }
        Ok(())
    }

    fn enable_client_state(&self, array: ClientArray) {
        self.record(format!("enable_client_state({:?})", array));
        self.state.borrow_mut().client_arrays.insert(array);
    }

    fn disable_client_state(&self, array: ClientArray) {
        self.record(format!("disable_client_state({:?})", array));
        self.state.borrow_mut().client_arrays.remove(&array);
    }

    fn array_pointer(&self, array: ClientArray, components: i32, stride: i32, offset: usize) {
        self.record(format!("array_pointer({:?}, {}, {}, {})", array, components, stride, offset));
        self.state
            .borrow_mut()
            .array_pointers
            .insert(array, (components, stride, offset));
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: i32, offset: usize) {
        self.record(format!("draw_elements({:?}, {}, {})", mode, count, offset));
        let state = self.state.borrow();
        let draw = MockDraw {
            mode,
            count,
            client_arrays: state.client_arrays.clone(),
            array_pointers: state.array_pointers.clone(),
            enabled: state.enabled.clone(),
            depth_func: state.depth_func,
            cull_face: state.cull_face,
            lights: state.lights,
            projection: top_of(&state.projection_stack),
            modelview: top_of(&state.modelview_stack),
            framebuffer: state.bound_framebuffer,
        };
        drop(state);
        self.draws.borrow_mut().push(draw);
    }

    fn begin(&self, mode: PrimitiveMode) {
        self.record(format!("begin({:?})", mode));
        let state = self.state.borrow();
        let modelview = top_of(&state.modelview_stack);
        let line_width = state.line_width;
        drop(state);
        *self.immediate.borrow_mut() = Some(MockPrimitive {
            mode,
            vertices: Vec::new(),
            colours: Vec::new(),
            normals: Vec::new(),
            modelview,
            line_width,
        });
    }

    fn end(&self) {
        self.record("end".to_string());
        if let Some(block) = self.immediate.borrow_mut().take() {
            self.primitives.borrow_mut().push(block);
        }
    }

    fn vertex2(&self, position: Vec2) {
        self.emit_vertex(position.extend(0.0));
    }

    fn vertex3(&self, position: Vec3) {
        self.emit_vertex(position);
    }

    fn colour3(&self, colour: Vec3) {
        self.current_colour.set(colour);
    }

    fn normal3(&self, normal: Vec3) {
        self.current_normal.set(normal);
    }

    fn tex_coord2(&self, _uv: Vec2) {}

    fn read_pixels(&self, rect: PixelRect, format: PixelFormat) -> Vec<u8> {
        self.record(format!("read_pixels({:?}, {:?})", rect, format));
        let state = self.state.borrow();
        let fill = state
            .target_colour
            .get(&state.bound_framebuffer)
            .copied()
            .unwrap_or([0, 0, 0, 0]);
        let source = self.pixel_source.borrow();

        let mut out = Vec::with_capacity((rect.width * rect.height).max(0) as usize * format.channels());
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                let [r, g, b, a] = match source.as_ref() {
                    Some(f) => f(x, y),
                    None => fill,
                };
                match format {
                    PixelFormat::Rgb => out.extend_from_slice(&[r, g, b]),
                    PixelFormat::Rgba => out.extend_from_slice(&[r, g, b, a]),
                    PixelFormat::Bgr => out.extend_from_slice(&[b, g, r]),
                    PixelFormat::Bgra => out.extend_from_slice(&[b, g, r, a]),
                }
            }
        }
        out
    }

    fn read_depth(&self, rect: PixelRect) -> Vec<f32> {
        self.record(format!("read_depth({:?})", rect));
        let state = self.state.borrow();
        let fill = state
            .target_depth
            .get(&state.bound_framebuffer)
            .copied()
            .unwrap_or(1.0);
        let source = self.depth_source.borrow();

        let mut out = Vec::with_capacity((rect.width * rect.height).max(0) as usize);
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                out.push(match source.as_ref() {
                    Some(f) => f(x, y),
                    None => fill,
                });
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "mock_gl_device_tests.rs"]
mod tests;
