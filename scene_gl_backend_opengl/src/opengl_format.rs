/// Conversions between SceneGL device enums and OpenGL enums.
///
/// Pure functions, usable without a context.

use scene_gl::scenegl::device::{
    AttribMask, BlendFactor, BufferTarget, Capability, ClearMask, ClientArray, CompareFunc, Face,
    FramebufferStatus, LightParam, MatrixMode, PixelFormat, PrimitiveMode, TextureFilter,
    TextureWrap,
};
use crate::gl;
use crate::gl::types::{GLbitfield, GLenum};

pub(crate) fn matrix_mode_to_gl(mode: MatrixMode) -> GLenum {
    match mode {
        MatrixMode::Projection => gl::PROJECTION,
        MatrixMode::ModelView => gl::MODELVIEW,
    }
}

/// `glGet` name of the matrix on top of a stack
pub(crate) fn matrix_query_to_gl(mode: MatrixMode) -> GLenum {
    match mode {
        MatrixMode::Projection => gl::PROJECTION_MATRIX,
        MatrixMode::ModelView => gl::MODELVIEW_MATRIX,
    }
}

pub(crate) fn capability_to_gl(capability: Capability) -> GLenum {
    match capability {
        Capability::Lighting => gl::LIGHTING,
        Capability::Light(slot) => light_to_gl(slot),
        Capability::ColorMaterial => gl::COLOR_MATERIAL,
        Capability::CullFace => gl::CULL_FACE,
        Capability::DepthTest => gl::DEPTH_TEST,
        Capability::Texture2D => gl::TEXTURE_2D,
        Capability::Blend => gl::BLEND,
        Capability::ScissorTest => gl::SCISSOR_TEST,
    }
}

/// `GL_LIGHTi` for a light slot
pub(crate) fn light_to_gl(slot: u8) -> GLenum {
    gl::LIGHT0 + slot as GLenum
}

pub(crate) fn attrib_mask_to_gl(mask: AttribMask) -> GLbitfield {
    let mut bits = 0;
    for (flag, bit) in [
        (AttribMask::COLOR_BUFFER, gl::COLOR_BUFFER_BIT),
        (AttribMask::DEPTH_BUFFER, gl::DEPTH_BUFFER_BIT),
        (AttribMask::ENABLE, gl::ENABLE_BIT),
        (AttribMask::LIGHTING, gl::LIGHTING_BIT),
        (AttribMask::SCISSOR, gl::SCISSOR_BIT),
        (AttribMask::TRANSFORM, gl::TRANSFORM_BIT),
        (AttribMask::VIEWPORT, gl::VIEWPORT_BIT),
        (AttribMask::LINE, gl::LINE_BIT),
    ] {
        if mask.contains(flag) {
            bits |= bit;
        }
    }
    bits
}

pub(crate) fn clear_mask_to_gl(mask: ClearMask) -> GLbitfield {
    let mut bits = 0;
    if mask.contains(ClearMask::COLOR) {
        bits |= gl::COLOR_BUFFER_BIT;
    }
    if mask.contains(ClearMask::DEPTH) {
        bits |= gl::DEPTH_BUFFER_BIT;
    }
    bits
}

pub(crate) fn compare_func_to_gl(func: CompareFunc) -> GLenum {
    match func {
        CompareFunc::Never => gl::NEVER,
        CompareFunc::Less => gl::LESS,
        CompareFunc::Equal => gl::EQUAL,
        CompareFunc::LessEqual => gl::LEQUAL,
        CompareFunc::Greater => gl::GREATER,
        CompareFunc::NotEqual => gl::NOTEQUAL,
        CompareFunc::GreaterEqual => gl::GEQUAL,
        CompareFunc::Always => gl::ALWAYS,
    }
}

pub(crate) fn face_to_gl(face: Face) -> GLenum {
    match face {
        Face::Front => gl::FRONT,
        Face::Back => gl::BACK,
        Face::FrontAndBack => gl::FRONT_AND_BACK,
    }
}

pub(crate) fn blend_factor_to_gl(factor: BlendFactor) -> GLenum {
    match factor {
        BlendFactor::Zero => gl::ZERO,
        BlendFactor::One => gl::ONE,
        BlendFactor::SrcAlpha => gl::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => gl::ONE_MINUS_SRC_ALPHA,
    }
}

pub(crate) fn light_param_to_gl(param: LightParam) -> GLenum {
    match param {
        LightParam::Ambient => gl::AMBIENT,
        LightParam::Diffuse => gl::DIFFUSE,
        LightParam::Specular => gl::SPECULAR,
        LightParam::Position => gl::POSITION,
    }
}

pub(crate) fn pixel_format_to_gl(format: PixelFormat) -> GLenum {
    match format {
        PixelFormat::Rgb => gl::RGB,
        PixelFormat::Rgba => gl::RGBA,
        PixelFormat::Bgr => gl::BGR,
        PixelFormat::Bgra => gl::BGRA,
    }
}

/// Sized internal format for texture storage
pub(crate) fn internal_format_to_gl(format: PixelFormat) -> GLenum {
    match format {
        PixelFormat::Rgb | PixelFormat::Bgr => gl::RGB8,
        PixelFormat::Rgba | PixelFormat::Bgra => gl::RGBA8,
    }
}

pub(crate) fn texture_filter_to_gl(filter: TextureFilter) -> GLenum {
    match filter {
        TextureFilter::Nearest => gl::NEAREST,
        TextureFilter::Linear => gl::LINEAR,
    }
}

pub(crate) fn texture_wrap_to_gl(wrap: TextureWrap) -> GLenum {
    match wrap {
        TextureWrap::Repeat => gl::REPEAT,
        TextureWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
    }
}

pub(crate) fn buffer_target_to_gl(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
    }
}

pub(crate) fn client_array_to_gl(array: ClientArray) -> GLenum {
    match array {
        ClientArray::Vertex => gl::VERTEX_ARRAY,
        ClientArray::Colour => gl::COLOR_ARRAY,
        ClientArray::Normal => gl::NORMAL_ARRAY,
        ClientArray::TexCoord => gl::TEXTURE_COORD_ARRAY,
    }
}

pub(crate) fn primitive_mode_to_gl(mode: PrimitiveMode) -> GLenum {
    match mode {
        PrimitiveMode::Points => gl::POINTS,
        PrimitiveMode::Lines => gl::LINES,
        PrimitiveMode::LineStrip => gl::LINE_STRIP,
        PrimitiveMode::LineLoop => gl::LINE_LOOP,
        PrimitiveMode::Triangles => gl::TRIANGLES,
        PrimitiveMode::TriangleStrip => gl::TRIANGLE_STRIP,
        PrimitiveMode::TriangleFan => gl::TRIANGLE_FAN,
        PrimitiveMode::Quads => gl::QUADS,
        PrimitiveMode::QuadStrip => gl::QUAD_STRIP,
    }
}

pub(crate) fn framebuffer_status_from_gl(status: GLenum) -> FramebufferStatus {
    if status == gl::FRAMEBUFFER_COMPLETE {
        FramebufferStatus::Complete
    } else {
        FramebufferStatus::Incomplete(status)
    }
}

/// Symbolic name of a `glGetError` code
pub(crate) fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

#[cfg(test)]
#[path = "opengl_format_tests.rs"]
mod tests;
