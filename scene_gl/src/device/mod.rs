/// Device module - the fixed-function OpenGL surface SceneGL is written against

mod gl_device;
pub mod mock_gl_device;

pub use gl_device::*;
pub use mock_gl_device::MockGlDevice;
