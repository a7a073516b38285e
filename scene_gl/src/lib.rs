/*!
# SceneGL

Scene-rendering helpers over a fixed-function OpenGL context.

All state changes are scoped: guards apply a change when they are created
and undo it when they are dropped, using the context's own matrix and
attribute stacks. GPU objects (textures, meshes, frame buffers) release
their native resources exactly once.

## Architecture

- **GlDevice**: typed surface of the fixed-function API every component
  talks through (`MockGlDevice` models it in software)
- **Contexts**: scoped matrix, lighting, depth-test, texture, blend and
  overlay state
- **TriMesh**: immutable indexed triangle mesh in GPU buffers
- **MeshRenderer**: lit drawing on screen, or off screen into BGR colour
  and metric depth images
- **Shapes**: spheres, cylinders, boxes, voxel grids and paths

Backends (e.g. `scene_gl_backend_opengl`) provide concrete devices.
*/

// Internal modules
mod error;
mod config;
mod framebuffer;
mod mesh;
mod readback;
mod texture;
pub mod log;
pub mod camera;
pub mod context;
pub mod device;
pub mod render;
pub mod shapes;

// Main scenegl namespace module
pub mod scenegl {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{RendererConfig, DEFAULT_LIGHT_AXIS};

    // GPU objects
    pub use crate::framebuffer::{FrameBuffer, FrameBufferContext};
    pub use crate::mesh::{ColouredVertex, LitVertex, TriMesh};
    pub use crate::readback::{read_bgr_image, read_depth_image, BgrImage, DepthImage};
    pub use crate::texture::Texture;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Device sub-module
    pub mod device {
        pub use crate::device::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Context sub-module
    pub mod context {
        pub use crate::context::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::render::*;
    }

    // Shapes sub-module
    pub mod shapes {
        pub use crate::shapes::*;
    }
}

// Re-export math and image libraries at crate root
pub use glam;
pub use image;
