//! Scoped state guards
//!
//! Every guard applies its state change in its constructor and undoes it
//! in `Drop`, using the device's own matrix and attribute stacks to hold
//! the previous state. Guards nest in the usual stack order.
//!
//! ```
//! use scene_gl::scenegl::context::{DepthTestContext, MatrixContext};
//! use scene_gl::scenegl::device::{CompareFunc, MatrixMode, MockGlDevice};
//!
//! let device = MockGlDevice::new(640, 480);
//! {
//!     let _modelview = MatrixContext::new(&device, MatrixMode::ModelView, |d| d.load_identity());
//!     let _depth = DepthTestContext::new(&device, CompareFunc::LessEqual);
//!     // draw ...
//! }
//! assert_eq!(device.attrib_stack_depth(), 0);
//! ```

mod alpha_blend_context;
mod attrib_context;
mod depth_test_context;
mod lighting_context;
mod matrix_context;
mod oriented_frame_context;
mod ortho_2d_context;
mod texture_context;

pub use alpha_blend_context::AlphaBlendContext;
pub use attrib_context::{AttribContext, ClientAttribContext};
pub use depth_test_context::DepthTestContext;
pub use lighting_context::{DirectionalLight, Light, LightingContext};
pub use matrix_context::MatrixContext;
pub use oriented_frame_context::{local_frame, OrientedFrameContext};
pub use ortho_2d_context::Ortho2dContext;
pub use texture_context::TextureContext;
