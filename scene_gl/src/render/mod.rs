//! Renderers
//!
//! `MeshRenderer` draws any `Renderable` under fixed lighting, culling and
//! depth-test state, on screen or into an off-screen image.
//! `PrespecifiedRenderer` binds one renderable and its lights to a mesh
//! renderer. `ImageRenderer` draws colour images over the viewport.

mod image_renderer;
mod mesh_renderer;
mod prespecified_renderer;
mod renderable;

pub use image_renderer::ImageRenderer;
pub use mesh_renderer::{MeshRenderer, RenderedImages};
pub use prespecified_renderer::{BaseRenderer, PrespecifiedRenderer};
pub use renderable::Renderable;
