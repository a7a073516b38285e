/// Renderable — anything a renderer can draw with the state it sets up.

use crate::mesh::TriMesh;

/// Drawable content with no state of its own to set up
///
/// Implemented for `TriMesh` and for every `Fn()`, so an arbitrary scene
/// can be passed as a closure:
///
/// ```ignore
/// renderer.render(&|| {
///     floor.render();
///     shapes.render_all(&obstacles);
/// }, None)?;
/// ```
pub trait Renderable {
    fn render(&self);
}

impl<F: Fn()> Renderable for F {
    fn render(&self) {
        self()
    }
}

impl Renderable for TriMesh<'_> {
    fn render(&self) {
        TriMesh::render(self)
    }
}
