//! Primitive shapes
//!
//! Immediate-mode drawing helpers, the quadric tessellators behind them,
//! the wireframe geometry they emit, and the `Shape` visitor layer.

pub mod geometry;
pub mod quadric;
mod primitives;
mod shape;

pub(crate) use primitives::emit_unit_quad;
pub use primitives::{
    render_aabb, render_cylinder, render_path, render_sphere, render_textured_quad,
    render_trajectory, render_voxel_grid,
};
pub use shape::{Cylinder, Shape, ShapeRenderer, ShapeVisitor, Sphere, SHAPE_SLICES, SHAPE_STACKS};
