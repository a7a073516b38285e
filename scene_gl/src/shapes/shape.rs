/// Shapes — closed set of drawable solids and a visitor over them.

use glam::Vec3;
use crate::device::GlDevice;
use super::primitives::{render_cylinder, render_sphere};

/// Subdivision used by `ShapeRenderer` for every curved shape
pub const SHAPE_SLICES: u32 = 10;
pub const SHAPE_STACKS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub centre: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(centre: Vec3, radius: f32) -> Self {
        Self { centre, radius }
    }
}

/// Cylinder or truncated cone between two centres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub base_centre: Vec3,
    pub top_centre: Vec3,
    pub base_radius: f32,
    pub top_radius: f32,
}

impl Cylinder {
    pub fn new(base_centre: Vec3, top_centre: Vec3, base_radius: f32, top_radius: f32) -> Self {
        Self { base_centre, top_centre, base_radius, top_radius }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Cylinder(Cylinder),
}

impl Shape {
    /// Dispatch to the visitor method for this shape
    pub fn accept<V: ShapeVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Shape::Sphere(sphere) => visitor.visit_sphere(sphere),
            Shape::Cylinder(cylinder) => visitor.visit_cylinder(cylinder),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Cylinder> for Shape {
    fn from(cylinder: Cylinder) -> Self {
        Shape::Cylinder(cylinder)
    }
}

/// One method per `Shape` variant
pub trait ShapeVisitor {
    fn visit_sphere(&mut self, sphere: &Sphere);
    fn visit_cylinder(&mut self, cylinder: &Cylinder);
}

/// Draws shapes with `SHAPE_SLICES` × `SHAPE_STACKS` subdivision
pub struct ShapeRenderer<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> ShapeRenderer<'d> {
    pub fn new(device: &'d dyn GlDevice) -> Self {
        Self { device }
    }

    pub fn render(&mut self, shape: &Shape) {
        shape.accept(self);
    }

    pub fn render_all<'s, I: IntoIterator<Item = &'s Shape>>(&mut self, shapes: I) {
        for shape in shapes {
            self.render(shape);
        }
    }
}

impl ShapeVisitor for ShapeRenderer<'_> {
    fn visit_sphere(&mut self, sphere: &Sphere) {
        render_sphere(self.device, sphere.centre, sphere.radius, SHAPE_SLICES, SHAPE_STACKS);
    }

    fn visit_cylinder(&mut self, cylinder: &Cylinder) {
        render_cylinder(
            self.device,
            cylinder.base_centre,
            cylinder.top_centre,
            cylinder.base_radius,
            cylinder.top_radius,
            SHAPE_SLICES,
        );
    }
}

#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
