use glam::Vec3;
use crate::device::MockGlDevice;
use super::*;

#[derive(Default)]
struct Counter {
    spheres: usize,
    cylinders: usize,
}

impl ShapeVisitor for Counter {
    fn visit_sphere(&mut self, _sphere: &Sphere) {
        self.spheres += 1;
    }

    fn visit_cylinder(&mut self, _cylinder: &Cylinder) {
        self.cylinders += 1;
    }
}

fn scene() -> Vec<Shape> {
    vec![
        Sphere::new(Vec3::ZERO, 1.0).into(),
        Cylinder::new(Vec3::ZERO, Vec3::Z, 0.5, 0.25).into(),
        Sphere::new(Vec3::X, 0.1).into(),
    ]
}

#[test]
fn test_accept_dispatches_by_variant() {
    let mut counter = Counter::default();
    for shape in scene() {
        shape.accept(&mut counter);
    }
    assert_eq!((counter.spheres, counter.cylinders), (2, 1));
}

#[test]
fn test_renderer_uses_fixed_subdivision() {
    let device = MockGlDevice::new(64, 64);
    let mut renderer = ShapeRenderer::new(&device);

    renderer.render(&Sphere::new(Vec3::ZERO, 1.0).into());
    let sphere_blocks = device.primitives();
    assert_eq!(sphere_blocks.len(), SHAPE_STACKS as usize);
    assert_eq!(sphere_blocks[0].vertices.len(), 2 * (SHAPE_SLICES as usize + 1));

    device.clear_records();
    renderer.render(&Cylinder::new(Vec3::ZERO, Vec3::Z, 1.0, 1.0).into());
    let cylinder_blocks = device.primitives();
    assert_eq!(cylinder_blocks.len(), 1);
    assert_eq!(cylinder_blocks[0].vertices.len(), 2 * (SHAPE_SLICES as usize + 1));
}

#[test]
fn test_render_all() {
    let device = MockGlDevice::new(64, 64);
    let shapes = scene();
    ShapeRenderer::new(&device).render_all(&shapes);

    assert_eq!(device.primitives().len(), 2 * SHAPE_STACKS as usize + 1);
}
