/// Primitive-shape helpers — one call per shape, drawn with the current state.
///
/// Each helper restores whatever matrix or attribute state it touches. The
/// current colour is left as the last colour emitted.

use glam::{Mat4, Vec2, Vec3};
use crate::camera::pose_position;
use crate::context::{AttribContext, MatrixContext, OrientedFrameContext};
use crate::device::{AttribMask, Capability, GlDevice, MatrixMode, PrimitiveMode, TextureHandle};
use crate::error::Result;
use super::geometry::{aabb_edges, voxel_grid_segments, Segment};
use super::quadric;

/// Sphere of `radius` around `centre`
pub fn render_sphere(device: &dyn GlDevice, centre: Vec3, radius: f32, slices: u32, stacks: u32) {
    let _frame = MatrixContext::new(device, MatrixMode::ModelView, |d| d.translate(centre));
    quadric::sphere(device, radius, slices, stacks);
}

/// Open cylinder (or truncated cone) between two centres
///
/// A cylinder whose centres coincide has no direction and is not drawn.
pub fn render_cylinder(
    device: &dyn GlDevice,
    base_centre: Vec3,
    top_centre: Vec3,
    base_radius: f32,
    top_radius: f32,
    slices: u32,
) {
    let axis = top_centre - base_centre;
    let height = axis.length();
    if height <= f32::EPSILON {
        return;
    }
    let _frame = OrientedFrameContext::new(device, base_centre, axis);
    quadric::cylinder(device, base_radius, top_radius, height, slices, 1);
}

fn emit_segments(device: &dyn GlDevice, segments: &[Segment]) {
    device.begin(PrimitiveMode::Lines);
    for (start, end) in segments {
        device.vertex3(*start);
        device.vertex3(*end);
    }
    device.end();
}

/// Wireframe of an axis-aligned box
pub fn render_aabb(device: &dyn GlDevice, mins: Vec3, maxs: Vec3) {
    emit_segments(device, &aabb_edges(mins, maxs));
}

/// Wireframe of the voxel grid covering `mins..maxs`
///
/// Fails with `InvalidArgument` for a non-positive voxel size or inverted
/// bounds, before anything is drawn.
pub fn render_voxel_grid(device: &dyn GlDevice, mins: Vec3, maxs: Vec3, voxel_size: Vec3, colour: Vec3) -> Result<()> {
    let segments = voxel_grid_segments(mins, maxs, voxel_size)?;
    device.colour3(colour);
    emit_segments(device, &segments);
    Ok(())
}

/// Line strip through `points` with colour fading from `start_colour` to `end_colour`
///
/// Waypoint `i` of `n` gets `start + (end − start)·i/(n − 1)`. Fewer than
/// two points draw nothing.
pub fn render_path(device: &dyn GlDevice, points: &[Vec3], start_colour: Vec3, end_colour: Vec3, line_width: f32) {
    if points.len() < 2 {
        return;
    }
    let _line = AttribContext::new(device, AttribMask::LINE);
    device.line_width(line_width);

    let last = (points.len() - 1) as f32;
    device.begin(PrimitiveMode::LineStrip);
    for (i, point) in points.iter().enumerate() {
        device.colour3(start_colour.lerp(end_colour, i as f32 / last));
        device.vertex3(*point);
    }
    device.end();
}

/// Path through the camera positions of a sequence of world-from-camera poses
pub fn render_trajectory(device: &dyn GlDevice, poses: &[Mat4], start_colour: Vec3, end_colour: Vec3, line_width: f32) {
    let points: Vec<Vec3> = poses.iter().map(pose_position).collect();
    render_path(device, &points, start_colour, end_colour, line_width);
}

/// Unit quad (0, 0)..(1, 1) with matching texture coordinates
pub(crate) fn emit_unit_quad(device: &dyn GlDevice) {
    device.colour3(Vec3::ONE);
    device.begin(PrimitiveMode::Quads);
    for corner in [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)] {
        device.tex_coord2(corner);
        device.vertex2(corner);
    }
    device.end();
}

/// Texture stretched over the unit square of the current projection
///
/// Inside an `Ortho2dContext` this covers the whole viewport.
pub fn render_textured_quad(device: &dyn GlDevice, texture: TextureHandle) {
    let _enable = AttribContext::new(device, AttribMask::ENABLE);
    device.enable(Capability::Texture2D);
    device.bind_texture(Some(texture));
    emit_unit_quad(device);
    device.bind_texture(None);
}

#[cfg(test)]
#[path = "primitives_tests.rs"]
mod tests;
