/// Quadric tessellation — spheres and cylinders in immediate mode.
///
/// Both are built around the local z axis with counter-clockwise
/// outward-facing quads and per-vertex normals:
///
/// - sphere: centred at the origin, poles on ±z
/// - cylinder: from z = 0 (`base_radius`) to z = `height` (`top_radius`),
///   uncapped
///
/// Subdivision counts below the minimum that still encloses a surface
/// (3 slices, 1 stack) are raised to it.

use std::f32::consts::{PI, TAU};
use glam::Vec3;
use crate::device::{GlDevice, PrimitiveMode};

const MIN_SLICES: u32 = 3;

fn slice_angle(slice: u32, slices: u32) -> (f32, f32) {
    // The last slice closes the loop exactly
    let theta = if slice == slices { 0.0 } else { TAU * slice as f32 / slices as f32 };
    theta.sin_cos()
}

/// Emit a sphere of `radius`
pub fn sphere(device: &dyn GlDevice, radius: f32, slices: u32, stacks: u32) {
    let slices = slices.max(MIN_SLICES);
    let stacks = stacks.max(2);

    for stack in 0..stacks {
        let (phi0, phi1) = (PI * stack as f32 / stacks as f32, PI * (stack + 1) as f32 / stacks as f32);
        device.begin(PrimitiveMode::QuadStrip);
        for slice in 0..=slices {
            let (sin_t, cos_t) = slice_angle(slice, slices);
            for phi in [phi0, phi1] {
                let normal = Vec3::new(cos_t * phi.sin(), sin_t * phi.sin(), phi.cos());
                device.normal3(normal);
                device.vertex3(normal * radius);
            }
        }
        device.end();
    }
}

/// Emit a (possibly tapered) open cylinder along +z
pub fn cylinder(device: &dyn GlDevice, base_radius: f32, top_radius: f32, height: f32, slices: u32, stacks: u32) {
    let slices = slices.max(MIN_SLICES);
    let stacks = stacks.max(1);
    // Outward normals tilt towards the narrower end
    let slope = if height != 0.0 { (base_radius - top_radius) / height } else { 0.0 };

    for stack in 0..stacks {
        let (t0, t1) = (stack as f32 / stacks as f32, (stack + 1) as f32 / stacks as f32);
        let rings = [
            (height * t1, base_radius + (top_radius - base_radius) * t1),
            (height * t0, base_radius + (top_radius - base_radius) * t0),
        ];
        device.begin(PrimitiveMode::QuadStrip);
        for slice in 0..=slices {
            let (sin_t, cos_t) = slice_angle(slice, slices);
            device.normal3(Vec3::new(cos_t, sin_t, slope).normalize());
            for (z, r) in rings {
                device.vertex3(Vec3::new(cos_t * r, sin_t * r, z));
            }
        }
        device.end();
    }
}

#[cfg(test)]
#[path = "quadric_tests.rs"]
mod tests;
