/// Oriented frame context — model-view aligned to an origin and an axis.
///
/// Quadrics are tessellated along their local +z, so drawing one along an
/// arbitrary segment means moving into a frame whose z axis is the segment
/// direction. The frame's remaining axes come from a fixed up reference,
/// `(0, -1, 0)`, swapped for `(1, 0, 0)` when the axis is nearly parallel
/// to it.

use glam::{Mat4, Vec3};
use crate::device::{GlDevice, MatrixMode};

const UP: Vec3 = Vec3::new(0.0, -1.0, 0.0);
const FALLBACK_UP: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const PARALLEL_THRESHOLD: f32 = 0.999;

/// Local-to-parent transform of the frame at `origin` with z along `axis`
///
/// The columns are `[-u, -v, n, origin]` where `n` is the normalized axis,
/// `u = normalize(up × n)` and `v = n × u`. The result is a rigid,
/// right-handed transform. A zero axis yields a pure translation.
pub fn local_frame(origin: Vec3, axis: Vec3) -> Mat4 {
    let Some(n) = axis.try_normalize() else {
        return Mat4::from_translation(origin);
    };
    let up = if n.dot(UP).abs() > PARALLEL_THRESHOLD { FALLBACK_UP } else { UP };
    let u = up.cross(n).normalize();
    let v = n.cross(u);

    Mat4::from_cols(
        (-u).extend(0.0),
        (-v).extend(0.0),
        n.extend(0.0),
        origin.extend(1.0),
    )
}

/// Guard over one pushed model-view matrix
pub struct OrientedFrameContext<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> OrientedFrameContext<'d> {
    pub fn new(device: &'d dyn GlDevice, origin: Vec3, axis: Vec3) -> Self {
        device.matrix_mode(MatrixMode::ModelView);
        device.push_matrix();
        device.mult_matrix(&local_frame(origin, axis));
        Self { device }
    }
}

impl Drop for OrientedFrameContext<'_> {
    fn drop(&mut self) {
        self.device.matrix_mode(MatrixMode::ModelView);
        self.device.pop_matrix();
    }
}

#[cfg(test)]
#[path = "oriented_frame_context_tests.rs"]
mod tests;
