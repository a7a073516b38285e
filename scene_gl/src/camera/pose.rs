/// Camera pose conversion.
///
/// Poses are world-from-camera rigid transforms with camera space x-right,
/// y-down, z-forward (the usual computer-vision convention). The OpenGL eye
/// looks down −z with y up, so the view matrix is the inverse pose followed
/// by a flip of the y and z axes.

use glam::{Mat4, Vec4};

/// Camera-space to OpenGL eye-space axis flip
pub const CAMERA_TO_EYE: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, -1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, -1.0, 0.0),
    Vec4::new(0.0, 0.0, 0.0, 1.0),
);

/// Model-view matrix for a camera at `world_from_camera`
pub fn modelview_from_pose(world_from_camera: &Mat4) -> Mat4 {
    CAMERA_TO_EYE * world_from_camera.inverse()
}

/// Camera position of a world-from-camera pose
pub fn pose_position(world_from_camera: &Mat4) -> glam::Vec3 {
    world_from_camera.w_axis.truncate()
}

#[cfg(test)]
#[path = "pose_tests.rs"]
mod tests;
