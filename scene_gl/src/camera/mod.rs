//! Camera module — projection, viewport and pose math.
//!
//! Pure functions, plus thin helpers that hand their results to a
//! `GlDevice`.

mod frustum;
mod pose;
mod viewport;

pub use frustum::{
    CameraIntrinsics, ClipPlanes, FrustumBounds, DEFAULT_CLIP_PLANES,
    frustum_matrix, project, set_projection_matrix,
};
pub use pose::{modelview_from_pose, pose_position, CAMERA_TO_EYE};
pub use viewport::{set_viewport, viewport_rect};
