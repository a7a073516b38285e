/// Frustum — perspective projection from pinhole camera intrinsics.
///
/// The frustum edges are derived with similar triangles: a pixel at
/// horizontal offset `u - cx` from the principal point lies on a ray with
/// slope `(u - cx) / fx`, so at the near plane the image edges `u = 0` and
/// `u = width` sit at `-cx·near/fx` and `(width - cx)·near/fx`. The vertical
/// edges follow the same rule with `fy`, `cy` and `height`.
///
/// The matrix layout is the classic `glFrustum` one, computed in `f64`.

use glam::{DMat4, DVec4};
use crate::device::GlDevice;
use crate::error::Result;

const SOURCE: &str = "scenegl::Frustum";

/// Pinhole camera intrinsics in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl CameraIntrinsics {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Reject non-positive or non-finite focal lengths
    pub fn validate(&self) -> Result<()> {
        let finite = [self.fx, self.fy, self.cx, self.cy].iter().all(|v| v.is_finite());
        if !finite || self.fx <= 0.0 || self.fy <= 0.0 {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "Camera intrinsics must be finite with positive focal lengths (got {:?})", self);
        }
        Ok(())
    }
}

impl From<(f64, f64, f64, f64)> for CameraIntrinsics {
    fn from((fx, fy, cx, cy): (f64, f64, f64, f64)) -> Self {
        Self::new(fx, fy, cx, cy)
    }
}

/// Near and far clipping distances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    pub near: f64,
    pub far: f64,
}

impl ClipPlanes {
    pub const fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }

    /// Convert a depth-buffer value in [0, 1] to eye-space distance
    ///
    /// `z_ndc = 2·depth − 1`, then
    /// `z_eye = 2·near·far / (far + near − z_ndc·(far − near))`.
    pub fn linearize_depth(&self, depth: f32) -> f32 {
        let (near, far) = (self.near, self.far);
        let z_ndc = 2.0 * depth as f64 - 1.0;
        (2.0 * near * far / (far + near - z_ndc * (far - near))) as f32
    }
}

impl Default for ClipPlanes {
    fn default() -> Self {
        DEFAULT_CLIP_PLANES
    }
}

/// Clip planes used for every intrinsics-based projection
pub const DEFAULT_CLIP_PLANES: ClipPlanes = ClipPlanes::new(0.1, 1000.0);

/// The six parameters of an off-axis perspective frustum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl FrustumBounds {
    /// Frustum seen by a pinhole camera producing a `width`×`height` image
    pub fn from_intrinsics(intrinsics: &CameraIntrinsics, width: u32, height: u32, clip: ClipPlanes) -> Self {
        let CameraIntrinsics { fx, fy, cx, cy } = *intrinsics;
        let near = clip.near;
        Self {
            left: -cx * near / fx,
            right: (width as f64 - cx) * near / fx,
            bottom: -cy * near / fy,
            top: (height as f64 - cy) * near / fy,
            near,
            far: clip.far,
        }
    }

    /// Projection matrix for these bounds
    pub fn to_matrix(&self) -> DMat4 {
        frustum_matrix(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }

    /// Recover the bounds from a matrix built by `to_matrix`
    pub fn from_matrix(matrix: &DMat4) -> Self {
        let sx = matrix.col(0).x;
        let sy = matrix.col(1).y;
        let a = matrix.col(2).x;
        let b = matrix.col(2).y;
        let c = matrix.col(2).z;
        let d = matrix.col(3).z;

        let near = d / (c - 1.0);
        let far = d / (c + 1.0);
        Self {
            left: near * (a - 1.0) / sx,
            right: near * (a + 1.0) / sx,
            bottom: near * (b - 1.0) / sy,
            top: near * (b + 1.0) / sy,
            near,
            far,
        }
    }

    /// Load these bounds as the current matrix (identity then frustum)
    pub fn apply(&self, device: &dyn GlDevice) {
        device.load_identity();
        device.frustum(self.left, self.right, self.bottom, self.top, self.near, self.far);
    }
}

/// `glFrustum` matrix
pub fn frustum_matrix(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> DMat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    DMat4::from_cols(
        DVec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        DVec4::new((right + left) / width, (top + bottom) / height, -(far + near) / depth, -1.0),
        DVec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

/// Projection matrix for a pinhole camera with the default clip planes
pub fn project(intrinsics: &CameraIntrinsics, width: u32, height: u32) -> DMat4 {
    FrustumBounds::from_intrinsics(intrinsics, width, height, DEFAULT_CLIP_PLANES).to_matrix()
}

/// Replace the current matrix with the camera's projection
///
/// Call with the projection stack selected (see `MatrixContext`).
pub fn set_projection_matrix(
    device: &dyn GlDevice,
    intrinsics: &CameraIntrinsics,
    width: u32,
    height: u32,
    clip: ClipPlanes,
) {
    FrustumBounds::from_intrinsics(intrinsics, width, height, clip).apply(device);
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
