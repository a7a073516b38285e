/// Renderer configuration
///
/// Plain data with `Default` values matching the fixed behaviour of the
/// renderers. Construct with struct update syntax to override a field:
///
/// ```
/// use scene_gl::scenegl::RendererConfig;
///
/// let config = RendererConfig {
///     clear_colour: [0.0, 0.0, 0.0, 1.0],
///     ..Default::default()
/// };
/// assert_eq!(config.clip.near, 0.1);
/// ```

use glam::Vec3;
use crate::camera::{ClipPlanes, DEFAULT_CLIP_PLANES};

/// Axis along which the two default directional lights travel
pub const DEFAULT_LIGHT_AXIS: Vec3 = Vec3::new(0.0, -2.0, -1.0);

/// Settings shared by `MeshRenderer` and the renderers built on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Clip planes of the off-screen projection (also used to linearize depth)
    pub clip: ClipPlanes,
    /// Background of off-screen renders
    pub clear_colour: [f32; 4],
    /// Default lights travel along this axis and its negation
    pub default_light_axis: Vec3,
}

impl RendererConfig {
    /// The two opposing lights used when a caller supplies none
    pub fn default_light_directions(&self) -> [Vec3; 2] {
        [self.default_light_axis, -self.default_light_axis]
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clip: DEFAULT_CLIP_PLANES,
            clear_colour: [1.0, 1.0, 1.0, 1.0],
            default_light_axis: DEFAULT_LIGHT_AXIS,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
