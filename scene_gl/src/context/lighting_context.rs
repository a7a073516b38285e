/// Lighting context — temporary fixed-function lighting.
///
/// Saves the ENABLE and LIGHTING attribute groups, turns on lighting and
/// colour material (material properties follow the current colour), and
/// enables each requested light in its hardware slot. Dropping the guard
/// pops the attribute groups.

use glam::Vec3;
use crate::device::{AttribMask, Capability, GlDevice, LightParam, MAX_LIGHTS};
use crate::error::Result;

const SOURCE: &str = "scenegl::LightingContext";

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ===== LIGHTS =====

/// Directional light
///
/// Carries the direction the light travels in. The fixed-function
/// pipeline wants the opposite (a position at infinity), so `enable`
/// negates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    direction: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Enable this light in hardware slot `slot` with white diffuse and specular
    pub fn enable(&self, device: &dyn GlDevice, slot: u8) {
        let position = -self.direction;
        device.enable(Capability::Light(slot));
        device.light(slot, LightParam::Diffuse, WHITE);
        device.light(slot, LightParam::Specular, WHITE);
        device.light(slot, LightParam::Position, [position.x, position.y, position.z, 0.0]);
    }
}

/// Light that can occupy a hardware slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
}

impl Light {
    pub fn directional(direction: Vec3) -> Self {
        Light::Directional(DirectionalLight::new(direction))
    }

    pub fn enable(&self, device: &dyn GlDevice, slot: u8) {
        match self {
            Light::Directional(light) => light.enable(device, slot),
        }
    }
}

// ===== CONTEXT =====

/// Guard over the lighting attribute groups
pub struct LightingContext<'d> {
    device: &'d dyn GlDevice,
}

impl<'d> LightingContext<'d> {
    /// Enable `lights`, each in its given slot
    ///
    /// Slots are applied in ascending order; when a slot is listed twice the
    /// later light wins. A slot outside `0..MAX_LIGHTS` is rejected before
    /// any state is touched.
    pub fn new(device: &'d dyn GlDevice, lights: &[(u8, Light)]) -> Result<Self> {
        if let Some((slot, _)) = lights.iter().find(|(slot, _)| *slot >= MAX_LIGHTS) {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "Light slot {} is out of range (the pipeline has {} slots)", slot, MAX_LIGHTS);
        }

        device.push_attrib(AttribMask::ENABLE | AttribMask::LIGHTING);
        device.enable(Capability::ColorMaterial);
        device.enable(Capability::Lighting);

        for slot in 0..MAX_LIGHTS {
            if let Some((_, light)) = lights.iter().rev().find(|(s, _)| *s == slot) {
                light.enable(device, slot);
            }
        }

        Ok(Self { device })
    }

    /// One directional light per direction, in slots 0, 1, ...
    pub fn directional(device: &'d dyn GlDevice, directions: &[Vec3]) -> Result<Self> {
        if directions.len() > MAX_LIGHTS as usize {
            crate::scenegl_bail!(SOURCE, InvalidArgument,
                "At most {} light directions can be specified (got {})", MAX_LIGHTS, directions.len());
        }
        let lights: Vec<(u8, Light)> = directions
            .iter()
            .enumerate()
            .map(|(slot, dir)| (slot as u8, Light::directional(*dir)))
            .collect();
        Self::new(device, &lights)
    }
}

impl Drop for LightingContext<'_> {
    fn drop(&mut self) {
        self.device.pop_attrib();
    }
}

#[cfg(test)]
#[path = "lighting_context_tests.rs"]
mod tests;
