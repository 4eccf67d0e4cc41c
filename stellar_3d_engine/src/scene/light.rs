//! Light sources submitted alongside meshes.
//!
//! A light is plain data uploaded as shader uniforms at submission time. Up
//! to `MAX_SUBMITTED_LIGHTS` non-scene lights fill the `u_Light[i]` array;
//! at most one light per submission may be flagged `scene_light`, and it is
//! uploaded to the dedicated `u_Global` block instead of the array.

use glam::Vec3;

/// Upper bound of the `u_Light` uniform array
pub const MAX_SUBMITTED_LIGHTS: usize = 8;

/// How a light illuminates the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Infinitely-distant light, direction only
    Directional,
    /// Omnidirectional light with distance attenuation
    Point,
    /// Cone light with inner/outer cutoff angles
    Spot,
}

/// One light source, plain data
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Attenuation: constant term
    pub constant: f32,
    /// Attenuation: linear term
    pub linear: f32,
    /// Attenuation: quadratic term
    pub quadratic: f32,
    /// Spot inner cutoff, cosine of the angle
    pub cut_off: f32,
    /// Spot outer cutoff, cosine of the angle
    pub outer_cut_off: f32,
    /// Routes the light to the `u_Global` block instead of `u_Light[i]`
    pub scene_light: bool,
}

impl Light {
    pub fn directional(direction: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            position: Vec3::ZERO,
            direction,
            ambient,
            diffuse,
            specular,
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
            cut_off: 0.0,
            outer_cut_off: 0.0,
            scene_light: false,
        }
    }

    pub fn point(
        position: Vec3,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
    ) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            direction: Vec3::ZERO,
            ambient,
            diffuse,
            specular,
            constant,
            linear,
            quadratic,
            cut_off: 0.0,
            outer_cut_off: 0.0,
            scene_light: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn spot(
        position: Vec3,
        direction: Vec3,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
        cut_off: f32,
        outer_cut_off: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot,
            position,
            direction,
            ambient,
            diffuse,
            specular,
            constant,
            linear,
            quadratic,
            cut_off,
            outer_cut_off,
            scene_light: false,
        }
    }

    /// Mark the light as the scene light (uploaded to `u_Global`)
    pub fn as_scene_light(mut self) -> Self {
        self.scene_light = true;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
