//! Scene submission pipeline.
//!
//! `SceneRenderer` sequences per-frame rendering: `begin_scene` captures the
//! camera matrices, `submit_*` calls bind resources, upload uniforms and
//! issue draw calls through the injected `GraphicsDevice`, and `end_scene`
//! closes the frame. The pipeline owns no GPU resources; it only sequences
//! state changes around draws and restores every state it changes.

use glam::{Mat3, Mat4};

use crate::error::Result;
use crate::renderer::{CullMode, DepthFunc, GraphicsDevice, Shader};
use crate::resource::{Material, Mesh, SkyboxMaterial};
use crate::scene::{Light, LightKind, SceneCamera, MAX_SUBMITTED_LIGHTS};
use crate::engine_warn;

const LOG_SOURCE: &str = "stellar3d::SceneRenderer";

/// Bone matrices uploaded per skinned submission, at most
pub const MAX_BONE_MATRICES: usize = 100;

// ============================================================================
// Statistics
// ============================================================================

/// Per-scene statistics, reset by `begin_scene`
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    pub draw_calls: u32,
}

// ============================================================================
// SceneRenderer
// ============================================================================

/// Stateless-backend submission pipeline
pub struct SceneRenderer {
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
    stats: RenderStats,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            stats: RenderStats::default(),
        }
    }

    // ===== FRAME SEQUENCING =====

    /// Open a scene with the camera's own view matrix
    ///
    /// Resets the draw-call counter.
    pub fn begin_scene(&mut self, camera: &SceneCamera) {
        self.view = camera.view;
        self.projection = camera.projection;
        self.view_projection = camera.view_projection();
        self.stats = RenderStats::default();
    }

    /// Open a scene from a camera world transform
    ///
    /// The view matrix is the inverse of the transform.
    pub fn begin_scene_with_transform(&mut self, camera: &SceneCamera, transform: Mat4) {
        self.view = transform.inverse();
        self.projection = camera.projection;
        self.view_projection = self.projection * self.view;
        self.stats = RenderStats::default();
    }

    /// Close the scene
    ///
    /// Draws are issued immediately at submission; nothing is flushed here.
    pub fn end_scene(&mut self) {}

    /// Statistics accumulated since the last `begin_scene`
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    // ===== SUBMISSION =====

    /// Submit one mesh with its material, transform and lights
    ///
    /// `bone_transforms` uploads skinning matrices when present; anything
    /// past `MAX_BONE_MATRICES` is dropped with a warning.
    pub fn submit_mesh(
        &mut self,
        device: &dyn GraphicsDevice,
        mesh: &Mesh,
        material: &Material,
        transform: Mat4,
        lights: &[Light],
        bone_transforms: Option<&[Mat4]>,
    ) -> Result<()> {
        material.bind();
        let shader = material.shader().as_ref();
        shader.set_mat4("u_ViewProjection", &self.view_projection);
        shader.set_mat4("u_Transform", &transform);
        set_shader_light_info(shader, lights);

        if let Some(bones) = bone_transforms {
            if bones.len() > MAX_BONE_MATRICES {
                engine_warn!(
                    LOG_SOURCE,
                    "{} bone matrices submitted, uploading the first {}",
                    bones.len(),
                    MAX_BONE_MATRICES
                );
            }
            for (i, bone) in bones.iter().take(MAX_BONE_MATRICES).enumerate() {
                shader.set_mat4(&format!("u_FinalBonesMatrices[{}]", i), bone);
            }
        }

        self.draw_mesh(device, mesh)
    }

    /// Submit terrain geometry, culled front-face for under-surface viewing
    ///
    /// Restores back-face culling before returning.
    pub fn submit_terrain(
        &mut self,
        device: &dyn GraphicsDevice,
        mesh: &Mesh,
        material: &Material,
        transform: Mat4,
        lights: &[Light],
    ) -> Result<()> {
        device.set_cull_mode(CullMode::Front);
        let result = self.submit_mesh(device, mesh, material, transform, lights, None);
        device.set_cull_mode(CullMode::Back);
        result
    }

    /// Submit the skybox, drawn at maximum depth behind everything
    ///
    /// The view matrix is stripped of translation so the box follows the
    /// camera. Depth function, depth mask and cull mode are restored before
    /// returning.
    pub fn submit_skybox(
        &mut self,
        device: &dyn GraphicsDevice,
        mesh: &Mesh,
        material: &SkyboxMaterial,
    ) -> Result<()> {
        device.set_depth_func(DepthFunc::LessEqual);
        device.set_depth_mask(false);
        device.set_cull_mode(CullMode::None);

        material.bind();
        // Rotation only: the skybox never translates with the camera
        let view_rotation = Mat4::from_mat3(Mat3::from_mat4(self.view));
        material
            .shader()
            .set_mat4("u_ViewProjection", &(self.projection * view_rotation));

        let result = self.draw_mesh(device, mesh);

        device.set_depth_func(DepthFunc::Less);
        device.set_depth_mask(true);
        device.set_cull_mode(CullMode::Back);
        result
    }

    /// Submit collider debug geometry in wireframe
    ///
    /// Wireframe rasterization is restored before returning.
    pub fn submit_collider(
        &mut self,
        device: &dyn GraphicsDevice,
        collider: &ColliderGeometry,
        shader: &dyn Shader,
        transform: Mat4,
    ) -> Result<()> {
        device.set_wireframe(true);
        shader.bind();
        shader.set_mat4("u_ViewProjection", &self.view_projection);
        shader.set_mat4("u_Transform", &transform);

        let mut result = Ok(());
        if let Some(lines) = &collider.lines {
            lines.bind();
            result = match lines.index_buffer() {
                Some(ib) => device.draw_indexed_lines(ib.count(), ib.index_type()),
                None => device.draw_lines(0, lines.vertex_count()),
            };
            if result.is_ok() {
                self.stats.draw_calls += 1;
            }
        }
        if result.is_ok() {
            if let Some(triangles) = &collider.triangles {
                triangles.bind();
                result = match triangles.index_buffer() {
                    Some(ib) => device.draw_indexed(ib.count(), ib.index_type()),
                    None => device.draw_arrays(0, triangles.vertex_count()),
                };
                if result.is_ok() {
                    self.stats.draw_calls += 1;
                }
            }
        }

        device.set_wireframe(false);
        result
    }

    fn draw_mesh(&mut self, device: &dyn GraphicsDevice, mesh: &Mesh) -> Result<()> {
        mesh.bind();
        match mesh.index_buffer() {
            Some(ib) => device.draw_indexed(ib.count(), ib.index_type())?,
            None => device.draw_arrays(0, mesh.vertex_count())?,
        }
        self.stats.draw_calls += 1;
        Ok(())
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Collider geometry
// ============================================================================

/// Debug geometry for one collider: optional line and triangle meshes
pub struct ColliderGeometry {
    pub lines: Option<Mesh>,
    pub triangles: Option<Mesh>,
}

// ============================================================================
// Light uniform upload
// ============================================================================

/// Upload lights to a bound shader
///
/// Non-scene lights fill `u_Light[0..n]` up to `MAX_SUBMITTED_LIGHTS`; the
/// excess is dropped with a warning. A light flagged `scene_light` goes to
/// the `u_Global` block instead, even when it appears after the cap. Writes
/// `u_LightCount` last.
pub fn set_shader_light_info(shader: &dyn Shader, lights: &[Light]) {
    let mut slot = 0usize;
    let mut capped = false;
    for light in lights {
        if light.scene_light {
            upload_light(shader, "u_Global", light);
            continue;
        }
        if slot >= MAX_SUBMITTED_LIGHTS {
            if !capped {
                engine_warn!(
                    LOG_SOURCE,
                    "More than {} lights submitted, dropping the excess",
                    MAX_SUBMITTED_LIGHTS
                );
                capped = true;
            }
            continue;
        }
        upload_light(shader, &format!("u_Light[{}]", slot), light);
        slot += 1;
    }
    shader.set_int("u_LightCount", slot as i32);
}

fn upload_light(shader: &dyn Shader, prefix: &str, light: &Light) {
    let kind = match light.kind {
        LightKind::Directional => 0,
        LightKind::Point => 1,
        LightKind::Spot => 2,
    };
    shader.set_int(&format!("{}.kind", prefix), kind);
    shader.set_vec3(&format!("{}.position", prefix), light.position);
    shader.set_vec3(&format!("{}.direction", prefix), light.direction);
    shader.set_vec3(&format!("{}.ambient", prefix), light.ambient);
    shader.set_vec3(&format!("{}.diffuse", prefix), light.diffuse);
    shader.set_vec3(&format!("{}.specular", prefix), light.specular);
    shader.set_float(&format!("{}.constant", prefix), light.constant);
    shader.set_float(&format!("{}.linear", prefix), light.linear);
    shader.set_float(&format!("{}.quadratic", prefix), light.quadratic);
    shader.set_float(&format!("{}.cutOff", prefix), light.cut_off);
    shader.set_float(&format!("{}.outerCutOff", prefix), light.outer_cut_off);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "scene_renderer_tests.rs"]
mod tests;
