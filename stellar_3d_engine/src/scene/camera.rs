//! Scene camera - the projection and view matrices a scene is rendered with.
//!
//! The camera is plain data; it does not own controller logic. Whoever moves
//! the camera recomputes the view matrix and hands the camera to
//! `SceneRenderer::begin_scene`.

use glam::Mat4;

/// Projection + view pair consumed by the submission pipeline
#[derive(Debug, Clone, Copy)]
pub struct SceneCamera {
    pub projection: Mat4,
    pub view: Mat4,
}

impl SceneCamera {
    pub fn new(projection: Mat4, view: Mat4) -> Self {
        Self { projection, view }
    }

    /// Perspective camera looking down -Z from the origin
    pub fn perspective(fov_y_radians: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            projection: Mat4::perspective_rh_gl(fov_y_radians, aspect, z_near, z_far),
            view: Mat4::IDENTITY,
        }
    }

    /// Orthographic camera with the given half-extents
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self {
            projection: Mat4::orthographic_rh_gl(left, right, bottom, top, z_near, z_far),
            view: Mat4::IDENTITY,
        }
    }

    /// Combined projection * view matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self { projection: Mat4::IDENTITY, view: Mat4::IDENTITY }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
