//! RenderContext - the owner of a backend device and its resource registry.
//!
//! One context is created at startup with a concrete backend device and is
//! passed by reference wherever rendering or loading happens. There are no
//! global singletons; dropping the context releases every tracked resource.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine_info;
use crate::error::Result;
use crate::renderer::{GraphicsDevice, Shader, Texture};
use crate::resource::{Mesh, ResourceRegistry, ResourceStats};

const LOG_SOURCE: &str = "stellar3d::RenderContext";

/// Backend device + resource registry, injected everywhere by reference
pub struct RenderContext {
    device: Arc<dyn GraphicsDevice>,
    registry: ResourceRegistry,
}

impl RenderContext {
    /// Build a context around a backend device and create default textures
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Self {
        let mut registry = ResourceRegistry::new();
        registry.init_default_textures(device.as_ref());
        engine_info!(LOG_SOURCE, "Render context initialized ({:?} backend)", device.api());
        Self { device, registry }
    }

    pub fn device(&self) -> &Arc<dyn GraphicsDevice> {
        &self.device
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ResourceRegistry {
        &mut self.registry
    }

    // ===== LOADING CONVENIENCE =====

    /// Load (or reuse) a shader from separate vertex/fragment files
    pub fn load_shader(&mut self, vertex_path: &Path, fragment_path: &Path) -> Result<Arc<dyn Shader>> {
        self.registry.load_shader(self.device.as_ref(), vertex_path, fragment_path)
    }

    /// Load (or reuse) a shader from one combined `#type`-marked file
    pub fn load_shader_combined(&mut self, path: &Path) -> Result<Arc<dyn Shader>> {
        self.registry.load_shader_combined(self.device.as_ref(), path)
    }

    /// Load (or reuse) a 2D texture from an image file
    pub fn load_texture_2d(&mut self, path: &Path) -> Result<Arc<dyn Texture>> {
        self.registry.load_texture_2d(self.device.as_ref(), path)
    }

    /// Load (or reuse) a cubemap from six face image files
    pub fn load_texture_cube(&mut self, face_paths: &[PathBuf; 6]) -> Result<Arc<dyn Texture>> {
        self.registry.load_texture_cube(self.device.as_ref(), face_paths)
    }

    /// Fetch (or build and track) the mesh for a model path
    pub fn load_mesh_with<F>(&mut self, path: &Path, build: F) -> Result<Arc<Mesh>>
    where
        F: FnOnce(&dyn GraphicsDevice) -> Result<Mesh>,
    {
        let device = self.device.as_ref();
        self.registry.load_mesh_with(path, || build(device))
    }

    /// Load statistics since the last reset
    pub fn resource_stats(&self) -> ResourceStats {
        self.registry.stats()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
