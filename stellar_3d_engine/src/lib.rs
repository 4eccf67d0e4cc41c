/*!
# Stellar 3D Engine

Core traits and types for the Stellar 3D render-resource and submission
pipeline.

This crate provides the platform-agnostic API for GPU resources and draw
dispatch using trait-based dynamic polymorphism. Backend implementations
(OpenGL today, others later) provide concrete types behind these traits and
are injected into a [`RenderContext`] at startup.

## Architecture

- **GraphicsDevice**: factory + command trait implemented by each backend
- **VertexBuffer / IndexBuffer**: GPU buffer traits with layout descriptions
- **Framebuffer**: render-target trait with invalidate/rebuild lifecycle
- **Texture / Shader**: GPU resource traits with uniform-setting
- **ResourceRegistry**: path-keyed deduplicating ledger of loaded resources
- **SceneRenderer**: per-frame submission pipeline (meshes, terrain, skybox,
  debug colliders)

There are no global singletons: a [`RenderContext`] owns the device and the
registry and is passed by reference to everything that needs them.
*/

// Internal modules
pub mod error;
pub mod log;
mod context;
pub mod renderer;
pub mod resource;
pub mod scene;

// Main stellar3d namespace module
pub mod stellar3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Render context (device + registry, no globals)
    pub use crate::context::RenderContext;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Flat re-exports for the common path
pub use context::RenderContext;
pub use error::{Error, Result};

// Re-export math library at crate root
pub use glam;
