//! GraphicsDevice trait - backend factory and render command interface
//!
//! This is the single contract a graphics backend implements: resource
//! factories returning shared trait objects, plus the stateless command set
//! the submission pipeline drives (clear, viewport, cull/depth/wireframe
//! state, draw calls). Backends are selected by constructing one and
//! injecting it into a `RenderContext`; adding a second backend never
//! touches call sites.

use std::sync::Arc;

use crate::error::Result;
use crate::renderer::{
    Framebuffer, FramebufferDesc, IndexBuffer, IndexBufferDesc, IndexType, Shader, ShaderDesc,
    Texture, Texture2DDesc, TextureCubeDesc, VertexBuffer, VertexBufferDesc,
};
use bitflags::bitflags;
use glam::Vec4;

// ============================================================================
// Command-state enums
// ============================================================================

/// Which backend implements the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendApi {
    OpenGl,
    /// Mock device used for tests and headless runs
    Mock,
}

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
    FrontAndBack,
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    Never,
    Less,
    LessEqual,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Always,
}

bitflags! {
    /// Buffers selected by a clear command
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Per-frame device statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceStats {
    /// GPU resources created since construction
    pub resources_created: u64,
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Backend contract: resource factories + stateless command dispatch
///
/// Commands translate one-to-one to graphics API calls; the device holds no
/// frame state of its own (the submission pipeline sequences state changes
/// around draws and restores what it changes).
pub trait GraphicsDevice: Send + Sync {
    // ----- resource factories -----

    /// Create a vertex buffer with its attribute layout
    fn create_vertex_buffer(&self, desc: VertexBufferDesc) -> Result<Arc<dyn VertexBuffer>>;

    /// Create an immutable index buffer
    fn create_index_buffer(&self, desc: IndexBufferDesc) -> Result<Arc<dyn IndexBuffer>>;

    /// Create and invalidate a framebuffer
    fn create_framebuffer(&self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Create a 2D texture from decoded pixels
    fn create_texture_2d(&self, desc: Texture2DDesc) -> Result<Arc<dyn Texture>>;

    /// Create a cubemap from six decoded faces
    fn create_texture_cube(&self, desc: TextureCubeDesc) -> Result<Arc<dyn Texture>>;

    /// Compile and link a shader program
    fn create_shader(&self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    // ----- render commands -----

    /// Set the color used by `clear`
    fn set_clear_color(&self, color: Vec4);

    /// Clear the selected buffers of the bound render target
    fn clear(&self, flags: ClearFlags);

    /// Set the viewport rectangle
    fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32);

    /// Set the face culling mode
    fn set_cull_mode(&self, mode: CullMode);

    /// Set the depth comparison function
    fn set_depth_func(&self, func: DepthFunc);

    /// Enable or disable depth writes
    fn set_depth_mask(&self, enabled: bool);

    /// Enable or disable wireframe rasterization
    fn set_wireframe(&self, enabled: bool);

    /// Draw indexed triangles from the bound vertex/index buffers
    fn draw_indexed(&self, index_count: u32, index_type: IndexType) -> Result<()>;

    /// Draw indexed lines from the bound vertex/index buffers
    fn draw_indexed_lines(&self, index_count: u32, index_type: IndexType) -> Result<()>;

    /// Draw non-indexed triangles from the bound vertex buffer
    fn draw_arrays(&self, first: u32, vertex_count: u32) -> Result<()>;

    /// Draw non-indexed lines from the bound vertex buffer
    fn draw_lines(&self, first: u32, vertex_count: u32) -> Result<()>;

    // ----- introspection -----

    /// Which backend this device is
    fn api(&self) -> BackendApi;

    /// Device statistics
    fn stats(&self) -> DeviceStats;
}
