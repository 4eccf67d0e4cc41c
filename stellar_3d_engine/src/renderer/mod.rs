//! Renderer module - all rendering-related traits and types
//!
//! Everything here is backend-agnostic: traits describe the contract a
//! concrete backend (e.g. the OpenGL renderer crate) implements, and the
//! plain types (layouts, specifications, formats) are shared vocabulary.

// Module declarations
pub mod buffer;
pub mod device;
pub mod framebuffer;
pub mod mock_device;
pub mod shader;
pub mod texture;

// Re-export everything at the module root
pub use buffer::*;
pub use device::*;
pub use framebuffer::*;
pub use shader::*;
pub use texture::*;
