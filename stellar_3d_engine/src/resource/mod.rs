//! Resource module - loaded-asset tracking and scene-facing resource types

// Module declarations
pub mod descriptor;
pub mod material;
pub mod mesh;
pub mod registry;

// Re-export everything at the module root
pub use descriptor::*;
pub use material::*;
pub use mesh::*;
pub use registry::*;
