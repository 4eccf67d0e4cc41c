//! Scene module - cameras, lights and the submission pipeline

// Module declarations
pub mod camera;
pub mod light;
pub mod scene_renderer;

// Re-export everything at the module root
pub use camera::*;
pub use light::*;
pub use scene_renderer::*;
