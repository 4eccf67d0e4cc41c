//! Resource provenance descriptor.
//!
//! Identifies where a loaded resource came from, for deduplication and
//! editor display. The type is guessed from the file extension; an unknown
//! extension is `Unknown`, not an error.

use std::path::{Path, PathBuf};

/// Category of a file-backed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Texture,
    Shader,
    Model,
    Unknown,
}

impl ResourceType {
    /// Guess the resource type from a path's extension
    pub fn guess_from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return ResourceType::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "bmp" | "tga" | "hdr" => ResourceType::Texture,
            "glsl" | "vert" | "frag" | "shader" => ResourceType::Shader,
            "obj" | "fbx" | "gltf" | "glb" | "dae" => ResourceType::Model,
            _ => ResourceType::Unknown,
        }
    }
}

/// Provenance record carried by loaded resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Path as supplied by the caller
    pub path: PathBuf,
    /// Guessed category
    pub resource_type: ResourceType,
}

impl ResourceDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let resource_type = ResourceType::guess_from_path(&path);
        Self { path, resource_type }
    }

    /// File stem used as a display name, or "unnamed" when absent
    pub fn display_name(&self) -> &str {
        self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
