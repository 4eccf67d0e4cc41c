//! Unit tests for the resource descriptor

use crate::resource::{ResourceDescriptor, ResourceType};
use std::path::Path;

// ============================================================================
// TYPE GUESSING
// ============================================================================

#[test]
fn test_guess_texture_extensions() {
    for ext in ["png", "jpg", "jpeg", "bmp", "tga", "hdr"] {
        let path = format!("assets/diffuse.{}", ext);
        assert_eq!(
            ResourceType::guess_from_path(Path::new(&path)),
            ResourceType::Texture,
            "extension {}",
            ext
        );
    }
}

#[test]
fn test_guess_shader_extensions() {
    for ext in ["glsl", "vert", "frag", "shader"] {
        let path = format!("shaders/lit.{}", ext);
        assert_eq!(
            ResourceType::guess_from_path(Path::new(&path)),
            ResourceType::Shader,
            "extension {}",
            ext
        );
    }
}

#[test]
fn test_guess_model_extensions() {
    for ext in ["obj", "fbx", "gltf", "glb", "dae"] {
        let path = format!("models/ship.{}", ext);
        assert_eq!(
            ResourceType::guess_from_path(Path::new(&path)),
            ResourceType::Model,
            "extension {}",
            ext
        );
    }
}

#[test]
fn test_guess_is_case_insensitive() {
    assert_eq!(ResourceType::guess_from_path(Path::new("a.PNG")), ResourceType::Texture);
    assert_eq!(ResourceType::guess_from_path(Path::new("a.Glsl")), ResourceType::Shader);
}

#[test]
fn test_guess_unknown_extension() {
    assert_eq!(ResourceType::guess_from_path(Path::new("a.txt")), ResourceType::Unknown);
    assert_eq!(ResourceType::guess_from_path(Path::new("no_extension")), ResourceType::Unknown);
}

// ============================================================================
// DESCRIPTOR TESTS
// ============================================================================

#[test]
fn test_descriptor_new_guesses_type() {
    let desc = ResourceDescriptor::new("assets/hull.png");
    assert_eq!(desc.resource_type, ResourceType::Texture);
    assert_eq!(desc.path, Path::new("assets/hull.png"));
}

#[test]
fn test_display_name_is_file_stem() {
    assert_eq!(ResourceDescriptor::new("shaders/lit.vert").display_name(), "lit");
    assert_eq!(ResourceDescriptor::new("archive.tar.gz").display_name(), "archive.tar");
}
