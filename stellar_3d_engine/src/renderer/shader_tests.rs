//! Unit tests for the shader module
//!
//! Tests the combined-source `#type` preprocessor and stage-pair builders.

use crate::renderer::ShaderSource;

// ============================================================================
// STAGE PAIR TESTS
// ============================================================================

#[test]
fn test_from_stages() {
    let source = ShaderSource::from_stages("void main() { v(); }", "void main() { f(); }");
    assert!(source.vertex.contains("v()"));
    assert!(source.fragment.contains("f()"));
}

// ============================================================================
// COMBINED SOURCE TESTS
// ============================================================================

#[test]
fn test_from_combined_splits_stages() {
    let combined = "\
#type vertex
#version 330 core
void main() { gl_Position = vec4(0.0); }
#type fragment
#version 330 core
out vec4 color;
void main() { color = vec4(1.0); }
";
    let source = ShaderSource::from_combined(combined).unwrap();
    assert!(source.vertex.contains("gl_Position"));
    assert!(!source.vertex.contains("out vec4 color"));
    assert!(source.fragment.contains("out vec4 color"));
    assert!(!source.fragment.contains("gl_Position"));
}

#[test]
fn test_from_combined_accepts_pixel_alias() {
    let combined = "#type vertex\nA\n#type pixel\nB\n";
    let source = ShaderSource::from_combined(combined).unwrap();
    assert!(source.vertex.contains('A'));
    assert!(source.fragment.contains('B'));
}

#[test]
fn test_from_combined_fragment_first() {
    // Stage order in the file does not matter
    let combined = "#type fragment\nF\n#type vertex\nV\n";
    let source = ShaderSource::from_combined(combined).unwrap();
    assert!(source.vertex.contains('V'));
    assert!(source.fragment.contains('F'));
}

#[test]
fn test_from_combined_handles_crlf() {
    let combined = "#type vertex\r\nV\r\n#type fragment\r\nF\r\n";
    let source = ShaderSource::from_combined(combined).unwrap();
    assert!(source.vertex.contains('V'));
    assert!(source.fragment.contains('F'));
}

#[test]
fn test_from_combined_unknown_stage_is_fatal() {
    let combined = "#type vertex\nV\n#type geometry\nG\n#type fragment\nF\n";
    assert!(ShaderSource::from_combined(combined).is_err());
}

#[test]
fn test_from_combined_missing_vertex_is_fatal() {
    assert!(ShaderSource::from_combined("#type fragment\nF\n").is_err());
}

#[test]
fn test_from_combined_missing_fragment_is_fatal() {
    assert!(ShaderSource::from_combined("#type vertex\nV\n").is_err());
}

#[test]
fn test_from_combined_empty_source_is_fatal() {
    assert!(ShaderSource::from_combined("").is_err());
}
