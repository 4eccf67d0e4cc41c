//! Unit tests for error.rs
//!
//! Tests all Error variants (Display, Debug, Clone, std::error::Error) and
//! the engine_err!/engine_bail! macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("OpenGL context lost".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("OpenGL context lost"));
}

#[test]
fn test_out_of_memory_display() {
    let err = Error::OutOfMemory;
    assert_eq!(format!("{}", err), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("Framebuffer incomplete".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("Framebuffer incomplete"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("No GL loader".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("No GL loader"));
}

#[test]
fn test_resource_load_failed_display() {
    let err = Error::ResourceLoadFailed("missing.png".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Resource load failed"));
    assert!(display.contains("missing.png"));
}

#[test]
fn test_shader_compile_failed_display() {
    let err = Error::ShaderCompileFailed("syntax error at line 12".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Shader compile failed"));
    assert!(display.contains("line 12"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    assert!(format!("{:?}", Error::BackendError("x".to_string())).contains("BackendError"));
    assert!(format!("{:?}", Error::OutOfMemory).contains("OutOfMemory"));
    assert!(format!("{:?}", Error::InvalidResource("x".to_string())).contains("InvalidResource"));
    assert!(format!("{:?}", Error::ResourceLoadFailed("x".to_string()))
        .contains("ResourceLoadFailed"));
    assert!(format!("{:?}", Error::ShaderCompileFailed("x".to_string()))
        .contains("ShaderCompileFailed"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::ShaderCompileFailed("test".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// ERROR MACRO TESTS
// ============================================================================

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("stellar3d::test", "value was {}", 42);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "value was 42"),
        other => panic!("expected BackendError, got {:?}", other),
    }
}

#[test]
fn test_engine_bail_returns_early() {
    fn failing() -> Result<i32> {
        crate::engine_bail!("stellar3d::test", "bail with code {}", 7);
    }

    let result = failing();
    assert!(result.is_err());
    if let Err(Error::BackendError(msg)) = result {
        assert_eq!(msg, "bail with code 7");
    } else {
        panic!("expected BackendError");
    }
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::OutOfMemory)
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}
