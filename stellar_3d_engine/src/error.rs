//! Error types for the Stellar3D engine
//!
//! This module defines the error types used throughout the engine, plus the
//! `engine_err!`/`engine_bail!` macros that log an error at its point of
//! detection before handing it to the caller.
//!
//! Errors here are the engine's *fatal* tier: a `Result::Err` means the
//! current frame (or resource load) cannot continue and should propagate to
//! the top of the render loop. Degraded conditions (clamped dimensions,
//! dropped excess lights, missing uniforms) never produce an `Err`; they log
//! a warning and continue with a safe substitute.

use std::fmt;

/// Result type for Stellar3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stellar3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, future backends)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, texture, shader, framebuffer)
    InvalidResource(String),

    /// Initialization failed (context, device, subsystems)
    InitializationFailed(String),

    /// A file-backed resource could not be read or decoded
    ResourceLoadFailed(String),

    /// Shader stage compilation or program link failed
    ShaderCompileFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ResourceLoadFailed(msg) => write!(f, "Resource load failed: {}", msg),
            Error::ShaderCompileFailed(msg) => write!(f, "Shader compile failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build a logged `Error::BackendError` from a format string.
///
/// Logs the message at ERROR severity (with file:line) and evaluates to the
/// error value, for use with `ok_or_else`/`map_err` chains.
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::dispatch_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::error::Error::BackendError(message)
    }};
}

/// Log an error and return it from the current function.
///
/// The `Result`-returning sibling of `engine_err!`.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
