//! Shader resource trait, stage sources and the `#type` preprocessor.
//!
//! Shaders are built from a vertex + fragment stage pair, supplied either as
//! two files or as one combined file split on `#type vertex` /
//! `#type fragment` markers. Stage compile or program link failure is fatal
//! (an `Err` the caller propagates); a missing uniform name in a setter is a
//! silent no-op because uniform presence depends on the shader variant.

use crate::engine_bail;
use crate::error::Result;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

// ============================================================================
// Stage sources and preprocessing
// ============================================================================

/// Preprocessed GLSL stage pair
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Build from separate per-stage sources
    pub fn from_stages(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self { vertex: vertex.into(), fragment: fragment.into() }
    }

    /// Split a combined source on `#type <name>` markers
    ///
    /// Recognized names are `vertex` and `fragment`/`pixel`; anything else is
    /// fatal. Both stages must be present.
    pub fn from_combined(source: &str) -> Result<Self> {
        const TYPE_TOKEN: &str = "#type";

        let mut vertex: Option<String> = None;
        let mut fragment: Option<String> = None;

        let mut search_from = 0usize;
        while let Some(rel) = source[search_from..].find(TYPE_TOKEN) {
            let marker_pos = search_from + rel;
            let after_token = marker_pos + TYPE_TOKEN.len();
            let line_end = source[after_token..]
                .find(['\r', '\n'])
                .map(|i| after_token + i)
                .unwrap_or(source.len());
            let stage_name = source[after_token..line_end].trim();

            let body_start = source[line_end..]
                .find(|c| c != '\r' && c != '\n')
                .map(|i| line_end + i)
                .unwrap_or(source.len());
            let body_end = source[body_start..]
                .find(TYPE_TOKEN)
                .map(|i| body_start + i)
                .unwrap_or(source.len());
            let body = source[body_start..body_end].to_string();

            match stage_name {
                "vertex" => vertex = Some(body),
                "fragment" | "pixel" => fragment = Some(body),
                other => {
                    engine_bail!(
                        "stellar3d::Shader",
                        "Unknown shader stage '#type {}' in combined source",
                        other
                    );
                }
            }
            search_from = body_end;
        }

        match (vertex, fragment) {
            (Some(vertex), Some(fragment)) => Ok(Self { vertex, fragment }),
            (None, _) => {
                engine_bail!("stellar3d::Shader", "Combined source is missing a '#type vertex' stage")
            }
            (_, None) => {
                engine_bail!("stellar3d::Shader", "Combined source is missing a '#type fragment' stage")
            }
        }
    }
}

/// Descriptor for creating a shader program
#[derive(Debug, Clone)]
pub struct ShaderDesc {
    /// Display name used in logs (usually derived from the source path)
    pub name: String,
    /// Preprocessed stage sources
    pub source: ShaderSource,
}

// ============================================================================
// Shader trait
// ============================================================================

/// Compiled shader program trait
///
/// Uniform setters auto-bind the program when it is not the one currently
/// bound, a convenience carried over from the original engine, with the
/// same side effect of changing the global GPU bind state. Setting a uniform
/// that does not exist in the program is silently skipped.
pub trait Shader: Send + Sync {
    /// Bind the program
    fn bind(&self);

    /// Unbind the program
    fn unbind(&self);

    /// Whether this object believes it is the bound program
    fn is_bound(&self) -> bool;

    /// Display name
    fn name(&self) -> &str;

    fn set_bool(&self, name: &str, value: bool);
    fn set_int(&self, name: &str, value: i32);
    fn set_float(&self, name: &str, value: f32);
    fn set_vec2(&self, name: &str, value: Vec2);
    fn set_vec3(&self, name: &str, value: Vec3);
    fn set_vec4(&self, name: &str, value: Vec4);
    fn set_mat3(&self, name: &str, value: &Mat3);
    fn set_mat4(&self, name: &str, value: &Mat4);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
