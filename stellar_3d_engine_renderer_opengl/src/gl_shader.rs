//! Shader - OpenGL implementation of the Shader trait
//!
//! Compile and link failures are fatal and carry the driver info log.
//! Uniform setters auto-bind the program and silently skip names the linker
//! optimized away or that the shader variant never declared.

use std::sync::atomic::{AtomicBool, Ordering};

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;
use stellar_3d_engine::engine_error;
use stellar_3d_engine::stellar3d::render::{Shader, ShaderDesc};
use stellar_3d_engine::stellar3d::{Error, Result};

use crate::gl_context::GlContext;

const LOG_SOURCE: &str = "stellar3d::gl::Shader";

/// OpenGL shader program
pub struct GlShader {
    gl: GlContext,
    program: glow::Program,
    name: String,
    bound: AtomicBool,
}

impl GlShader {
    pub fn new(gl: GlContext, desc: ShaderDesc) -> Result<Self> {
        unsafe {
            let vertex = Self::compile_stage(&gl, &desc.name, glow::VERTEX_SHADER, &desc.source.vertex)?;
            let fragment =
                match Self::compile_stage(&gl, &desc.name, glow::FRAGMENT_SHADER, &desc.source.fragment) {
                    Ok(fragment) => fragment,
                    Err(e) => {
                        gl.delete_shader(vertex);
                        return Err(e);
                    }
                };

            let program = match gl.create_program() {
                Ok(program) => program,
                Err(e) => {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                    engine_error!(LOG_SOURCE, "Failed to create program '{}': {}", desc.name, e);
                    return Err(Error::ShaderCompileFailed(e));
                }
            };
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            // Stage objects are no longer needed once link status is known
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                engine_error!(LOG_SOURCE, "Failed to link shader '{}': {}", desc.name, log);
                return Err(Error::ShaderCompileFailed(format!("link '{}': {}", desc.name, log)));
            }

            Ok(Self { gl, program, name: desc.name, bound: AtomicBool::new(false) })
        }
    }

    unsafe fn compile_stage(
        gl: &glow::Context,
        name: &str,
        stage: u32,
        source: &str,
    ) -> Result<glow::Shader> {
        let stage_name = if stage == glow::VERTEX_SHADER { "vertex" } else { "fragment" };
        let shader = gl.create_shader(stage).map_err(|e| {
            engine_error!(LOG_SOURCE, "Failed to create {} stage for '{}': {}", stage_name, name, e);
            Error::ShaderCompileFailed(e)
        })?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            engine_error!(
                LOG_SOURCE,
                "Failed to compile {} stage of '{}': {}",
                stage_name,
                name,
                log
            );
            return Err(Error::ShaderCompileFailed(format!(
                "{} stage of '{}': {}",
                stage_name, name, log
            )));
        }
        Ok(shader)
    }

    /// Bind the program if this object does not believe it is bound
    fn ensure_bound(&self) {
        if !self.bound.load(Ordering::Relaxed) {
            self.bind();
        }
    }

    /// Location lookup; None means the uniform is absent in this variant
    fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(self.program, name) }
    }
}

impl Shader for GlShader {
    fn bind(&self) {
        unsafe {
            self.gl.use_program(Some(self.program));
        }
        self.bound.store(true, Ordering::Relaxed);
    }

    fn unbind(&self) {
        unsafe {
            self.gl.use_program(None);
        }
        self.bound.store(false, Ordering::Relaxed);
    }

    fn is_bound(&self) -> bool {
        self.bound.load(Ordering::Relaxed)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.set_int(name, value as i32);
    }

    fn set_int(&self, name: &str, value: i32) {
        self.ensure_bound();
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl.uniform_1_i32(Some(&location), value);
            }
        }
    }

    fn set_float(&self, name: &str, value: f32) {
        self.ensure_bound();
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl.uniform_1_f32(Some(&location), value);
            }
        }
    }

    fn set_vec2(&self, name: &str, value: Vec2) {
        self.ensure_bound();
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl.uniform_2_f32(Some(&location), value.x, value.y);
            }
        }
    }

    fn set_vec3(&self, name: &str, value: Vec3) {
        self.ensure_bound();
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl.uniform_3_f32(Some(&location), value.x, value.y, value.z);
            }
        }
    }

    fn set_vec4(&self, name: &str, value: Vec4) {
        self.ensure_bound();
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl
                    .uniform_4_f32(Some(&location), value.x, value.y, value.z, value.w);
            }
        }
    }

    fn set_mat3(&self, name: &str, value: &Mat3) {
        self.ensure_bound();
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl
                    .uniform_matrix_3_f32_slice(Some(&location), false, &value.to_cols_array());
            }
        }
    }

    fn set_mat4(&self, name: &str, value: &Mat4) {
        self.ensure_bound();
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl
                    .uniform_matrix_4_f32_slice(Some(&location), false, &value.to_cols_array());
            }
        }
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}
