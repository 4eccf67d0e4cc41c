//! OpenGL device - factory and command dispatch over a glow context
//!
//! The device is constructed from a loader function supplied by whatever
//! windowing layer owns the GL context. All commands translate one-to-one to
//! GL calls; the device keeps no frame state beyond a resource counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;
use stellar_3d_engine::stellar3d::render::{
    BackendApi, ClearFlags, CullMode, DepthFunc, DeviceStats, Framebuffer, FramebufferDesc,
    GraphicsDevice, IndexBuffer, IndexBufferDesc, IndexType, Shader, ShaderDesc, Texture,
    Texture2DDesc, TextureCubeDesc, VertexBuffer, VertexBufferDesc,
};
use stellar_3d_engine::stellar3d::Result;
use stellar_3d_engine::{engine_info, engine_warn};

use crate::gl_buffer::{GlIndexBuffer, GlVertexBuffer};
use crate::gl_context::GlContext;
use crate::gl_format::{clear_flags_to_gl, cull_mode_to_gl, depth_func_to_gl, index_type_to_gl};
use crate::gl_framebuffer::GlFramebuffer;
use crate::gl_shader::GlShader;
use crate::gl_texture::{GlTexture2D, GlTextureCube};

const LOG_SOURCE: &str = "stellar3d::gl::Device";

/// Startup options for the OpenGL device
#[derive(Debug, Clone, Copy)]
pub struct OpenGlDeviceConfig {
    /// Enable depth testing at startup (func Less)
    pub depth_test: bool,
    /// Enable seamless cubemap filtering (GL 3.2+)
    pub seamless_cubemap: bool,
}

impl Default for OpenGlDeviceConfig {
    fn default() -> Self {
        Self { depth_test: true, seamless_cubemap: true }
    }
}

/// OpenGL implementation of GraphicsDevice
pub struct OpenGlDevice {
    gl: GlContext,
    resources_created: AtomicU64,
}

impl OpenGlDevice {
    /// Build a device from a GL proc-address loader
    ///
    /// # Safety
    ///
    /// The GL context the loader belongs to must be current on this thread
    /// and outlive the device.
    pub unsafe fn from_loader_function<F>(config: OpenGlDeviceConfig, loader: F) -> Self
    where
        F: FnMut(&str) -> *const std::ffi::c_void,
    {
        let gl = glow::Context::from_loader_function(loader);
        Self::from_context(config, Arc::new(gl))
    }

    /// Build a device around an existing glow context
    pub fn from_context(config: OpenGlDeviceConfig, gl: Arc<glow::Context>) -> Self {
        let gl = GlContext::from_arc(gl);
        unsafe {
            let version = gl.get_parameter_string(glow::VERSION);
            let renderer = gl.get_parameter_string(glow::RENDERER);
            engine_info!(LOG_SOURCE, "OpenGL {} on {}", version, renderer);

            if config.depth_test {
                gl.enable(glow::DEPTH_TEST);
                gl.depth_func(glow::LESS);
            }
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::BACK);
            if config.seamless_cubemap {
                gl.enable(glow::TEXTURE_CUBE_MAP_SEAMLESS);
            }
        }

        #[cfg(feature = "gl-debug")]
        crate::gl_debug::install(&gl);

        Self { gl, resources_created: AtomicU64::new(0) }
    }

    fn count_resource(&self) {
        self.resources_created.fetch_add(1, Ordering::Relaxed);
    }
}

impl GraphicsDevice for OpenGlDevice {
    // ----- resource factories -----

    fn create_vertex_buffer(&self, desc: VertexBufferDesc) -> Result<Arc<dyn VertexBuffer>> {
        let buffer = GlVertexBuffer::new(self.gl.clone(), desc)?;
        self.count_resource();
        Ok(Arc::new(buffer))
    }

    fn create_index_buffer(&self, desc: IndexBufferDesc) -> Result<Arc<dyn IndexBuffer>> {
        let buffer = GlIndexBuffer::new(self.gl.clone(), desc)?;
        self.count_resource();
        Ok(Arc::new(buffer))
    }

    fn create_framebuffer(&self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        let framebuffer = GlFramebuffer::new(self.gl.clone(), desc)?;
        self.count_resource();
        Ok(Arc::new(framebuffer))
    }

    fn create_texture_2d(&self, desc: Texture2DDesc) -> Result<Arc<dyn Texture>> {
        let texture = GlTexture2D::new(self.gl.clone(), desc)?;
        self.count_resource();
        Ok(Arc::new(texture))
    }

    fn create_texture_cube(&self, desc: TextureCubeDesc) -> Result<Arc<dyn Texture>> {
        let texture = GlTextureCube::new(self.gl.clone(), desc)?;
        self.count_resource();
        Ok(Arc::new(texture))
    }

    fn create_shader(&self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        let shader = GlShader::new(self.gl.clone(), desc)?;
        self.count_resource();
        Ok(Arc::new(shader))
    }

    // ----- render commands -----

    fn set_clear_color(&self, color: Vec4) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
        }
    }

    fn clear(&self, flags: ClearFlags) {
        unsafe {
            self.gl.clear(clear_flags_to_gl(flags));
        }
    }

    fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(x as i32, y as i32, width as i32, height as i32);
        }
    }

    fn set_cull_mode(&self, mode: CullMode) {
        unsafe {
            match cull_mode_to_gl(mode) {
                Some(face) => {
                    self.gl.enable(glow::CULL_FACE);
                    self.gl.cull_face(face);
                }
                None => self.gl.disable(glow::CULL_FACE),
            }
        }
    }

    fn set_depth_func(&self, func: DepthFunc) {
        unsafe {
            self.gl.depth_func(depth_func_to_gl(func));
        }
    }

    fn set_depth_mask(&self, enabled: bool) {
        unsafe {
            self.gl.depth_mask(enabled);
        }
    }

    fn set_wireframe(&self, enabled: bool) {
        unsafe {
            let mode = if enabled { glow::LINE } else { glow::FILL };
            self.gl.polygon_mode(glow::FRONT_AND_BACK, mode);
        }
    }

    fn draw_indexed(&self, index_count: u32, index_type: IndexType) -> Result<()> {
        if index_count == 0 {
            engine_warn!(LOG_SOURCE, "draw_indexed called with zero indices");
            return Ok(());
        }
        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                index_count as i32,
                index_type_to_gl(index_type),
                0,
            );
        }
        Ok(())
    }

    fn draw_indexed_lines(&self, index_count: u32, index_type: IndexType) -> Result<()> {
        if index_count == 0 {
            engine_warn!(LOG_SOURCE, "draw_indexed_lines called with zero indices");
            return Ok(());
        }
        unsafe {
            self.gl.draw_elements(
                glow::LINES,
                index_count as i32,
                index_type_to_gl(index_type),
                0,
            );
        }
        Ok(())
    }

    fn draw_arrays(&self, first: u32, vertex_count: u32) -> Result<()> {
        if vertex_count == 0 {
            engine_warn!(LOG_SOURCE, "draw_arrays called with zero vertices");
            return Ok(());
        }
        unsafe {
            self.gl.draw_arrays(glow::TRIANGLES, first as i32, vertex_count as i32);
        }
        Ok(())
    }

    fn draw_lines(&self, first: u32, vertex_count: u32) -> Result<()> {
        if vertex_count == 0 {
            engine_warn!(LOG_SOURCE, "draw_lines called with zero vertices");
            return Ok(());
        }
        unsafe {
            self.gl.draw_arrays(glow::LINES, first as i32, vertex_count as i32);
        }
        Ok(())
    }

    // ----- introspection -----

    fn api(&self) -> BackendApi {
        BackendApi::OpenGl
    }

    fn stats(&self) -> DeviceStats {
        DeviceStats { resources_created: self.resources_created.load(Ordering::Relaxed) }
    }
}
