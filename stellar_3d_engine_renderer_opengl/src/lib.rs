/*!
# Stellar 3D Engine - OpenGL Renderer Backend

OpenGL implementation of the Stellar 3D rendering engine.

This crate provides an OpenGL 3.3+ backend that implements the
stellar_3d_engine traits using the glow library for GL bindings. The backend
is constructed from a loader function (GLFW, SDL, winit + glutin, ...) and
injected into a `RenderContext`:

```no_run
use stellar_3d_engine::RenderContext;
use stellar_3d_engine_renderer_opengl::{OpenGlDevice, OpenGlDeviceConfig};
use std::sync::Arc;

# fn get_proc_address(_: &str) -> *const std::ffi::c_void { std::ptr::null() }
let device = unsafe {
    OpenGlDevice::from_loader_function(OpenGlDeviceConfig::default(), |s| get_proc_address(s))
};
let context = RenderContext::new(Arc::new(device));
```
*/

// OpenGL implementation modules
mod gl_buffer;
mod gl_context;
mod gl_device;
mod gl_format;
mod gl_framebuffer;
mod gl_renderbuffer;
mod gl_shader;
mod gl_texture;

#[cfg(feature = "gl-debug")]
mod gl_debug;

pub use gl_buffer::{GlIndexBuffer, GlVertexBuffer};
pub use gl_device::{OpenGlDevice, OpenGlDeviceConfig};
pub use gl_framebuffer::GlFramebuffer;
pub use gl_shader::GlShader;
pub use gl_texture::{GlTexture2D, GlTextureCube};
