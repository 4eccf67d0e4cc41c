//! Renderbuffer - write-only depth/stencil storage for framebuffers
//!
//! The attachment point is implied by the storage format, so a renderbuffer
//! can never be attached to the wrong slot.

use glow::HasContext;
use stellar_3d_engine::engine_err;
use stellar_3d_engine::stellar3d::render::RenderbufferSpecification;
use stellar_3d_engine::stellar3d::Result;

use crate::gl_context::GlContext;
use crate::gl_format::{attachment_point_to_gl, renderbuffer_format_to_gl};

const LOG_SOURCE: &str = "stellar3d::gl::Renderbuffer";

pub(crate) struct GlRenderbuffer {
    gl: GlContext,
    renderbuffer: glow::Renderbuffer,
    spec: RenderbufferSpecification,
}

impl GlRenderbuffer {
    pub(crate) fn new(gl: GlContext, spec: RenderbufferSpecification) -> Result<Self> {
        unsafe {
            let renderbuffer = gl
                .create_renderbuffer()
                .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create renderbuffer: {}", e))?;
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                renderbuffer_format_to_gl(spec.format),
                spec.width as i32,
                spec.height as i32,
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
            Ok(Self { gl, renderbuffer, spec })
        }
    }

    /// Attach to the currently bound framebuffer at the format's slot
    pub(crate) fn attach(&self) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                attachment_point_to_gl(self.spec.format.attachment_point()),
                glow::RENDERBUFFER,
                Some(self.renderbuffer),
            );
        }
    }
}

impl Drop for GlRenderbuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_renderbuffer(self.renderbuffer);
        }
    }
}
