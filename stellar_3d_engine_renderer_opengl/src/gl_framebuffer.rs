//! Framebuffer - OpenGL implementation of the Framebuffer trait
//!
//! Lifecycle: construction invalidates (allocates the FBO and every
//! attachment), `rebuild` builds a fresh set at the new size and only then
//! releases the old one, and Drop releases everything through the same
//! teardown path. Incompleteness after invalidation is fatal.
//!
//! When the construction descriptor asks for several depth textures they are
//! all allocated and bound to the single depth-stencil slot in order, so the
//! last one is the live attachment. Texture depth attachments take
//! precedence over a renderbuffer spec.

use std::sync::Mutex;

use glow::HasContext;
use stellar_3d_engine::stellar3d::render::{
    resolve_attachment_index, AttachmentId, DepthAttachment, Framebuffer, FramebufferDesc,
    FramebufferSpecification,
};
use stellar_3d_engine::stellar3d::Result;
use stellar_3d_engine::{engine_bail, engine_err, engine_trace};

use crate::gl_context::GlContext;
use crate::gl_format::color_format_to_gl;
use crate::gl_renderbuffer::GlRenderbuffer;

const LOG_SOURCE: &str = "stellar3d::gl::Framebuffer";

struct Inner {
    spec: FramebufferSpecification,
    fbo: glow::Framebuffer,
    colors: Vec<glow::Texture>,
    depth: DepthAttachment<glow::Texture, GlRenderbuffer>,
    active_color: usize,
}

/// OpenGL framebuffer with color texture, depth texture and renderbuffer
/// attachment paths
pub struct GlFramebuffer {
    gl: GlContext,
    desc: FramebufferDesc,
    inner: Mutex<Inner>,
}

impl GlFramebuffer {
    pub fn new(gl: GlContext, desc: FramebufferDesc) -> Result<Self> {
        let inner = Self::invalidate(&gl, &desc, desc.spec)?;
        Ok(Self { gl, desc, inner: Mutex::new(inner) })
    }

    /// Allocate the FBO and every attachment the descriptor names
    fn invalidate(
        gl: &GlContext,
        desc: &FramebufferDesc,
        spec: FramebufferSpecification,
    ) -> Result<Inner> {
        let spec = spec.sanitized();

        unsafe {
            let fbo = gl
                .create_framebuffer()
                .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create framebuffer: {}", e))?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));

            let mut inner = Inner {
                spec,
                fbo,
                colors: Vec::with_capacity(desc.color_attachments as usize),
                depth: DepthAttachment::None,
                active_color: 0,
            };

            for i in 0..desc.color_attachments {
                let texture = match Self::create_color_texture(gl, spec) {
                    Ok(texture) => texture,
                    Err(e) => {
                        Self::release(gl, &mut inner);
                        return Err(e);
                    }
                };
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0 + i,
                    glow::TEXTURE_2D,
                    Some(texture),
                    0,
                );
                inner.colors.push(texture);
            }

            if desc.depth_attachments > 0 {
                let mut textures = Vec::with_capacity(desc.depth_attachments as usize);
                for _ in 0..desc.depth_attachments {
                    let texture = match Self::create_depth_texture(gl, spec) {
                        Ok(texture) => texture,
                        Err(e) => {
                            inner.depth = DepthAttachment::Textures(textures);
                            Self::release(gl, &mut inner);
                            return Err(e);
                        }
                    };
                    // Each bind overwrites the slot; the last texture stays live
                    gl.framebuffer_texture_2d(
                        glow::FRAMEBUFFER,
                        glow::DEPTH_STENCIL_ATTACHMENT,
                        glow::TEXTURE_2D,
                        Some(texture),
                        0,
                    );
                    textures.push(texture);
                }
                inner.depth = DepthAttachment::Textures(textures);
            } else if let Some(rb_spec) = desc.renderbuffer {
                let renderbuffer = match GlRenderbuffer::new(gl.clone(), rb_spec) {
                    Ok(renderbuffer) => renderbuffer,
                    Err(e) => {
                        Self::release(gl, &mut inner);
                        return Err(e);
                    }
                };
                renderbuffer.attach();
                inner.depth = DepthAttachment::Renderbuffer(renderbuffer);
            }

            if inner.colors.is_empty() {
                gl.draw_buffers(&[glow::NONE]);
                gl.read_buffer(glow::NONE);
            } else {
                gl.draw_buffers(&[glow::COLOR_ATTACHMENT0]);
            }

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            if status != glow::FRAMEBUFFER_COMPLETE {
                Self::release(gl, &mut inner);
                engine_bail!(
                    LOG_SOURCE,
                    "Framebuffer incomplete after invalidation (status {:#06x})",
                    status
                );
            }

            engine_trace!(
                LOG_SOURCE,
                "Framebuffer invalidated: {}x{}, {} color attachment(s)",
                spec.width,
                spec.height,
                desc.color_attachments
            );
            Ok(inner)
        }
    }

    unsafe fn create_color_texture(
        gl: &glow::Context,
        spec: FramebufferSpecification,
    ) -> Result<glow::Texture> {
        let texture = gl
            .create_texture()
            .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create color attachment: {}", e))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            color_format_to_gl(spec.color_format),
            spec.width as i32,
            spec.height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            None,
        );
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }

    unsafe fn create_depth_texture(
        gl: &glow::Context,
        spec: FramebufferSpecification,
    ) -> Result<glow::Texture> {
        let texture = gl
            .create_texture()
            .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create depth attachment: {}", e))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::DEPTH24_STENCIL8 as i32,
            spec.width as i32,
            spec.height as i32,
            0,
            glow::DEPTH_STENCIL,
            glow::UNSIGNED_INT_24_8,
            None,
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }

    /// Single teardown path shared by rebuild and Drop
    fn release(gl: &glow::Context, inner: &mut Inner) {
        unsafe {
            for texture in inner.colors.drain(..) {
                gl.delete_texture(texture);
            }
            match std::mem::replace(&mut inner.depth, DepthAttachment::None) {
                DepthAttachment::Textures(textures) => {
                    for texture in textures {
                        gl.delete_texture(texture);
                    }
                }
                // Dropping the renderbuffer deletes its GL object
                DepthAttachment::Renderbuffer(_) | DepthAttachment::None => {}
            }
            gl.delete_framebuffer(inner.fbo);
        }
    }
}

impl Framebuffer for GlFramebuffer {
    fn bind(&self) {
        let inner = self.inner.lock().unwrap();
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(inner.fbo));
            self.gl
                .viewport(0, 0, inner.spec.width as i32, inner.spec.height as i32);
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    fn specification(&self) -> FramebufferSpecification {
        self.inner.lock().unwrap().spec
    }

    fn rebuild(&self, spec: FramebufferSpecification) -> Result<()> {
        // Build the replacement first so a failed rebuild keeps the old target
        let mut fresh = Self::invalidate(&self.gl, &self.desc, spec)?;
        let mut inner = self.inner.lock().unwrap();
        std::mem::swap(&mut *inner, &mut fresh);
        Self::release(&self.gl, &mut fresh);
        Ok(())
    }

    fn color_attachment_count(&self) -> usize {
        self.inner.lock().unwrap().colors.len()
    }

    fn color_attachment(&self, index: usize) -> AttachmentId {
        let inner = self.inner.lock().unwrap();
        match resolve_attachment_index(inner.colors.len(), index) {
            Some(i) => inner.colors[i].0.get() as u64,
            None => 0,
        }
    }

    fn depth_attachment_id(&self, index: usize) -> AttachmentId {
        let inner = self.inner.lock().unwrap();
        match &inner.depth {
            DepthAttachment::Textures(textures) => {
                match resolve_attachment_index(textures.len(), index) {
                    Some(i) => textures[i].0.get() as u64,
                    None => 0,
                }
            }
            _ => 0,
        }
    }

    fn active_color_attachment(&self) -> usize {
        self.inner.lock().unwrap().active_color
    }

    fn draw_to_next(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.colors.is_empty() {
            return;
        }
        inner.active_color = (inner.active_color + 1) % inner.colors.len();
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(inner.fbo));
            self.gl
                .draw_buffers(&[glow::COLOR_ATTACHMENT0 + inner.active_color as u32]);
        }
    }
}

impl Drop for GlFramebuffer {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        Self::release(&self.gl, &mut inner);
    }
}
