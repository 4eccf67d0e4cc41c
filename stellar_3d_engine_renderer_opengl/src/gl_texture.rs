//! Textures - OpenGL implementation of the Texture trait
//!
//! Rows of RGB and single-channel pixels are not 4-byte aligned, so the
//! unpack alignment is dropped to 1 around those uploads and restored after.

use glow::HasContext;
use stellar_3d_engine::engine_err;
use stellar_3d_engine::stellar3d::render::{
    Texture, Texture2DDesc, TextureCubeDesc, TextureFormat, TextureKind,
};
use stellar_3d_engine::stellar3d::Result;

use crate::gl_context::GlContext;
use crate::gl_format::texture_format_to_gl;

const LOG_SOURCE: &str = "stellar3d::gl::Texture";

unsafe fn with_tight_unpack<F: FnOnce()>(gl: &glow::Context, format: TextureFormat, upload: F) {
    let tight = format != TextureFormat::Rgba;
    if tight {
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
    }
    upload();
    if tight {
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
    }
}

// ============================================================================
// 2D texture
// ============================================================================

/// OpenGL 2D texture
pub struct GlTexture2D {
    gl: GlContext,
    texture: glow::Texture,
    width: u32,
    height: u32,
    format: TextureFormat,
}

impl GlTexture2D {
    pub fn new(gl: GlContext, desc: Texture2DDesc) -> Result<Self> {
        desc.validate()?;
        let (internal_format, upload_format) = texture_format_to_gl(desc.format);

        unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create texture: {}", e))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            with_tight_unpack(&gl, desc.format, || {
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    internal_format,
                    desc.width as i32,
                    desc.height as i32,
                    0,
                    upload_format,
                    glow::UNSIGNED_BYTE,
                    desc.data.as_deref(),
                );
            });

            let min_filter = if desc.generate_mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);

            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self { gl, texture, width: desc.width, height: desc.height, format: desc.format })
        }
    }
}

impl Texture for GlTexture2D {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn kind(&self) -> TextureKind {
        TextureKind::Texture2D
    }

    fn handle(&self) -> u64 {
        self.texture.0.get() as u64
    }

    fn bind(&self, slot: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + slot);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

    fn unbind(&self, slot: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + slot);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }
}

impl Drop for GlTexture2D {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}

// ============================================================================
// Cubemap
// ============================================================================

/// OpenGL cubemap texture, faces in +X -X +Y -Y +Z -Z order
pub struct GlTextureCube {
    gl: GlContext,
    texture: glow::Texture,
    width: u32,
    height: u32,
    format: TextureFormat,
}

impl GlTextureCube {
    pub fn new(gl: GlContext, desc: TextureCubeDesc) -> Result<Self> {
        desc.validate()?;
        let (internal_format, upload_format) = texture_format_to_gl(desc.format);

        unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create cubemap: {}", e))?;
            gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(texture));

            with_tight_unpack(&gl, desc.format, || {
                for (i, face) in desc.faces.iter().enumerate() {
                    gl.tex_image_2d(
                        glow::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32,
                        0,
                        internal_format,
                        desc.width as i32,
                        desc.height as i32,
                        0,
                        upload_format,
                        glow::UNSIGNED_BYTE,
                        Some(face),
                    );
                }
            });

            let min_filter = if desc.generate_mipmaps {
                gl.generate_mipmap(glow::TEXTURE_CUBE_MAP);
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_MIN_FILTER,
                min_filter as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_CUBE_MAP,
                glow::TEXTURE_WRAP_R,
                glow::CLAMP_TO_EDGE as i32,
            );

            gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);

            Ok(Self { gl, texture, width: desc.width, height: desc.height, format: desc.format })
        }
    }
}

impl Texture for GlTextureCube {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn kind(&self) -> TextureKind {
        TextureKind::Cubemap
    }

    fn handle(&self) -> u64 {
        self.texture.0.get() as u64
    }

    fn bind(&self, slot: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + slot);
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(self.texture));
        }
    }

    fn unbind(&self, slot: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + slot);
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);
        }
    }
}

impl Drop for GlTextureCube {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}
