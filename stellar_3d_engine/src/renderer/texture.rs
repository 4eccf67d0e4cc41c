//! Texture resource trait and descriptors.
//!
//! Image decoding lives in the resource layer (`resource::registry`); the
//! types here describe already-decoded pixel payloads handed to a backend.

use crate::error::Result;
use crate::{engine_bail, engine_err};

/// Pixel format, derived from the decoded channel count
/// (4 -> Rgba, 3 -> Rgb, anything else -> Red)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba,
    Rgb,
    Red,
}

impl TextureFormat {
    /// Map a decoded channel count to the format pair convention
    pub fn from_channels(channels: u8) -> Self {
        match channels {
            4 => TextureFormat::Rgba,
            3 => TextureFormat::Rgb,
            _ => TextureFormat::Red,
        }
    }

    /// Bytes per pixel
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            TextureFormat::Rgba => 4,
            TextureFormat::Rgb => 3,
            TextureFormat::Red => 1,
        }
    }
}

/// Dimensionality of a texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Texture2D,
    Cubemap,
}

/// Descriptor for creating a 2D texture
#[derive(Debug, Clone)]
pub struct Texture2DDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Raw pixels, row-major; None allocates storage without upload
    pub data: Option<Vec<u8>>,
    /// Mipmaps are generated automatically after upload when true
    pub generate_mipmaps: bool,
}

impl Texture2DDesc {
    /// Validate payload size against dimensions and format
    pub fn validate(&self) -> Result<()> {
        let expected = byte_len(self.width, self.height, self.format)?;
        if let Some(data) = &self.data {
            if data.len() != expected {
                engine_bail!(
                    "stellar3d::Texture",
                    "Texture payload is {} bytes, expected {} ({}x{} {:?})",
                    data.len(),
                    expected,
                    self.width,
                    self.height,
                    self.format
                );
            }
        }
        Ok(())
    }
}

// Dimensions are caller-supplied, so the product is computed checked rather
// than trusted not to wrap.
fn byte_len(width: u32, height: u32, format: TextureFormat) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(format.bytes_per_pixel() as usize))
        .ok_or_else(|| {
            engine_err!(
                "stellar3d::Texture",
                "Texture dimensions {}x{} {:?} overflow the byte size",
                width,
                height,
                format
            )
        })
}

/// Descriptor for creating a cubemap from six decoded faces
///
/// Face order: +X, -X, +Y, -Y, +Z, -Z. All six faces must be present and
/// share dimensions/format; the resource layer enforces that every face
/// decoded successfully before this descriptor exists.
#[derive(Debug, Clone)]
pub struct TextureCubeDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub faces: [Vec<u8>; 6],
    pub generate_mipmaps: bool,
}

impl TextureCubeDesc {
    /// Validate every face payload against dimensions and format
    pub fn validate(&self) -> Result<()> {
        let expected = byte_len(self.width, self.height, self.format)?;
        for (i, face) in self.faces.iter().enumerate() {
            if face.len() != expected {
                engine_bail!(
                    "stellar3d::Texture",
                    "Cubemap face {} payload is {} bytes, expected {}",
                    i,
                    face.len(),
                    expected
                );
            }
        }
        Ok(())
    }
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types. The GPU handle is
/// released when the last reference drops.
pub trait Texture: Send + Sync {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Pixel format
    fn format(&self) -> TextureFormat;

    /// 2D or cubemap
    fn kind(&self) -> TextureKind;

    /// Opaque GPU handle for display/debug purposes (0 = invalid)
    fn handle(&self) -> u64;

    /// Bind to the given texture unit
    fn bind(&self, slot: u32);

    /// Unbind from the given texture unit
    fn unbind(&self, slot: u32);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
