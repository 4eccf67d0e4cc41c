//! Deduplicating ledger of loaded shaders, textures and model meshes.
//!
//! The registry is the single source of truth for which GPU resources are
//! currently loaded, providing at-most-one-instance-per-path reuse: loading
//! the same path(s) again returns the existing `Arc` instead of re-reading
//! and re-uploading. Lookup is a linear scan; resource counts are tens, not
//! thousands, and loading happens at scene-construction time, never per
//! frame.
//!
//! The registry is owned by a `RenderContext`; dropping the context releases
//! every tracked resource. There is no individual unregistration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::renderer::{
    GraphicsDevice, Shader, ShaderDesc, ShaderSource, Texture, Texture2DDesc, TextureCubeDesc,
    TextureFormat, TextureKind,
};
use crate::resource::{Mesh, ResourceDescriptor};
use crate::{engine_err, engine_info, engine_warn};
use image::GenericImageView;

const LOG_SOURCE: &str = "stellar3d::ResourceRegistry";

// ============================================================================
// Ledger entries and statistics
// ============================================================================

struct LoadedShader {
    vertex_path: PathBuf,
    fragment_path: PathBuf,
    shader: Arc<dyn Shader>,
}

struct LoadedTexture {
    descriptor: ResourceDescriptor,
    texture: Arc<dyn Texture>,
}

struct LoadedMesh {
    descriptor: ResourceDescriptor,
    mesh: Arc<Mesh>,
}

/// Load statistics, resettable at will (e.g. once per frame)
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceStats {
    /// Shaders compiled (cache misses)
    pub shaders_loaded: u32,
    /// Textures uploaded (cache misses)
    pub textures_loaded: u32,
    /// Model meshes built (cache misses)
    pub meshes_loaded: u32,
    /// Requests served from the ledger
    pub cache_hits: u32,
}

// ============================================================================
// Registry
// ============================================================================

/// Process lifetime ledger of loaded GPU resources
pub struct ResourceRegistry {
    shaders: Vec<LoadedShader>,
    textures: Vec<LoadedTexture>,
    meshes: Vec<LoadedMesh>,
    white_texture: Option<Arc<dyn Texture>>,
    black_texture: Option<Arc<dyn Texture>>,
    missing_texture: Option<Arc<dyn Texture>>,
    stats: ResourceStats,
}

impl ResourceRegistry {
    /// Create an empty registry (default textures not yet created)
    pub fn new() -> Self {
        Self {
            shaders: Vec::new(),
            textures: Vec::new(),
            meshes: Vec::new(),
            white_texture: None,
            black_texture: None,
            missing_texture: None,
            stats: ResourceStats::default(),
        }
    }

    /// Eagerly create the white/black/missing fallback textures
    ///
    /// Degraded tier: a failure leaves the corresponding slot empty and logs
    /// a warning. Visuals degrade, the engine continues.
    pub fn init_default_textures(&mut self, device: &dyn GraphicsDevice) {
        self.white_texture = Self::create_default(device, "white", vec![255, 255, 255, 255], 1);
        self.black_texture = Self::create_default(device, "black", vec![0, 0, 0, 255], 1);
        // 2x2 magenta/black checkerboard
        let missing = vec![
            255, 0, 255, 255, 0, 0, 0, 255, //
            0, 0, 0, 255, 255, 0, 255, 255, //
        ];
        self.missing_texture = Self::create_default(device, "missing", missing, 2);
    }

    fn create_default(
        device: &dyn GraphicsDevice,
        name: &str,
        pixels: Vec<u8>,
        side: u32,
    ) -> Option<Arc<dyn Texture>> {
        let desc = Texture2DDesc {
            width: side,
            height: side,
            format: TextureFormat::Rgba,
            data: Some(pixels),
            generate_mipmaps: false,
        };
        match device.create_texture_2d(desc) {
            Ok(texture) => Some(texture),
            Err(e) => {
                engine_warn!(LOG_SOURCE, "Could not create default '{}' texture: {}", name, e);
                None
            }
        }
    }

    // ===== SHADERS =====

    /// Load (or reuse) a shader from separate vertex/fragment files
    ///
    /// Deduplicated by the exact `(vertex_path, fragment_path)` pair; swapped
    /// or different paths build a distinct program.
    pub fn load_shader(
        &mut self,
        device: &dyn GraphicsDevice,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Arc<dyn Shader>> {
        if let Some(existing) = self.find_shader(vertex_path, fragment_path) {
            self.stats.cache_hits += 1;
            return Ok(existing);
        }

        let vertex = read_source(vertex_path)?;
        let fragment = read_source(fragment_path)?;
        let source = ShaderSource::from_stages(vertex, fragment);
        let name = ResourceDescriptor::new(vertex_path).display_name().to_string();

        let shader = device.create_shader(ShaderDesc { name, source })?;
        self.shaders.push(LoadedShader {
            vertex_path: vertex_path.to_path_buf(),
            fragment_path: fragment_path.to_path_buf(),
            shader: shader.clone(),
        });
        self.stats.shaders_loaded += 1;
        engine_info!(LOG_SOURCE, "Loaded shader '{}'", vertex_path.display());
        Ok(shader)
    }

    /// Load (or reuse) a shader from one combined `#type`-marked file
    pub fn load_shader_combined(
        &mut self,
        device: &dyn GraphicsDevice,
        path: &Path,
    ) -> Result<Arc<dyn Shader>> {
        // A combined file is keyed as (path, path)
        if let Some(existing) = self.find_shader(path, path) {
            self.stats.cache_hits += 1;
            return Ok(existing);
        }

        let combined = read_source(path)?;
        let source = ShaderSource::from_combined(&combined)?;
        let name = ResourceDescriptor::new(path).display_name().to_string();

        let shader = device.create_shader(ShaderDesc { name, source })?;
        self.shaders.push(LoadedShader {
            vertex_path: path.to_path_buf(),
            fragment_path: path.to_path_buf(),
            shader: shader.clone(),
        });
        self.stats.shaders_loaded += 1;
        engine_info!(LOG_SOURCE, "Loaded shader '{}'", path.display());
        Ok(shader)
    }

    fn find_shader(&self, vertex_path: &Path, fragment_path: &Path) -> Option<Arc<dyn Shader>> {
        self.shaders
            .iter()
            .find(|s| s.vertex_path == vertex_path && s.fragment_path == fragment_path)
            .map(|s| s.shader.clone())
    }

    // ===== TEXTURES =====

    /// Load (or reuse) a 2D texture from an image file
    ///
    /// PNG files are decoded without a vertical flip; every other format is
    /// flipped to align disk row order with the GPU texture convention.
    /// Decode failure is fatal.
    pub fn load_texture_2d(
        &mut self,
        device: &dyn GraphicsDevice,
        path: &Path,
    ) -> Result<Arc<dyn Texture>> {
        if let Some(existing) = self.find_texture(path, TextureKind::Texture2D) {
            self.stats.cache_hits += 1;
            return Ok(existing);
        }

        let decoded = decode_image(path)?;
        let texture = device.create_texture_2d(Texture2DDesc {
            width: decoded.width,
            height: decoded.height,
            format: decoded.format,
            data: Some(decoded.pixels),
            generate_mipmaps: true,
        })?;

        self.textures.push(LoadedTexture {
            descriptor: ResourceDescriptor::new(path),
            texture: texture.clone(),
        });
        self.stats.textures_loaded += 1;
        engine_info!(LOG_SOURCE, "Loaded texture '{}'", path.display());
        Ok(texture)
    }

    /// Load (or reuse) a cubemap from six face image files
    ///
    /// Face order: +X, -X, +Y, -Y, +Z, -Z. All six faces must decode and
    /// share dimensions and format; any partial failure is fatal. The +X
    /// face path keys the deduplication.
    pub fn load_texture_cube(
        &mut self,
        device: &dyn GraphicsDevice,
        face_paths: &[PathBuf; 6],
    ) -> Result<Arc<dyn Texture>> {
        if let Some(existing) = self.find_texture(&face_paths[0], TextureKind::Cubemap) {
            self.stats.cache_hits += 1;
            return Ok(existing);
        }

        let mut faces: Vec<DecodedImage> = Vec::with_capacity(6);
        for path in face_paths.iter() {
            faces.push(decode_image(path)?);
        }
        let first = &faces[0];
        for (i, face) in faces.iter().enumerate() {
            if face.width != first.width || face.height != first.height || face.format != first.format
            {
                return Err(engine_err!(
                    LOG_SOURCE,
                    "Cubemap face '{}' is {}x{} {:?}, expected {}x{} {:?}",
                    face_paths[i].display(),
                    face.width,
                    face.height,
                    face.format,
                    first.width,
                    first.height,
                    first.format
                ));
            }
        }

        let (width, height, format) = (first.width, first.height, first.format);
        let mut pixels = faces.into_iter().map(|f| f.pixels);
        let face_data = [
            pixels.next().unwrap(),
            pixels.next().unwrap(),
            pixels.next().unwrap(),
            pixels.next().unwrap(),
            pixels.next().unwrap(),
            pixels.next().unwrap(),
        ];

        let texture = device.create_texture_cube(TextureCubeDesc {
            width,
            height,
            format,
            faces: face_data,
            generate_mipmaps: true,
        })?;

        self.textures.push(LoadedTexture {
            descriptor: ResourceDescriptor::new(&face_paths[0]),
            texture: texture.clone(),
        });
        self.stats.textures_loaded += 1;
        engine_info!(LOG_SOURCE, "Loaded cubemap '{}'", face_paths[0].display());
        Ok(texture)
    }

    // A 2D texture and a cubemap face may share a file, so the kind is part
    // of the key.
    fn find_texture(&self, path: &Path, kind: TextureKind) -> Option<Arc<dyn Texture>> {
        self.textures
            .iter()
            .find(|t| t.descriptor.path == path && t.texture.kind() == kind)
            .map(|t| t.texture.clone())
    }

    // ===== MESHES =====

    /// Fetch (or build and track) the mesh for a model path
    ///
    /// Model decoding is format-specific and stays with the caller; the
    /// builder runs only on a ledger miss, so repeated requests for the same
    /// path return the existing `Arc` without touching the device.
    pub fn load_mesh_with<F>(&mut self, path: &Path, build: F) -> Result<Arc<Mesh>>
    where
        F: FnOnce() -> Result<Mesh>,
    {
        if let Some(existing) = self.find_mesh(path) {
            self.stats.cache_hits += 1;
            return Ok(existing);
        }

        let mesh = Arc::new(build()?);
        self.meshes.push(LoadedMesh {
            descriptor: ResourceDescriptor::new(path),
            mesh: mesh.clone(),
        });
        self.stats.meshes_loaded += 1;
        engine_info!(LOG_SOURCE, "Loaded mesh '{}'", path.display());
        Ok(mesh)
    }

    fn find_mesh(&self, path: &Path) -> Option<Arc<Mesh>> {
        self.meshes
            .iter()
            .find(|m| m.descriptor.path == path)
            .map(|m| m.mesh.clone())
    }

    // ===== DEFAULT TEXTURES =====

    /// 1x1 white fallback texture
    pub fn white_texture(&self) -> Option<Arc<dyn Texture>> {
        self.white_texture.clone()
    }

    /// 1x1 black fallback texture
    pub fn black_texture(&self) -> Option<Arc<dyn Texture>> {
        self.black_texture.clone()
    }

    /// 2x2 magenta/black "missing asset" texture
    pub fn missing_texture(&self) -> Option<Arc<dyn Texture>> {
        self.missing_texture.clone()
    }

    // ===== INTROSPECTION =====

    /// Number of tracked shaders
    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Number of tracked textures (default textures excluded)
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of tracked model meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Load statistics since the last reset
    pub fn stats(&self) -> ResourceStats {
        self.stats
    }

    /// Reset load statistics (typically once per frame)
    pub fn reset_stats(&mut self) {
        self.stats = ResourceStats::default();
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// File decoding helpers
// ============================================================================

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        engine_err!(LOG_SOURCE, "Failed to read shader source '{}': {}", path.display(), e)
    })
}

struct DecodedImage {
    width: u32,
    height: u32,
    format: TextureFormat,
    pixels: Vec<u8>,
}

fn decode_image(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|e| {
        engine_err!(LOG_SOURCE, "Failed to decode image '{}': {}", path.display(), e)
    })?;

    // PNG row order already matches the GPU convention; everything else
    // needs the flip.
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    let img = if is_png { img } else { img.flipv() };

    let format = TextureFormat::from_channels(img.color().channel_count());
    let (width, height) = img.dimensions();
    let pixels = match format {
        TextureFormat::Rgba => img.to_rgba8().into_raw(),
        TextureFormat::Rgb => img.to_rgb8().into_raw(),
        TextureFormat::Red => img.to_luma8().into_raw(),
    };

    Ok(DecodedImage { width, height, format, pixels })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
