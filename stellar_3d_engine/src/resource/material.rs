//! Materials - a shader plus the uniform/texture state it is drawn with.
//!
//! `bind()` makes the material current: binds the shader, uploads scalar
//! material parameters, binds each texture to a slot and points the matching
//! sampler uniform at it. Slot assignment follows insertion order.

use std::sync::Arc;

use crate::error::Result;
use crate::renderer::{Shader, Texture, TextureKind};
use crate::{engine_bail, engine_warn};
use rustc_hash::FxHashMap;

const LOG_SOURCE: &str = "stellar3d::Material";

// ============================================================================
// Material description
// ============================================================================

/// Plain-data material description, validated on construction
#[derive(Clone)]
pub struct MaterialDesc {
    pub shader: Arc<dyn Shader>,
    pub shininess: f32,
    pub metalness: f32,
    /// `(sampler uniform name, texture)` pairs, bound in order
    pub textures: Vec<(String, Arc<dyn Texture>)>,
}

// ============================================================================
// Material
// ============================================================================

/// Surface material: shader + scalar parameters + named textures
pub struct Material {
    shader: Arc<dyn Shader>,
    shininess: f32,
    metalness: f32,
    textures: Vec<(String, Arc<dyn Texture>)>,
    /// Sampler name to slot index, for lookup by name
    texture_slots: FxHashMap<String, usize>,
}

impl Material {
    /// Build a material, rejecting duplicate sampler names
    pub fn from_desc(desc: MaterialDesc) -> Result<Self> {
        let mut texture_slots = FxHashMap::default();
        for (slot, (name, _)) in desc.textures.iter().enumerate() {
            if texture_slots.insert(name.clone(), slot).is_some() {
                engine_bail!(LOG_SOURCE, "Duplicate texture name '{}' in material", name);
            }
        }
        Ok(Self {
            shader: desc.shader,
            shininess: desc.shininess,
            metalness: desc.metalness,
            textures: desc.textures,
            texture_slots,
        })
    }

    /// Bind the shader, upload material parameters, bind textures to slots
    pub fn bind(&self) {
        self.shader.bind();
        self.shader.set_float("u_Material.shininess", self.shininess);
        self.shader.set_float("u_Material.metalness", self.metalness);
        for (slot, (name, texture)) in self.textures.iter().enumerate() {
            texture.bind(slot as u32);
            self.shader.set_int(name, slot as i32);
        }
    }

    pub fn shader(&self) -> &Arc<dyn Shader> {
        &self.shader
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    pub fn metalness(&self) -> f32 {
        self.metalness
    }

    /// Look up a texture by its sampler uniform name
    pub fn texture(&self, name: &str) -> Option<&Arc<dyn Texture>> {
        self.texture_slots.get(name).map(|&slot| &self.textures[slot].1)
    }

    /// Number of bound textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Replace a texture by name, warning when the name is unknown
    pub fn set_texture(&mut self, name: &str, texture: Arc<dyn Texture>) {
        match self.texture_slots.get(name) {
            Some(&slot) => self.textures[slot].1 = texture,
            None => {
                engine_warn!(LOG_SOURCE, "Material has no texture named '{}'", name);
            }
        }
    }
}

// ============================================================================
// Skybox material
// ============================================================================

/// Skybox material: a shader plus one cubemap, always sampled at slot 0
pub struct SkyboxMaterial {
    shader: Arc<dyn Shader>,
    cubemap: Arc<dyn Texture>,
}

impl SkyboxMaterial {
    /// Build a skybox material, rejecting non-cubemap textures
    pub fn new(shader: Arc<dyn Shader>, cubemap: Arc<dyn Texture>) -> Result<Self> {
        if cubemap.kind() != TextureKind::Cubemap {
            engine_bail!(LOG_SOURCE, "Skybox material requires a cubemap texture");
        }
        Ok(Self { shader, cubemap })
    }

    /// Bind the shader and cubemap, pointing `u_Skybox` at slot 0
    pub fn bind(&self) {
        self.shader.bind();
        self.cubemap.bind(0);
        self.shader.set_int("u_Skybox", 0);
    }

    pub fn shader(&self) -> &Arc<dyn Shader> {
        &self.shader
    }

    pub fn cubemap(&self) -> &Arc<dyn Texture> {
        &self.cubemap
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
