//! Unit tests for materials

use crate::renderer::mock_device::{MockShader, MockTexture};
use crate::renderer::{Shader, Texture, TextureFormat, TextureKind};
use crate::resource::{Material, MaterialDesc, SkyboxMaterial};
use std::sync::Arc;

fn mock_texture(handle: u64, kind: TextureKind) -> Arc<dyn Texture> {
    Arc::new(MockTexture::new(1, 1, TextureFormat::Rgba, kind, handle))
}

// ============================================================================
// MATERIAL CONSTRUCTION
// ============================================================================

#[test]
fn test_material_rejects_duplicate_texture_names() {
    let shader: Arc<dyn Shader> = Arc::new(MockShader::new("lit"));
    let desc = MaterialDesc {
        shader,
        shininess: 32.0,
        metalness: 0.0,
        textures: vec![
            ("u_Diffuse".to_string(), mock_texture(1, TextureKind::Texture2D)),
            ("u_Diffuse".to_string(), mock_texture(2, TextureKind::Texture2D)),
        ],
    };
    assert!(Material::from_desc(desc).is_err());
}

#[test]
fn test_material_texture_lookup() {
    let shader: Arc<dyn Shader> = Arc::new(MockShader::new("lit"));
    let diffuse = mock_texture(1, TextureKind::Texture2D);
    let material = Material::from_desc(MaterialDesc {
        shader,
        shininess: 16.0,
        metalness: 0.5,
        textures: vec![
            ("u_Diffuse".to_string(), diffuse.clone()),
            ("u_Specular".to_string(), mock_texture(2, TextureKind::Texture2D)),
        ],
    })
    .unwrap();

    assert_eq!(material.texture_count(), 2);
    assert!(Arc::ptr_eq(material.texture("u_Diffuse").unwrap(), &diffuse));
    assert!(material.texture("u_Normal").is_none());
    assert_eq!(material.shininess(), 16.0);
    assert_eq!(material.metalness(), 0.5);
}

#[test]
fn test_material_set_texture_replaces_by_name() {
    let shader: Arc<dyn Shader> = Arc::new(MockShader::new("lit"));
    let mut material = Material::from_desc(MaterialDesc {
        shader,
        shininess: 1.0,
        metalness: 0.0,
        textures: vec![("u_Diffuse".to_string(), mock_texture(1, TextureKind::Texture2D))],
    })
    .unwrap();

    let replacement = mock_texture(9, TextureKind::Texture2D);
    material.set_texture("u_Diffuse", replacement.clone());
    assert!(Arc::ptr_eq(material.texture("u_Diffuse").unwrap(), &replacement));

    // Unknown names warn and change nothing
    material.set_texture("u_Normal", mock_texture(10, TextureKind::Texture2D));
    assert_eq!(material.texture_count(), 1);
}

// ============================================================================
// MATERIAL BINDING
// ============================================================================

#[test]
fn test_material_bind_uploads_parameters_and_slots() {
    let mock = Arc::new(MockShader::new("lit"));
    let shader: Arc<dyn Shader> = mock.clone();
    let material = Material::from_desc(MaterialDesc {
        shader,
        shininess: 32.0,
        metalness: 0.25,
        textures: vec![
            ("u_Diffuse".to_string(), mock_texture(1, TextureKind::Texture2D)),
            ("u_Specular".to_string(), mock_texture(2, TextureKind::Texture2D)),
        ],
    })
    .unwrap();

    material.bind();

    assert!(mock.is_bound());
    let writes = mock.recorded_writes();
    assert_eq!(
        writes,
        vec![
            "set_float u_Material.shininess",
            "set_float u_Material.metalness",
            "set_int u_Diffuse",
            "set_int u_Specular",
        ]
    );
}

// ============================================================================
// SKYBOX MATERIAL
// ============================================================================

#[test]
fn test_skybox_material_requires_cubemap() {
    let shader: Arc<dyn Shader> = Arc::new(MockShader::new("skybox"));
    assert!(SkyboxMaterial::new(shader.clone(), mock_texture(1, TextureKind::Texture2D)).is_err());
    assert!(SkyboxMaterial::new(shader, mock_texture(2, TextureKind::Cubemap)).is_ok());
}

#[test]
fn test_skybox_material_bind_points_sampler_at_slot_zero() {
    let mock = Arc::new(MockShader::new("skybox"));
    let shader: Arc<dyn Shader> = mock.clone();
    let material = SkyboxMaterial::new(shader, mock_texture(1, TextureKind::Cubemap)).unwrap();

    material.bind();
    assert_eq!(mock.recorded_writes(), vec!["set_int u_Skybox"]);
}
