//! Unit tests for the scene submission pipeline
//!
//! Drives the pipeline through a MockDevice and MockShader and asserts on
//! the exact command and uniform-write sequences.

use crate::renderer::mock_device::{MockDevice, MockShader, MockTexture};
use crate::renderer::{
    BufferElement, BufferLayout, IndexData, Shader, ShaderDataType, Texture, TextureFormat,
    TextureKind,
};
use crate::resource::{Material, MaterialDesc, Mesh, SkyboxMaterial};
use crate::scene::{set_shader_light_info, ColliderGeometry, Light, SceneCamera, SceneRenderer};
use glam::{Mat4, Vec3};
use std::sync::Arc;

fn position_layout() -> BufferLayout {
    BufferLayout::new(vec![BufferElement::new("a_Position", ShaderDataType::Float3, false)])
}

fn cube_mesh(device: &MockDevice) -> Mesh {
    let vertices: Vec<[f32; 3]> = vec![[0.0; 3]; 8];
    Mesh::from_vertices(device, &vertices, position_layout(), IndexData::U32(vec![0; 36])).unwrap()
}

fn lit_material(shader: Arc<MockShader>) -> Material {
    Material::from_desc(MaterialDesc {
        shader,
        shininess: 32.0,
        metalness: 0.0,
        textures: vec![],
    })
    .unwrap()
}

fn point_light(x: f32) -> Light {
    Light::point(Vec3::new(x, 0.0, 0.0), Vec3::splat(0.1), Vec3::ONE, Vec3::ONE, 1.0, 0.09, 0.032)
}

// ============================================================================
// FRAME SEQUENCING
// ============================================================================

#[test]
fn test_begin_scene_resets_draw_counter() {
    let device = MockDevice::new();
    let mesh = cube_mesh(&device);
    let material = lit_material(Arc::new(MockShader::new("lit")));
    let mut renderer = SceneRenderer::new();
    let camera = SceneCamera::default();

    renderer.begin_scene(&camera);
    renderer.submit_mesh(&device, &mesh, &material, Mat4::IDENTITY, &[], None).unwrap();
    renderer.submit_mesh(&device, &mesh, &material, Mat4::IDENTITY, &[], None).unwrap();
    assert_eq!(renderer.stats().draw_calls, 2);

    renderer.begin_scene(&camera);
    assert_eq!(renderer.stats().draw_calls, 0);
}

#[test]
fn test_begin_scene_with_transform_inverts_view() {
    let mock = Arc::new(MockShader::new("lit"));
    let material = lit_material(mock.clone());
    let device = MockDevice::new();
    let mesh = cube_mesh(&device);
    let mut renderer = SceneRenderer::new();

    let camera = SceneCamera::perspective(1.0, 1.0, 0.1, 100.0);
    let camera_transform = Mat4::from_translation(Vec3::new(0.0, 2.0, 5.0));
    renderer.begin_scene_with_transform(&camera, camera_transform);
    renderer.submit_mesh(&device, &mesh, &material, Mat4::IDENTITY, &[], None).unwrap();

    // The pipeline accepted the transform and issued the draw
    assert_eq!(renderer.stats().draw_calls, 1);
    assert!(mock.recorded_writes().contains(&"set_mat4 u_ViewProjection".to_string()));
}

// ============================================================================
// MESH SUBMISSION
// ============================================================================

#[test]
fn test_submit_mesh_uploads_uniforms_and_draws() {
    let mock = Arc::new(MockShader::new("lit"));
    let material = lit_material(mock.clone());
    let device = MockDevice::new();
    let mesh = cube_mesh(&device);
    let mut renderer = SceneRenderer::new();

    renderer.begin_scene(&SceneCamera::default());
    renderer
        .submit_mesh(&device, &mesh, &material, Mat4::IDENTITY, &[point_light(0.0)], None)
        .unwrap();

    let writes = mock.recorded_writes();
    assert!(writes.contains(&"set_mat4 u_ViewProjection".to_string()));
    assert!(writes.contains(&"set_mat4 u_Transform".to_string()));
    assert!(writes.contains(&"set_int u_LightCount".to_string()));
    assert_eq!(mock.writes_with_prefix("u_Light[0]."), 11);

    assert_eq!(device.recorded_commands(), vec!["draw_indexed 36"]);
    assert_eq!(renderer.stats().draw_calls, 1);
}

#[test]
fn test_submit_mesh_without_indices_draws_arrays() {
    let device = MockDevice::new();
    let vertices: Vec<[f32; 3]> = vec![[0.0; 3]; 3];
    let mesh = Mesh::from_vertices_unindexed(&device, &vertices, position_layout()).unwrap();
    let material = lit_material(Arc::new(MockShader::new("lit")));
    let mut renderer = SceneRenderer::new();

    renderer.begin_scene(&SceneCamera::default());
    renderer.submit_mesh(&device, &mesh, &material, Mat4::IDENTITY, &[], None).unwrap();
    assert_eq!(device.recorded_commands(), vec!["draw_arrays 0 3"]);
}

#[test]
fn test_submit_mesh_uploads_bone_matrices() {
    let mock = Arc::new(MockShader::new("skinned"));
    let material = lit_material(mock.clone());
    let device = MockDevice::new();
    let mesh = cube_mesh(&device);
    let mut renderer = SceneRenderer::new();

    let bones = vec![Mat4::IDENTITY; 4];
    renderer.begin_scene(&SceneCamera::default());
    renderer
        .submit_mesh(&device, &mesh, &material, Mat4::IDENTITY, &[], Some(&bones))
        .unwrap();

    assert_eq!(mock.writes_with_prefix("u_FinalBonesMatrices["), 4);
    assert!(mock
        .recorded_writes()
        .contains(&"set_mat4 u_FinalBonesMatrices[3]".to_string()));
}

// ============================================================================
// LIGHT UPLOAD
// ============================================================================

#[test]
fn test_light_cap_drops_excess() {
    let shader = MockShader::new("lit");
    let lights: Vec<Light> = (0..10).map(|i| point_light(i as f32)).collect();

    set_shader_light_info(&shader, &lights);

    // Slots 0..7 filled, 8 and 9 dropped
    assert_eq!(shader.writes_with_prefix("u_Light[7]."), 11);
    assert_eq!(shader.writes_with_prefix("u_Light[8]"), 0);
    assert_eq!(shader.writes_with_prefix("u_Light[9]"), 0);
    assert!(shader.recorded_writes().contains(&"set_int u_LightCount".to_string()));
}

#[test]
fn test_scene_light_bypasses_the_cap() {
    let shader = MockShader::new("lit");
    let mut lights: Vec<Light> = (0..9).map(|i| point_light(i as f32)).collect();
    // The scene light arrives after the array is already full
    lights.push(
        Light::directional(Vec3::NEG_Y, Vec3::splat(0.1), Vec3::ONE, Vec3::ONE).as_scene_light(),
    );

    set_shader_light_info(&shader, &lights);

    assert_eq!(shader.writes_with_prefix("u_Global."), 11);
    assert_eq!(shader.writes_with_prefix("u_Light[8]"), 0);
}

#[test]
fn test_scene_light_does_not_consume_an_array_slot() {
    let shader = MockShader::new("lit");
    let lights = vec![
        Light::directional(Vec3::NEG_Y, Vec3::ZERO, Vec3::ONE, Vec3::ONE).as_scene_light(),
        point_light(1.0),
    ];

    set_shader_light_info(&shader, &lights);

    // The non-scene light lands in slot 0 despite coming second
    assert_eq!(shader.writes_with_prefix("u_Light[0]."), 11);
    assert_eq!(shader.writes_with_prefix("u_Light[1]"), 0);
}

// ============================================================================
// TERRAIN SUBMISSION
// ============================================================================

#[test]
fn test_submit_terrain_flips_and_restores_culling() {
    let device = MockDevice::new();
    let mesh = cube_mesh(&device);
    let material = lit_material(Arc::new(MockShader::new("terrain")));
    let mut renderer = SceneRenderer::new();

    renderer.begin_scene(&SceneCamera::default());
    renderer.submit_terrain(&device, &mesh, &material, Mat4::IDENTITY, &[]).unwrap();

    assert_eq!(
        device.recorded_commands(),
        vec!["set_cull_mode Front", "draw_indexed 36", "set_cull_mode Back"]
    );
}

// ============================================================================
// SKYBOX SUBMISSION
// ============================================================================

#[test]
fn test_submit_skybox_state_sequence() {
    let device = MockDevice::new();
    let mesh = cube_mesh(&device);
    let mock = Arc::new(MockShader::new("skybox"));
    let shader: Arc<dyn Shader> = mock.clone();
    let cubemap: Arc<dyn Texture> =
        Arc::new(MockTexture::new(1, 1, TextureFormat::Rgba, TextureKind::Cubemap, 1));
    let material = SkyboxMaterial::new(shader, cubemap).unwrap();
    let mut renderer = SceneRenderer::new();

    renderer.begin_scene(&SceneCamera::perspective(1.0, 1.0, 0.1, 100.0));
    renderer.submit_skybox(&device, &mesh, &material).unwrap();

    assert_eq!(
        device.recorded_commands(),
        vec![
            "set_depth_func LessEqual",
            "set_depth_mask false",
            "set_cull_mode None",
            "draw_indexed 36",
            "set_depth_func Less",
            "set_depth_mask true",
            "set_cull_mode Back",
        ]
    );
    assert!(mock.recorded_writes().contains(&"set_mat4 u_ViewProjection".to_string()));
    assert_eq!(renderer.stats().draw_calls, 1);
}

// ============================================================================
// COLLIDER SUBMISSION
// ============================================================================

#[test]
fn test_submit_collider_wireframe_wraps_draws() {
    let device = MockDevice::new();
    let line_vertices: Vec<[f32; 3]> = vec![[0.0; 3]; 2];
    let collider = ColliderGeometry {
        lines: Some(
            Mesh::from_vertices_unindexed(&device, &line_vertices, position_layout()).unwrap(),
        ),
        triangles: Some(cube_mesh(&device)),
    };
    let shader = MockShader::new("debug");
    let mut renderer = SceneRenderer::new();

    renderer.begin_scene(&SceneCamera::default());
    renderer.submit_collider(&device, &collider, &shader, Mat4::IDENTITY).unwrap();

    assert_eq!(
        device.recorded_commands(),
        vec![
            "set_wireframe true",
            "draw_lines 0 2",
            "draw_indexed 36",
            "set_wireframe false",
        ]
    );
    assert_eq!(renderer.stats().draw_calls, 2);
    let writes = shader.recorded_writes();
    assert!(writes.contains(&"set_mat4 u_ViewProjection".to_string()));
    assert!(writes.contains(&"set_mat4 u_Transform".to_string()));
}

#[test]
fn test_submit_collider_with_no_geometry_still_restores_state() {
    let device = MockDevice::new();
    let collider = ColliderGeometry { lines: None, triangles: None };
    let shader = MockShader::new("debug");
    let mut renderer = SceneRenderer::new();

    renderer.begin_scene(&SceneCamera::default());
    renderer.submit_collider(&device, &collider, &shader, Mat4::IDENTITY).unwrap();

    assert_eq!(device.recorded_commands(), vec!["set_wireframe true", "set_wireframe false"]);
    assert_eq!(renderer.stats().draw_calls, 0);
}
