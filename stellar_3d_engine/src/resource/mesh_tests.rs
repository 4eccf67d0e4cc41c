//! Unit tests for meshes

use crate::renderer::mock_device::MockDevice;
use crate::renderer::{BufferElement, BufferLayout, IndexData, IndexType, ShaderDataType};
use crate::resource::Mesh;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

fn vertex_layout() -> BufferLayout {
    BufferLayout::new(vec![
        BufferElement::new("a_Position", ShaderDataType::Float3, false),
        BufferElement::new("a_Normal", ShaderDataType::Float3, false),
        BufferElement::new("a_TexCoord", ShaderDataType::Float2, false),
    ])
}

fn quad_vertices() -> Vec<Vertex> {
    (0..4)
        .map(|i| Vertex {
            position: [i as f32, 0.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        })
        .collect()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_from_vertices_creates_both_buffers() {
    let device = MockDevice::new();
    let mesh = Mesh::from_vertices(
        &device,
        &quad_vertices(),
        vertex_layout(),
        IndexData::U16(vec![0, 1, 2, 2, 3, 0]),
    )
    .unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    let ib = mesh.index_buffer().expect("index buffer");
    assert_eq!(ib.count(), 6);
    assert_eq!(ib.index_type(), IndexType::U16);
    assert_eq!(mesh.vertex_buffer().layout().stride(), 32);

    let created = device.created_resources();
    assert_eq!(created.len(), 2);
    // 4 vertices * 32 bytes
    assert_eq!(created[0], "vertex_buffer_128");
}

#[test]
fn test_from_vertices_unindexed() {
    let device = MockDevice::new();
    let mesh = Mesh::from_vertices_unindexed(&device, &quad_vertices()[..3], vertex_layout())
        .unwrap();

    assert_eq!(mesh.vertex_count(), 3);
    assert!(mesh.index_buffer().is_none());
    assert_eq!(device.created_resources().len(), 1);
}

#[test]
fn test_from_vertices_rejects_wrong_layout() {
    // One vertex is 32 bytes; a Mat3 layout has a 36-byte stride
    let device = MockDevice::new();
    let layout = BufferLayout::new(vec![
        BufferElement::new("a_Transform", ShaderDataType::Mat3, false),
    ]);
    let result = Mesh::from_vertices(
        &device,
        &quad_vertices()[..1],
        layout,
        IndexData::U16(vec![0]),
    );
    assert!(result.is_err());
}
