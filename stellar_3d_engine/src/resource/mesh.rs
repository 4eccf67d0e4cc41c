//! Mesh - a vertex buffer paired with an optional index buffer.

use std::sync::Arc;

use crate::error::Result;
use crate::renderer::{
    BufferLayout, BufferUsage, GraphicsDevice, IndexBuffer, IndexBufferDesc, IndexData,
    VertexBuffer, VertexBufferDesc,
};
use bytemuck::Pod;

/// Drawable geometry: vertices plus optional indices
///
/// `vertex_count` is carried so non-indexed meshes know how many vertices a
/// draw covers; for indexed meshes the index buffer's count wins.
pub struct Mesh {
    vertex_buffer: Arc<dyn VertexBuffer>,
    index_buffer: Option<Arc<dyn IndexBuffer>>,
    vertex_count: u32,
}

impl Mesh {
    pub fn new(
        vertex_buffer: Arc<dyn VertexBuffer>,
        index_buffer: Option<Arc<dyn IndexBuffer>>,
        vertex_count: u32,
    ) -> Self {
        Self { vertex_buffer, index_buffer, vertex_count }
    }

    /// Create an indexed mesh from typed vertex data
    pub fn from_vertices<V: Pod>(
        device: &dyn GraphicsDevice,
        vertices: &[V],
        layout: BufferLayout,
        indices: IndexData,
    ) -> Result<Self> {
        let vertex_count = vertices.len() as u32;
        let data: Vec<u8> = bytemuck::cast_slice(vertices).to_vec();
        let size = data.len() as u64;
        let vertex_buffer = device.create_vertex_buffer(VertexBufferDesc {
            layout,
            data: Some(data),
            size,
            usage: BufferUsage::default(),
        })?;
        let index_buffer = device.create_index_buffer(IndexBufferDesc {
            indices,
            usage: BufferUsage::default(),
        })?;
        Ok(Self { vertex_buffer, index_buffer: Some(index_buffer), vertex_count })
    }

    /// Create a non-indexed mesh from typed vertex data
    pub fn from_vertices_unindexed<V: Pod>(
        device: &dyn GraphicsDevice,
        vertices: &[V],
        layout: BufferLayout,
    ) -> Result<Self> {
        let vertex_count = vertices.len() as u32;
        let data: Vec<u8> = bytemuck::cast_slice(vertices).to_vec();
        let size = data.len() as u64;
        let vertex_buffer = device.create_vertex_buffer(VertexBufferDesc {
            layout,
            data: Some(data),
            size,
            usage: BufferUsage::default(),
        })?;
        Ok(Self { vertex_buffer, index_buffer: None, vertex_count })
    }

    pub fn vertex_buffer(&self) -> &Arc<dyn VertexBuffer> {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> Option<&Arc<dyn IndexBuffer>> {
        self.index_buffer.as_ref()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Bind the vertex buffer and, when present, the index buffer
    pub fn bind(&self) {
        self.vertex_buffer.bind();
        if let Some(ib) = &self.index_buffer {
            ib.bind();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
