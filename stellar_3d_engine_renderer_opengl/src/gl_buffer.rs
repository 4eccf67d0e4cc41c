//! Buffers - OpenGL implementation of the VertexBuffer/IndexBuffer traits
//!
//! A vertex buffer owns a VAO with the attribute layout baked in at
//! creation, plus the VBO holding the data. Binding the vertex buffer binds
//! the VAO, so an index buffer bound afterwards attaches to it.

use glow::HasContext;
use stellar_3d_engine::engine_err;
use stellar_3d_engine::stellar3d::render::{
    BufferLayout, BufferUsage, IndexBuffer, IndexBufferDesc, IndexData, IndexType, VertexBuffer,
    VertexBufferDesc,
};
use stellar_3d_engine::stellar3d::Result;

use crate::gl_context::GlContext;
use crate::gl_format::{buffer_usage_to_gl, shader_data_type_to_gl};

const LOG_SOURCE: &str = "stellar3d::gl::Buffer";

// ============================================================================
// Vertex buffer
// ============================================================================

/// OpenGL vertex buffer: VAO + VBO with the layout applied at creation
pub struct GlVertexBuffer {
    gl: GlContext,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    layout: BufferLayout,
}

impl GlVertexBuffer {
    pub fn new(gl: GlContext, desc: VertexBufferDesc) -> Result<Self> {
        desc.validate()?;
        let usage = buffer_usage_to_gl(desc.usage);
        // GL sizes are signed; reject what the API cannot express
        let empty_size = match &desc.data {
            Some(_) => 0,
            None => i32::try_from(desc.size).map_err(|_| {
                engine_err!(LOG_SOURCE, "Buffer size {} exceeds the GL size range", desc.size)
            })?,
        };

        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create vertex array: {}", e))?;
            let vbo = gl
                .create_buffer()
                .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create vertex buffer: {}", e))?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            match &desc.data {
                Some(data) => gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, usage),
                None => gl.buffer_data_size(glow::ARRAY_BUFFER, empty_size, usage),
            }

            Self::apply_layout(&gl, &desc.layout);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self { gl, vao, vbo, layout: desc.layout })
        }
    }

    /// Enable and point every attribute in the layout
    ///
    /// Matrix attributes occupy one location per column, each column at a
    /// column-sized offset from the element's base offset.
    unsafe fn apply_layout(gl: &glow::Context, layout: &BufferLayout) {
        let stride = layout.stride() as i32;
        let mut location = 0u32;
        for element in layout.elements() {
            let base_type = shader_data_type_to_gl(element.data_type);
            let locations = element.data_type.location_count();
            let components = (element.data_type.component_count() / locations) as i32;
            for column in 0..locations {
                let offset = (element.offset + column * components as u32 * 4) as i32;
                gl.enable_vertex_attrib_array(location);
                if element.data_type.is_integer() {
                    gl.vertex_attrib_pointer_i32(location, components, base_type, stride, offset);
                } else {
                    gl.vertex_attrib_pointer_f32(
                        location,
                        components,
                        base_type,
                        element.normalized,
                        stride,
                        offset,
                    );
                }
                location += 1;
            }
        }
    }
}

impl VertexBuffer for GlVertexBuffer {
    fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }

    fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    fn set_data(&self, data: &[u8], usage: BufferUsage) -> Result<()> {
        self.layout.validate_data_len(data.len())?;
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, buffer_usage_to_gl(usage));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        Ok(())
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let offset = i32::try_from(offset).map_err(|_| {
            engine_err!(LOG_SOURCE, "Buffer update offset {} exceeds the GL size range", offset)
        })?;
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl
                .buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, offset, data);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        Ok(())
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

// ============================================================================
// Index buffer
// ============================================================================

/// OpenGL index buffer, immutable after construction
pub struct GlIndexBuffer {
    gl: GlContext,
    ebo: glow::Buffer,
    count: u32,
    index_type: IndexType,
}

impl GlIndexBuffer {
    pub fn new(gl: GlContext, desc: IndexBufferDesc) -> Result<Self> {
        let count = desc.indices.count();
        let index_type = desc.indices.index_type();
        let bytes: &[u8] = match &desc.indices {
            IndexData::U8(v) => v,
            IndexData::U16(v) => bytemuck::cast_slice(v),
            IndexData::U32(v) => bytemuck::cast_slice(v),
        };

        unsafe {
            let ebo = gl
                .create_buffer()
                .map_err(|e| engine_err!(LOG_SOURCE, "Failed to create index buffer: {}", e))?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytes,
                buffer_usage_to_gl(desc.usage),
            );
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self { gl, ebo, count, index_type })
        }
    }
}

impl IndexBuffer for GlIndexBuffer {
    fn bind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
    }

    fn count(&self) -> u32 {
        self.count
    }

    fn index_type(&self) -> IndexType {
        self.index_type
    }
}

impl Drop for GlIndexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.ebo);
        }
    }
}
