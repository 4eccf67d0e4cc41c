//! GPU buffer objects: vertex/index buffer traits, layout description and
//! upload usage hints.
//!
//! A `BufferLayout` describes the vertex attributes stored in a vertex
//! buffer; element offsets are computed cumulatively and the stride is the
//! sum of all element sizes. Buffers themselves are backend objects behind
//! the `VertexBuffer`/`IndexBuffer` traits, created through
//! `GraphicsDevice` and destroyed when the last `Arc` drops.

use crate::error::Result;
use crate::{engine_bail, engine_warn};

// ============================================================================
// Shader data types and layout
// ============================================================================

/// Component type of a single vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderDataType {
    Float,
    Float2,
    Float3,
    Float4,
    Mat3,
    Mat4,
    Int,
    Int2,
    Int3,
    Int4,
    Bool,
    UInt,
}

impl ShaderDataType {
    /// Size of the attribute in bytes
    pub fn size(self) -> u32 {
        match self {
            ShaderDataType::Float => 4,
            ShaderDataType::Float2 => 4 * 2,
            ShaderDataType::Float3 => 4 * 3,
            ShaderDataType::Float4 => 4 * 4,
            ShaderDataType::Mat3 => 4 * 3 * 3,
            ShaderDataType::Mat4 => 4 * 4 * 4,
            ShaderDataType::Int => 4,
            ShaderDataType::Int2 => 4 * 2,
            ShaderDataType::Int3 => 4 * 3,
            ShaderDataType::Int4 => 4 * 4,
            ShaderDataType::Bool => 1,
            ShaderDataType::UInt => 4,
        }
    }

    /// Number of scalar components (a matrix counts all its cells)
    pub fn component_count(self) -> u32 {
        match self {
            ShaderDataType::Float => 1,
            ShaderDataType::Float2 => 2,
            ShaderDataType::Float3 => 3,
            ShaderDataType::Float4 => 4,
            ShaderDataType::Mat3 => 3 * 3,
            ShaderDataType::Mat4 => 4 * 4,
            ShaderDataType::Int => 1,
            ShaderDataType::Int2 => 2,
            ShaderDataType::Int3 => 3,
            ShaderDataType::Int4 => 4,
            ShaderDataType::Bool => 1,
            ShaderDataType::UInt => 1,
        }
    }

    /// True for the integer attribute path (no normalization applies)
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ShaderDataType::Int
                | ShaderDataType::Int2
                | ShaderDataType::Int3
                | ShaderDataType::Int4
                | ShaderDataType::Bool
                | ShaderDataType::UInt
        )
    }

    /// Number of consecutive attribute locations the type occupies
    /// (matrices take one location per column)
    pub fn location_count(self) -> u32 {
        match self {
            ShaderDataType::Mat3 => 3,
            ShaderDataType::Mat4 => 4,
            _ => 1,
        }
    }
}

/// One named attribute within a vertex buffer layout
#[derive(Debug, Clone)]
pub struct BufferElement {
    /// Semantic name (e.g. "a_Position")
    pub name: String,
    /// Component type
    pub data_type: ShaderDataType,
    /// Normalize fixed-point data on the float attribute path
    pub normalized: bool,
    /// Byte offset from the start of a vertex, computed by the layout
    pub offset: u32,
    /// Byte size, derived from the data type
    pub size: u32,
}

impl BufferElement {
    /// Create an element; offset is assigned when the layout is built
    pub fn new(name: impl Into<String>, data_type: ShaderDataType, normalized: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            normalized,
            offset: 0,
            size: data_type.size(),
        }
    }
}

/// Ordered attribute list with computed offsets and stride
///
/// Invariant: offsets are monotonically increasing and equal to the
/// cumulative size of preceding elements; stride is the sum of all sizes.
#[derive(Debug, Clone, Default)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    /// Build a layout from elements, computing offsets and stride
    pub fn new(mut elements: Vec<BufferElement>) -> Self {
        let mut offset = 0u32;
        for element in &mut elements {
            element.offset = offset;
            offset += element.size;
        }
        Self { elements, stride: offset }
    }

    /// Attribute elements in declaration order
    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    /// Bytes per vertex
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Validate that a payload length is a whole number of vertices
    ///
    /// Rejecting mismatched payloads at construction replaces the original's
    /// unchecked pointer reinterpretation with a checked byte-span contract.
    pub fn validate_data_len(&self, len: usize) -> Result<()> {
        if self.stride == 0 {
            engine_bail!(
                "stellar3d::BufferLayout",
                "Vertex data supplied for an empty layout ({} bytes)",
                len
            );
        }
        if len % self.stride as usize != 0 {
            engine_bail!(
                "stellar3d::BufferLayout",
                "Vertex data length {} is not a multiple of the layout stride {}",
                len,
                self.stride
            );
        }
        Ok(())
    }
}

// ============================================================================
// Usage hints
// ============================================================================

/// How often the buffer contents are expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageFrequency {
    /// Uploaded once, drawn many times
    Static,
    /// Re-uploaded occasionally
    Dynamic,
    /// Re-uploaded every frame or nearly so
    Stream,
}

/// What the buffer contents are used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageAccess {
    /// Source for draw commands
    Draw,
    /// Source for GPU-to-GPU copies
    Copy,
    /// Read back to the application
    Read,
}

/// Combined upload hint, non-semantic to correctness
///
/// Backends translate this to a driver optimization hint only; every
/// combination produces the same observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferUsage {
    pub frequency: UsageFrequency,
    pub access: UsageAccess,
}

impl Default for BufferUsage {
    fn default() -> Self {
        Self { frequency: UsageFrequency::Static, access: UsageAccess::Draw }
    }
}

impl BufferUsage {
    pub const STATIC_DRAW: BufferUsage =
        BufferUsage { frequency: UsageFrequency::Static, access: UsageAccess::Draw };
    pub const DYNAMIC_DRAW: BufferUsage =
        BufferUsage { frequency: UsageFrequency::Dynamic, access: UsageAccess::Draw };
    pub const STREAM_DRAW: BufferUsage =
        BufferUsage { frequency: UsageFrequency::Stream, access: UsageAccess::Draw };
}

// ============================================================================
// Vertex buffer
// ============================================================================

/// Descriptor for creating a vertex buffer
#[derive(Debug, Clone)]
pub struct VertexBufferDesc {
    /// Attribute layout applied at creation
    pub layout: BufferLayout,
    /// Optional initial payload; length must be a multiple of the stride
    pub data: Option<Vec<u8>>,
    /// Allocation size in bytes when `data` is None (0 = empty buffer)
    pub size: u64,
    /// Driver upload hint
    pub usage: BufferUsage,
}

impl VertexBufferDesc {
    /// Validate the descriptor before backend construction
    ///
    /// Called by every backend. An empty buffer (no data, size 0) is allowed;
    /// drawing from it is a GPU-level error deferred to the draw call.
    pub fn validate(&self) -> Result<()> {
        if let Some(data) = &self.data {
            self.layout.validate_data_len(data.len())?;
        } else if self.size == 0 {
            engine_warn!(
                "stellar3d::VertexBuffer",
                "Creating an empty vertex buffer; drawing from it before SetData is undefined"
            );
        }
        Ok(())
    }
}

/// Vertex buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g. GlVertexBuffer).
/// The GPU handle is released when the last reference drops.
pub trait VertexBuffer: Send + Sync {
    /// Bind the buffer (and its attribute layout) for subsequent draws
    fn bind(&self);

    /// Unbind the buffer
    fn unbind(&self);

    /// Attribute layout applied at creation
    fn layout(&self) -> &BufferLayout;

    /// Replace the full buffer contents
    ///
    /// The payload length must be a multiple of the layout stride.
    fn set_data(&self, data: &[u8], usage: BufferUsage) -> Result<()>;

    /// Overwrite a sub-range of the buffer
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}

// ============================================================================
// Index buffer
// ============================================================================

/// Index element width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

/// Typed index payload; the variant fixes the index width
#[derive(Debug, Clone)]
pub enum IndexData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    /// Number of indices
    pub fn count(&self) -> u32 {
        match self {
            IndexData::U8(v) => v.len() as u32,
            IndexData::U16(v) => v.len() as u32,
            IndexData::U32(v) => v.len() as u32,
        }
    }

    /// Width of one index
    pub fn index_type(&self) -> IndexType {
        match self {
            IndexData::U8(_) => IndexType::U8,
            IndexData::U16(_) => IndexType::U16,
            IndexData::U32(_) => IndexType::U32,
        }
    }
}

/// Descriptor for creating an index buffer
#[derive(Debug, Clone)]
pub struct IndexBufferDesc {
    pub indices: IndexData,
    pub usage: BufferUsage,
}

/// Index buffer resource trait
///
/// Immutable after construction. Invariant: `count() > 0` implies a live
/// GPU handle.
pub trait IndexBuffer: Send + Sync {
    /// Bind the buffer for subsequent indexed draws
    fn bind(&self);

    /// Unbind the buffer
    fn unbind(&self);

    /// Number of indices
    fn count(&self) -> u32;

    /// Width of one index
    fn index_type(&self) -> IndexType;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
