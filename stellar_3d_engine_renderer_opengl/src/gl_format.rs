//! Format mapping - engine enums to OpenGL constants
//!
//! Every mapping is a pure total function; keeping them in one place means a
//! new engine variant fails to compile here instead of misrendering.

use stellar_3d_engine::stellar3d::render::{
    AttachmentPoint, BufferUsage, ClearFlags, ColorAttachmentFormat, CullMode, DepthFunc,
    IndexType, RenderbufferFormat, ShaderDataType, TextureFormat, UsageAccess, UsageFrequency,
};

/// Buffer usage hint to a GL usage enum
pub fn buffer_usage_to_gl(usage: BufferUsage) -> u32 {
    match (usage.frequency, usage.access) {
        (UsageFrequency::Static, UsageAccess::Draw) => glow::STATIC_DRAW,
        (UsageFrequency::Static, UsageAccess::Copy) => glow::STATIC_COPY,
        (UsageFrequency::Static, UsageAccess::Read) => glow::STATIC_READ,
        (UsageFrequency::Dynamic, UsageAccess::Draw) => glow::DYNAMIC_DRAW,
        (UsageFrequency::Dynamic, UsageAccess::Copy) => glow::DYNAMIC_COPY,
        (UsageFrequency::Dynamic, UsageAccess::Read) => glow::DYNAMIC_READ,
        (UsageFrequency::Stream, UsageAccess::Draw) => glow::STREAM_DRAW,
        (UsageFrequency::Stream, UsageAccess::Copy) => glow::STREAM_COPY,
        (UsageFrequency::Stream, UsageAccess::Read) => glow::STREAM_READ,
    }
}

/// Index width to the GL element type
pub fn index_type_to_gl(index_type: IndexType) -> u32 {
    match index_type {
        IndexType::U8 => glow::UNSIGNED_BYTE,
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

/// Vertex attribute component to the GL base type
pub fn shader_data_type_to_gl(data_type: ShaderDataType) -> u32 {
    match data_type {
        ShaderDataType::Float
        | ShaderDataType::Float2
        | ShaderDataType::Float3
        | ShaderDataType::Float4
        | ShaderDataType::Mat3
        | ShaderDataType::Mat4 => glow::FLOAT,
        ShaderDataType::Int
        | ShaderDataType::Int2
        | ShaderDataType::Int3
        | ShaderDataType::Int4 => glow::INT,
        ShaderDataType::UInt => glow::UNSIGNED_INT,
        ShaderDataType::Bool => glow::UNSIGNED_BYTE,
    }
}

/// Cull mode to the GL face enum; `None` disables culling
pub fn cull_mode_to_gl(mode: CullMode) -> Option<u32> {
    match mode {
        CullMode::None => None,
        CullMode::Front => Some(glow::FRONT),
        CullMode::Back => Some(glow::BACK),
        CullMode::FrontAndBack => Some(glow::FRONT_AND_BACK),
    }
}

/// Depth comparison to the GL func enum
pub fn depth_func_to_gl(func: DepthFunc) -> u32 {
    match func {
        DepthFunc::Never => glow::NEVER,
        DepthFunc::Less => glow::LESS,
        DepthFunc::LessEqual => glow::LEQUAL,
        DepthFunc::Equal => glow::EQUAL,
        DepthFunc::NotEqual => glow::NOTEQUAL,
        DepthFunc::Greater => glow::GREATER,
        DepthFunc::GreaterEqual => glow::GEQUAL,
        DepthFunc::Always => glow::ALWAYS,
    }
}

/// Clear flag set to the GL bitmask
pub fn clear_flags_to_gl(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

/// Pixel format to the GL (internal format, upload format) pair
pub fn texture_format_to_gl(format: TextureFormat) -> (i32, u32) {
    match format {
        TextureFormat::Rgba => (glow::RGBA8 as i32, glow::RGBA),
        TextureFormat::Rgb => (glow::RGB8 as i32, glow::RGB),
        TextureFormat::Red => (glow::R8 as i32, glow::RED),
    }
}

/// Color attachment precision to the GL internal format
pub fn color_format_to_gl(format: ColorAttachmentFormat) -> i32 {
    match format {
        ColorAttachmentFormat::Sdr => glow::RGBA8 as i32,
        ColorAttachmentFormat::Hdr => glow::RGBA16F as i32,
    }
}

/// Renderbuffer storage format to the GL internal format
pub fn renderbuffer_format_to_gl(format: RenderbufferFormat) -> u32 {
    match format {
        RenderbufferFormat::Depth16 => glow::DEPTH_COMPONENT16,
        RenderbufferFormat::Depth24 => glow::DEPTH_COMPONENT24,
        RenderbufferFormat::Depth32F => glow::DEPTH_COMPONENT32F,
        RenderbufferFormat::Depth24Stencil8 => glow::DEPTH24_STENCIL8,
        RenderbufferFormat::Depth32FStencil8 => glow::DEPTH32F_STENCIL8,
        RenderbufferFormat::Stencil8 => glow::STENCIL_INDEX8,
    }
}

/// Attachment point to the GL attachment enum
pub fn attachment_point_to_gl(point: AttachmentPoint) -> u32 {
    match point {
        AttachmentPoint::Depth => glow::DEPTH_ATTACHMENT,
        AttachmentPoint::DepthStencil => glow::DEPTH_STENCIL_ATTACHMENT,
        AttachmentPoint::Stencil => glow::STENCIL_ATTACHMENT,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
