//! Unit tests for the engine-to-GL format mappings

use super::*;

// ============================================================================
// BUFFER USAGE
// ============================================================================

#[test]
fn test_buffer_usage_mapping() {
    assert_eq!(buffer_usage_to_gl(BufferUsage::STATIC_DRAW), glow::STATIC_DRAW);
    assert_eq!(buffer_usage_to_gl(BufferUsage::DYNAMIC_DRAW), glow::DYNAMIC_DRAW);
    assert_eq!(buffer_usage_to_gl(BufferUsage::STREAM_DRAW), glow::STREAM_DRAW);
    assert_eq!(
        buffer_usage_to_gl(BufferUsage { frequency: UsageFrequency::Static, access: UsageAccess::Read }),
        glow::STATIC_READ
    );
    assert_eq!(
        buffer_usage_to_gl(BufferUsage { frequency: UsageFrequency::Stream, access: UsageAccess::Copy }),
        glow::STREAM_COPY
    );
}

// ============================================================================
// INDEX AND ATTRIBUTE TYPES
// ============================================================================

#[test]
fn test_index_type_mapping() {
    assert_eq!(index_type_to_gl(IndexType::U8), glow::UNSIGNED_BYTE);
    assert_eq!(index_type_to_gl(IndexType::U16), glow::UNSIGNED_SHORT);
    assert_eq!(index_type_to_gl(IndexType::U32), glow::UNSIGNED_INT);
}

#[test]
fn test_shader_data_type_mapping() {
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Float3), glow::FLOAT);
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Mat4), glow::FLOAT);
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Int2), glow::INT);
    assert_eq!(shader_data_type_to_gl(ShaderDataType::UInt), glow::UNSIGNED_INT);
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Bool), glow::UNSIGNED_BYTE);
}

// ============================================================================
// PIPELINE STATE
// ============================================================================

#[test]
fn test_cull_mode_mapping() {
    assert_eq!(cull_mode_to_gl(CullMode::None), None);
    assert_eq!(cull_mode_to_gl(CullMode::Front), Some(glow::FRONT));
    assert_eq!(cull_mode_to_gl(CullMode::Back), Some(glow::BACK));
    assert_eq!(cull_mode_to_gl(CullMode::FrontAndBack), Some(glow::FRONT_AND_BACK));
}

#[test]
fn test_depth_func_mapping() {
    assert_eq!(depth_func_to_gl(DepthFunc::Never), glow::NEVER);
    assert_eq!(depth_func_to_gl(DepthFunc::Less), glow::LESS);
    assert_eq!(depth_func_to_gl(DepthFunc::LessEqual), glow::LEQUAL);
    assert_eq!(depth_func_to_gl(DepthFunc::Equal), glow::EQUAL);
    assert_eq!(depth_func_to_gl(DepthFunc::NotEqual), glow::NOTEQUAL);
    assert_eq!(depth_func_to_gl(DepthFunc::Greater), glow::GREATER);
    assert_eq!(depth_func_to_gl(DepthFunc::GreaterEqual), glow::GEQUAL);
    assert_eq!(depth_func_to_gl(DepthFunc::Always), glow::ALWAYS);
}

#[test]
fn test_clear_flags_mapping() {
    assert_eq!(clear_flags_to_gl(ClearFlags::COLOR), glow::COLOR_BUFFER_BIT);
    assert_eq!(
        clear_flags_to_gl(ClearFlags::COLOR | ClearFlags::DEPTH),
        glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT
    );
    assert_eq!(
        clear_flags_to_gl(ClearFlags::all()),
        glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT
    );
    assert_eq!(clear_flags_to_gl(ClearFlags::empty()), 0);
}

// ============================================================================
// TEXTURE AND ATTACHMENT FORMATS
// ============================================================================

#[test]
fn test_texture_format_mapping() {
    assert_eq!(texture_format_to_gl(TextureFormat::Rgba), (glow::RGBA8 as i32, glow::RGBA));
    assert_eq!(texture_format_to_gl(TextureFormat::Rgb), (glow::RGB8 as i32, glow::RGB));
    assert_eq!(texture_format_to_gl(TextureFormat::Red), (glow::R8 as i32, glow::RED));
}

#[test]
fn test_color_format_mapping() {
    assert_eq!(color_format_to_gl(ColorAttachmentFormat::Sdr), glow::RGBA8 as i32);
    assert_eq!(color_format_to_gl(ColorAttachmentFormat::Hdr), glow::RGBA16F as i32);
}

#[test]
fn test_renderbuffer_format_mapping() {
    assert_eq!(renderbuffer_format_to_gl(RenderbufferFormat::Depth16), glow::DEPTH_COMPONENT16);
    assert_eq!(renderbuffer_format_to_gl(RenderbufferFormat::Depth24), glow::DEPTH_COMPONENT24);
    assert_eq!(renderbuffer_format_to_gl(RenderbufferFormat::Depth32F), glow::DEPTH_COMPONENT32F);
    assert_eq!(
        renderbuffer_format_to_gl(RenderbufferFormat::Depth24Stencil8),
        glow::DEPTH24_STENCIL8
    );
    assert_eq!(
        renderbuffer_format_to_gl(RenderbufferFormat::Depth32FStencil8),
        glow::DEPTH32F_STENCIL8
    );
    assert_eq!(renderbuffer_format_to_gl(RenderbufferFormat::Stencil8), glow::STENCIL_INDEX8);
}

#[test]
fn test_attachment_point_mapping_follows_format() {
    // Format implies attachment point implies GL enum, end to end
    let cases = [
        (RenderbufferFormat::Depth24, glow::DEPTH_ATTACHMENT),
        (RenderbufferFormat::Depth24Stencil8, glow::DEPTH_STENCIL_ATTACHMENT),
        (RenderbufferFormat::Stencil8, glow::STENCIL_ATTACHMENT),
    ];
    for (format, expected) in cases {
        assert_eq!(attachment_point_to_gl(format.attachment_point()), expected);
    }
}
