//! Unit tests for the framebuffer module
//!
//! Tests specification sanitization, renderbuffer attachment-point mapping
//! and the shared attachment index fallback policy.

use crate::renderer::{
    resolve_attachment_index, AttachmentPoint, ColorAttachmentFormat, FramebufferDesc,
    FramebufferSpecification, RenderbufferFormat,
};

// ============================================================================
// SPECIFICATION TESTS
// ============================================================================

#[test]
fn test_default_specification() {
    let spec = FramebufferSpecification::default();
    assert_eq!(spec.width, 1280);
    assert_eq!(spec.height, 720);
    assert_eq!(spec.color_format, ColorAttachmentFormat::Sdr);
}

#[test]
fn test_sanitized_clamps_zero_dimensions() {
    let spec = FramebufferSpecification {
        width: 0,
        height: 0,
        color_format: ColorAttachmentFormat::Sdr,
    }
    .sanitized();
    assert_eq!(spec.width, 1);
    assert_eq!(spec.height, 1);
}

#[test]
fn test_sanitized_clamps_single_zero_dimension() {
    let spec = FramebufferSpecification {
        width: 800,
        height: 0,
        color_format: ColorAttachmentFormat::Hdr,
    }
    .sanitized();
    assert_eq!(spec.width, 800);
    assert_eq!(spec.height, 1);
    assert_eq!(spec.color_format, ColorAttachmentFormat::Hdr);
}

#[test]
fn test_sanitized_keeps_valid_dimensions() {
    let spec = FramebufferSpecification {
        width: 1920,
        height: 1080,
        color_format: ColorAttachmentFormat::Hdr,
    };
    assert_eq!(spec.sanitized(), spec);
}

// ============================================================================
// RENDERBUFFER FORMAT TESTS
// ============================================================================

#[test]
fn test_attachment_point_depth_formats() {
    assert_eq!(RenderbufferFormat::Depth16.attachment_point(), AttachmentPoint::Depth);
    assert_eq!(RenderbufferFormat::Depth24.attachment_point(), AttachmentPoint::Depth);
    assert_eq!(RenderbufferFormat::Depth32F.attachment_point(), AttachmentPoint::Depth);
}

#[test]
fn test_attachment_point_combined_formats() {
    assert_eq!(
        RenderbufferFormat::Depth24Stencil8.attachment_point(),
        AttachmentPoint::DepthStencil
    );
    assert_eq!(
        RenderbufferFormat::Depth32FStencil8.attachment_point(),
        AttachmentPoint::DepthStencil
    );
}

#[test]
fn test_attachment_point_stencil_format() {
    assert_eq!(RenderbufferFormat::Stencil8.attachment_point(), AttachmentPoint::Stencil);
}

#[test]
fn test_attachment_point_is_stable() {
    // Repeated calls always produce the same mapping
    for _ in 0..3 {
        assert_eq!(
            RenderbufferFormat::Depth24Stencil8.attachment_point(),
            AttachmentPoint::DepthStencil
        );
    }
}

// ============================================================================
// ATTACHMENT INDEX FALLBACK TESTS
// ============================================================================

#[test]
fn test_resolve_in_range_index() {
    assert_eq!(resolve_attachment_index(4, 0), Some(0));
    assert_eq!(resolve_attachment_index(4, 3), Some(3));
}

#[test]
fn test_resolve_out_of_range_falls_back_to_last() {
    assert_eq!(resolve_attachment_index(4, 4), Some(3));
    assert_eq!(resolve_attachment_index(4, 100), Some(3));
    assert_eq!(resolve_attachment_index(1, 7), Some(0));
}

#[test]
fn test_resolve_empty_collection_is_none() {
    assert_eq!(resolve_attachment_index(0, 0), None);
    assert_eq!(resolve_attachment_index(0, 5), None);
}

// ============================================================================
// DESCRIPTOR TESTS
// ============================================================================

#[test]
fn test_framebuffer_desc_default() {
    let desc = FramebufferDesc::default();
    assert_eq!(desc.color_attachments, 1);
    assert_eq!(desc.depth_attachments, 1);
    assert!(desc.renderbuffer.is_none());
}
