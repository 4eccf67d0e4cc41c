//! Render target objects: framebuffer and renderbuffer specifications and
//! the framebuffer lifecycle trait.
//!
//! Lifecycle: `{Uninitialized} --Invalidate--> {Ready} --Rebuild--> {Ready}`.
//! Construction through `GraphicsDevice::create_framebuffer` performs the
//! first invalidation, so a framebuffer handed to the caller is always
//! `{Ready}`. `rebuild` tears every attachment down and re-invalidates with
//! the original attachment layout at the new dimensions.

use crate::engine_warn;
use crate::error::Result;

/// Opaque GPU attachment handle exposed for display/debug purposes.
/// 0 means "no attachment".
pub type AttachmentId = u64;

// ============================================================================
// Specifications and formats
// ============================================================================

/// Color attachment precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAttachmentFormat {
    /// 8-bit RGBA
    Sdr,
    /// 16-bit float RGBA
    Hdr,
}

/// Framebuffer size and color precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferSpecification {
    pub width: u32,
    pub height: u32,
    pub color_format: ColorAttachmentFormat,
}

impl Default for FramebufferSpecification {
    fn default() -> Self {
        Self { width: 1280, height: 720, color_format: ColorAttachmentFormat::Sdr }
    }
}

impl FramebufferSpecification {
    /// Clamp dimensions to >= 1, warning when a clamp occurs
    ///
    /// Degraded tier: a zero-sized framebuffer request renders into a 1x1
    /// target instead of failing.
    pub fn sanitized(mut self) -> Self {
        if self.width < 1 || self.height < 1 {
            engine_warn!(
                "stellar3d::Framebuffer",
                "Framebuffer dimensions {}x{} clamped to a minimum of 1x1",
                self.width,
                self.height
            );
            self.width = self.width.max(1);
            self.height = self.height.max(1);
        }
        self
    }
}

/// Renderbuffer storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderbufferFormat {
    Depth16,
    Depth24,
    Depth32F,
    Depth24Stencil8,
    Depth32FStencil8,
    Stencil8,
}

/// Framebuffer attachment point implied by a renderbuffer format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentPoint {
    Depth,
    DepthStencil,
    Stencil,
}

impl RenderbufferFormat {
    /// Attachment point this format binds to
    ///
    /// Pure and idempotent: depth-only formats map to the depth attachment,
    /// combined formats to depth-stencil, stencil-only to stencil.
    pub fn attachment_point(self) -> AttachmentPoint {
        match self {
            RenderbufferFormat::Depth16
            | RenderbufferFormat::Depth24
            | RenderbufferFormat::Depth32F => AttachmentPoint::Depth,
            RenderbufferFormat::Depth24Stencil8 | RenderbufferFormat::Depth32FStencil8 => {
                AttachmentPoint::DepthStencil
            }
            RenderbufferFormat::Stencil8 => AttachmentPoint::Stencil,
        }
    }
}

/// Renderbuffer size and storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderbufferSpecification {
    pub width: u32,
    pub height: u32,
    pub format: RenderbufferFormat,
}

// ============================================================================
// Framebuffer descriptor
// ============================================================================

/// Descriptor for creating a framebuffer
///
/// The depth path is either `depth_attachments` depth-stencil textures or a
/// single renderbuffer; when both are given the textures win and the
/// renderbuffer spec is ignored for that invalidation, matching the original
/// call-argument precedence.
#[derive(Debug, Clone)]
pub struct FramebufferDesc {
    pub spec: FramebufferSpecification,
    /// Number of color texture attachments
    pub color_attachments: u32,
    /// Number of depth-stencil texture attachments (see DepthAttachment)
    pub depth_attachments: u32,
    /// Renderbuffer depth path, used only when `depth_attachments == 0`
    pub renderbuffer: Option<RenderbufferSpecification>,
}

impl Default for FramebufferDesc {
    fn default() -> Self {
        Self {
            spec: FramebufferSpecification::default(),
            color_attachments: 1,
            depth_attachments: 1,
            renderbuffer: None,
        }
    }
}

/// The depth path of a framebuffer, exclusive by construction
///
/// Generic over the backend's texture and renderbuffer handle types so each
/// backend stores its native handles. Note on `Textures`: every allocated
/// depth texture is tracked, but they are all bound to the single
/// depth-stencil attachment point in order, so only the *last* one is the
/// live attachment (preserved from the original engine's observable
/// behavior).
#[derive(Debug)]
pub enum DepthAttachment<Tex, Rb> {
    None,
    Textures(Vec<Tex>),
    Renderbuffer(Rb),
}

impl<Tex, Rb> DepthAttachment<Tex, Rb> {
    pub fn is_none(&self) -> bool {
        matches!(self, DepthAttachment::None)
    }
}

// ============================================================================
// Attachment lookup policy
// ============================================================================

/// Resolve an attachment index with the out-of-range fallback policy
///
/// Out-of-range requests fall back to the last attachment; `None` only when
/// the collection is empty. Shared by all backends so the degraded-lookup
/// behavior cannot diverge.
pub fn resolve_attachment_index(count: usize, requested: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if requested < count {
        Some(requested)
    } else {
        engine_warn!(
            "stellar3d::Framebuffer",
            "Attachment index {} out of range ({} attachments), falling back to the last one",
            requested,
            count
        );
        Some(count - 1)
    }
}

// ============================================================================
// Framebuffer trait
// ============================================================================

/// Framebuffer resource trait
///
/// Implemented by backend-specific framebuffers (e.g. GlFramebuffer).
/// All attachments and the framebuffer object are released on drop.
pub trait Framebuffer: Send + Sync {
    /// Bind as the render target for subsequent draws
    fn bind(&self);

    /// Restore the default render target
    fn unbind(&self);

    /// Current (sanitized) specification
    fn specification(&self) -> FramebufferSpecification;

    /// Tear down all attachments and re-invalidate with `spec`
    ///
    /// The attachment layout (color/depth counts or renderbuffer) from the
    /// original construction descriptor is reproduced at the new size.
    fn rebuild(&self, spec: FramebufferSpecification) -> Result<()>;

    /// Number of color attachments
    fn color_attachment_count(&self) -> usize;

    /// Handle of the nth color attachment (fallback policy on out-of-range)
    fn color_attachment(&self, index: usize) -> AttachmentId;

    /// Handle of the nth depth texture attachment (fallback policy), 0 when
    /// the depth path is a renderbuffer or absent
    fn depth_attachment_id(&self, index: usize) -> AttachmentId;

    /// Index of the color attachment the next draw targets
    fn active_color_attachment(&self) -> usize;

    /// Advance the draw target to the next color attachment, wrapping to 0
    /// past the last one
    fn draw_to_next(&self);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
