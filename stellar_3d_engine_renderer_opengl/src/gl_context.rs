//! Shared handle to the glow context.
//!
//! glow's native context holds raw function pointers and a raw callback
//! slot, so it is neither `Send` nor `Sync` on its own, while the engine's
//! resource traits require both. The wrapper carries the contract the
//! backend already imposes: every GL call happens on the thread that owns
//! the context, and any cross-thread handoff of backend objects is
//! externally synchronized.

use std::ops::Deref;
use std::sync::Arc;

/// Cloneable handle shared by every backend object
#[derive(Clone)]
pub(crate) struct GlContext(Arc<glow::Context>);

// Invariant: GL calls only ever run on the context-owning thread; handles
// may travel between threads but are never used off it.
unsafe impl Send for GlContext {}
unsafe impl Sync for GlContext {}

impl GlContext {
    pub(crate) fn from_arc(gl: Arc<glow::Context>) -> Self {
        Self(gl)
    }
}

impl Deref for GlContext {
    type Target = glow::Context;

    fn deref(&self) -> &glow::Context {
        &self.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "gl_context_tests.rs"]
mod tests;
