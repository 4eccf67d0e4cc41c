//! Mock GraphicsDevice for unit and integration tests (no GPU required)
//!
//! Records every command and uniform write so tests can assert on the exact
//! sequence the submission pipeline and resource layer produce. Public
//! (not test-gated) so the `tests/` integration suites and headless tooling
//! can drive the full pipeline without a graphics context.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::renderer::{
    AttachmentId, BackendApi, BufferLayout, BufferUsage, ClearFlags, CullMode, DepthAttachment,
    DepthFunc, DeviceStats, Framebuffer, FramebufferDesc, FramebufferSpecification, GraphicsDevice,
    IndexBuffer, IndexBufferDesc, IndexType, Shader, ShaderDesc, Texture, Texture2DDesc,
    TextureCubeDesc, TextureFormat, TextureKind, VertexBuffer, VertexBufferDesc,
    resolve_attachment_index,
};
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

// ============================================================================
// Mock VertexBuffer
// ============================================================================

#[derive(Debug)]
pub struct MockVertexBuffer {
    layout: BufferLayout,
    pub data: Mutex<Vec<u8>>,
    pub usage: Mutex<BufferUsage>,
}

impl MockVertexBuffer {
    pub fn new(desc: VertexBufferDesc) -> Result<Self> {
        desc.validate()?;
        Ok(Self {
            layout: desc.layout,
            data: Mutex::new(desc.data.unwrap_or_default()),
            usage: Mutex::new(desc.usage),
        })
    }
}

impl VertexBuffer for MockVertexBuffer {
    fn bind(&self) {}

    fn unbind(&self) {}

    fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    fn set_data(&self, data: &[u8], usage: BufferUsage) -> Result<()> {
        self.layout.validate_data_len(data.len())?;
        *self.data.lock().unwrap() = data.to_vec();
        *self.usage.lock().unwrap() = usage;
        Ok(())
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut stored = self.data.lock().unwrap();
        let end = offset as usize + data.len();
        if end > stored.len() {
            stored.resize(end, 0);
        }
        stored[offset as usize..end].copy_from_slice(data);
        Ok(())
    }
}

// ============================================================================
// Mock IndexBuffer
// ============================================================================

#[derive(Debug)]
pub struct MockIndexBuffer {
    count: u32,
    index_type: IndexType,
}

impl MockIndexBuffer {
    pub fn new(desc: IndexBufferDesc) -> Self {
        Self { count: desc.indices.count(), index_type: desc.indices.index_type() }
    }
}

impl IndexBuffer for MockIndexBuffer {
    fn bind(&self) {}

    fn unbind(&self) {}

    fn count(&self) -> u32 {
        self.count
    }

    fn index_type(&self) -> IndexType {
        self.index_type
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    width: u32,
    height: u32,
    format: TextureFormat,
    kind: TextureKind,
    handle: u64,
}

impl MockTexture {
    pub fn new(width: u32, height: u32, format: TextureFormat, kind: TextureKind, handle: u64) -> Self {
        Self { width, height, format, kind, handle }
    }
}

impl Texture for MockTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn kind(&self) -> TextureKind {
        self.kind
    }

    fn handle(&self) -> u64 {
        self.handle
    }

    fn bind(&self, _slot: u32) {}

    fn unbind(&self, _slot: u32) {}
}

// ============================================================================
// Mock Shader
// ============================================================================

/// Mock shader recording every uniform write as a string, e.g.
/// `"set_vec3 u_Light[2].position"`.
#[derive(Debug)]
pub struct MockShader {
    name: String,
    bound: AtomicBool,
    pub writes: Mutex<Vec<String>>,
}

impl MockShader {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), bound: AtomicBool::new(false), writes: Mutex::new(Vec::new()) }
    }

    /// Snapshot of recorded uniform writes
    pub fn recorded_writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    /// Number of recorded writes whose uniform name starts with `prefix`
    pub fn writes_with_prefix(&self, prefix: &str) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.split_whitespace().nth(1).is_some_and(|n| n.starts_with(prefix)))
            .count()
    }

    fn record(&self, op: &str, uniform: &str) {
        // Auto-bind side effect, same as real backends
        if !self.is_bound() {
            self.bind();
        }
        self.writes.lock().unwrap().push(format!("{} {}", op, uniform));
    }
}

impl Shader for MockShader {
    fn bind(&self) {
        self.bound.store(true, Ordering::Relaxed);
    }

    fn unbind(&self) {
        self.bound.store(false, Ordering::Relaxed);
    }

    fn is_bound(&self) -> bool {
        self.bound.load(Ordering::Relaxed)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_bool(&self, name: &str, _value: bool) {
        self.record("set_bool", name);
    }

    fn set_int(&self, name: &str, _value: i32) {
        self.record("set_int", name);
    }

    fn set_float(&self, name: &str, _value: f32) {
        self.record("set_float", name);
    }

    fn set_vec2(&self, name: &str, _value: Vec2) {
        self.record("set_vec2", name);
    }

    fn set_vec3(&self, name: &str, _value: Vec3) {
        self.record("set_vec3", name);
    }

    fn set_vec4(&self, name: &str, _value: Vec4) {
        self.record("set_vec4", name);
    }

    fn set_mat3(&self, name: &str, _value: &Mat3) {
        self.record("set_mat3", name);
    }

    fn set_mat4(&self, name: &str, _value: &Mat4) {
        self.record("set_mat4", name);
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

struct MockFramebufferState {
    spec: FramebufferSpecification,
    colors: Vec<AttachmentId>,
    depth: DepthAttachment<AttachmentId, AttachmentId>,
    active_color: usize,
}

pub struct MockFramebuffer {
    desc: FramebufferDesc,
    state: Mutex<MockFramebufferState>,
    handles: Arc<AtomicU64>,
}

impl MockFramebuffer {
    pub fn new(desc: FramebufferDesc, handles: Arc<AtomicU64>) -> Self {
        let state = Self::invalidate(&desc, desc.spec, &handles);
        Self { desc, state: Mutex::new(state), handles }
    }

    /// Allocate fake attachment handles per the construction descriptor
    fn invalidate(
        desc: &FramebufferDesc,
        spec: FramebufferSpecification,
        handles: &AtomicU64,
    ) -> MockFramebufferState {
        let spec = spec.sanitized();
        let colors = (0..desc.color_attachments)
            .map(|_| handles.fetch_add(1, Ordering::Relaxed))
            .collect();
        let depth = if desc.depth_attachments > 0 {
            DepthAttachment::Textures(
                (0..desc.depth_attachments)
                    .map(|_| handles.fetch_add(1, Ordering::Relaxed))
                    .collect(),
            )
        } else if desc.renderbuffer.is_some() {
            DepthAttachment::Renderbuffer(handles.fetch_add(1, Ordering::Relaxed))
        } else {
            DepthAttachment::None
        };
        MockFramebufferState { spec, colors, depth, active_color: 0 }
    }
}

impl Framebuffer for MockFramebuffer {
    fn bind(&self) {}

    fn unbind(&self) {}

    fn specification(&self) -> FramebufferSpecification {
        self.state.lock().unwrap().spec
    }

    fn rebuild(&self, spec: FramebufferSpecification) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state = Self::invalidate(&self.desc, spec, &self.handles);
        Ok(())
    }

    fn color_attachment_count(&self) -> usize {
        self.state.lock().unwrap().colors.len()
    }

    fn color_attachment(&self, index: usize) -> AttachmentId {
        let state = self.state.lock().unwrap();
        match resolve_attachment_index(state.colors.len(), index) {
            Some(i) => state.colors[i],
            None => 0,
        }
    }

    fn depth_attachment_id(&self, index: usize) -> AttachmentId {
        let state = self.state.lock().unwrap();
        match &state.depth {
            DepthAttachment::Textures(ids) => match resolve_attachment_index(ids.len(), index) {
                Some(i) => ids[i],
                None => 0,
            },
            _ => 0,
        }
    }

    fn active_color_attachment(&self) -> usize {
        self.state.lock().unwrap().active_color
    }

    fn draw_to_next(&self) {
        let mut state = self.state.lock().unwrap();
        let count = state.colors.len();
        if count > 0 {
            state.active_color = (state.active_color + 1) % count;
        }
    }
}

// ============================================================================
// Mock Device
// ============================================================================

/// Mock GraphicsDevice that records commands and created resources
pub struct MockDevice {
    /// Command log, in issue order (e.g. "set_cull_mode Front", "draw_indexed 36")
    pub commands: Mutex<Vec<String>>,
    /// Names of created resources, in creation order
    pub created: Mutex<Vec<String>>,
    next_handle: Arc<AtomicU64>,
}

impl MockDevice {
    pub fn new() -> Self {
        // Handle 0 means "no attachment", so fake handles start at 1
        Self {
            commands: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            next_handle: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Snapshot of the command log
    pub fn recorded_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    /// Snapshot of created resource names
    pub fn created_resources(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    /// Clear the command log (created-resource list is kept)
    pub fn clear_commands(&self) {
        self.commands.lock().unwrap().clear();
    }

    fn record(&self, command: String) {
        self.commands.lock().unwrap().push(command);
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockDevice {
    fn create_vertex_buffer(&self, desc: VertexBufferDesc) -> Result<Arc<dyn VertexBuffer>> {
        let size = desc.data.as_ref().map(|d| d.len() as u64).unwrap_or(desc.size);
        self.created.lock().unwrap().push(format!("vertex_buffer_{}", size));
        Ok(Arc::new(MockVertexBuffer::new(desc)?))
    }

    fn create_index_buffer(&self, desc: IndexBufferDesc) -> Result<Arc<dyn IndexBuffer>> {
        self.created.lock().unwrap().push(format!("index_buffer_{}", desc.indices.count()));
        Ok(Arc::new(MockIndexBuffer::new(desc)))
    }

    fn create_framebuffer(&self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        self.created
            .lock()
            .unwrap()
            .push(format!("framebuffer_{}x{}", desc.spec.width, desc.spec.height));
        Ok(Arc::new(MockFramebuffer::new(desc, self.next_handle.clone())))
    }

    fn create_texture_2d(&self, desc: Texture2DDesc) -> Result<Arc<dyn Texture>> {
        desc.validate()?;
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        self.created.lock().unwrap().push(format!("texture2d_{}x{}", desc.width, desc.height));
        Ok(Arc::new(MockTexture::new(
            desc.width,
            desc.height,
            desc.format,
            TextureKind::Texture2D,
            handle,
        )))
    }

    fn create_texture_cube(&self, desc: TextureCubeDesc) -> Result<Arc<dyn Texture>> {
        desc.validate()?;
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        self.created.lock().unwrap().push(format!("texture_cube_{}x{}", desc.width, desc.height));
        Ok(Arc::new(MockTexture::new(
            desc.width,
            desc.height,
            desc.format,
            TextureKind::Cubemap,
            handle,
        )))
    }

    fn create_shader(&self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        self.created.lock().unwrap().push(format!("shader_{}", desc.name));
        Ok(Arc::new(MockShader::new(desc.name)))
    }

    fn set_clear_color(&self, color: Vec4) {
        self.record(format!("set_clear_color {:?}", color));
    }

    fn clear(&self, flags: ClearFlags) {
        self.record(format!("clear {:?}", flags));
    }

    fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        self.record(format!("set_viewport {} {} {} {}", x, y, width, height));
    }

    fn set_cull_mode(&self, mode: CullMode) {
        self.record(format!("set_cull_mode {:?}", mode));
    }

    fn set_depth_func(&self, func: DepthFunc) {
        self.record(format!("set_depth_func {:?}", func));
    }

    fn set_depth_mask(&self, enabled: bool) {
        self.record(format!("set_depth_mask {}", enabled));
    }

    fn set_wireframe(&self, enabled: bool) {
        self.record(format!("set_wireframe {}", enabled));
    }

    fn draw_indexed(&self, index_count: u32, _index_type: IndexType) -> Result<()> {
        self.record(format!("draw_indexed {}", index_count));
        Ok(())
    }

    fn draw_indexed_lines(&self, index_count: u32, _index_type: IndexType) -> Result<()> {
        self.record(format!("draw_indexed_lines {}", index_count));
        Ok(())
    }

    fn draw_arrays(&self, first: u32, vertex_count: u32) -> Result<()> {
        self.record(format!("draw_arrays {} {}", first, vertex_count));
        Ok(())
    }

    fn draw_lines(&self, first: u32, vertex_count: u32) -> Result<()> {
        self.record(format!("draw_lines {} {}", first, vertex_count));
        Ok(())
    }

    fn api(&self) -> BackendApi {
        BackendApi::Mock
    }

    fn stats(&self) -> DeviceStats {
        DeviceStats { resources_created: self.created.lock().unwrap().len() as u64 }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
