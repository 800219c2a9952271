//! Mock GPU context for testing the backdrop renderer
//!
//! [`MockGpu`] implements `GpuContext` by handing out integer ids and
//! recording every call, so tests can assert on draw counts, resource
//! lifetimes and uploaded data without a browser. Clones share state: keep
//! one clone for assertions and give the other to the renderer.
//!
//! [`MockCanvas`] implements `CanvasSurface` with a settable layout size and
//! device pixel ratio.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use backdrop_engine::gpu::{
    BufferTarget, BufferUsage, CanvasSurface, DrawCall, FramebufferStatus, GpuContext,
    ProgramLayout, ShaderStage,
};

/// Resource category, for counting
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MockResource {
    Shader,
    Program,
    Buffer,
    Texture,
    Framebuffer,
}

/// Raw handle issued by the mock
///
/// Deliberately not `Clone`: a handle can be deleted only once.
#[derive(Debug, PartialEq, Eq)]
pub struct MockId(pub u32);

/// Shader handle, remembering its stage
#[derive(Debug, PartialEq, Eq)]
pub struct MockShader {
    pub id: u32,
    pub stage: ShaderStage,
}

/// One recorded `draw`
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRecord {
    /// `None` when drawing to the canvas
    pub framebuffer: Option<u32>,
    pub cleared: Option<[f32; 4]>,
    pub program: u32,
    pub uniforms: Vec<u8>,
    pub buffers: Vec<u32>,
    pub texture: Option<u32>,
    pub vertex_count: u32,
    pub instance_count: u32,
}

impl DrawRecord {
    pub fn to_screen(&self) -> bool {
        self.framebuffer.is_none()
    }
}

struct BufferRecord {
    data: Vec<u8>,
    usage: BufferUsage,
}

#[derive(Default)]
struct MockState {
    next_id: Cell<u32>,
    live: RefCell<BTreeMap<u32, MockResource>>,
    created: RefCell<BTreeMap<MockResource, usize>>,
    deleted: RefCell<BTreeMap<MockResource, usize>>,
    buffers: RefCell<BTreeMap<u32, BufferRecord>>,
    textures: RefCell<BTreeMap<u32, (u32, u32)>>,
    program_layouts: RefCell<BTreeMap<u32, &'static str>>,
    draws: RefCell<Vec<DrawRecord>>,
    in_frame: Cell<bool>,
    frames: Cell<usize>,
    surface_size: Cell<Option<(u32, u32)>>,
    violations: RefCell<Vec<String>>,
    log: RefCell<Vec<String>>,

    fail_stage: Cell<Option<ShaderStage>>,
    fail_link: Cell<bool>,
    fail_buffers: Cell<bool>,
    fail_textures: Cell<bool>,
    framebuffer_status: Cell<Option<FramebufferStatus>>,
    skip_frames: Cell<bool>,
}

/// Recording `GpuContext`
#[derive(Clone, Default)]
pub struct MockGpu {
    state: Rc<MockState>,
}

impl MockGpu {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Failure injection
    // ========================================================================

    /// Make every compile of `stage` fail
    pub fn fail_shader_compile(&self, stage: ShaderStage) {
        self.state.fail_stage.set(Some(stage));
    }

    pub fn fail_link(&self) {
        self.state.fail_link.set(true);
    }

    pub fn fail_buffers(&self, fail: bool) {
        self.state.fail_buffers.set(fail);
    }

    pub fn fail_textures(&self, fail: bool) {
        self.state.fail_textures.set(fail);
    }

    /// Status reported for every framebuffer (`Complete` when unset)
    pub fn set_framebuffer_status(&self, status: FramebufferStatus) {
        self.state.framebuffer_status.set(Some(status));
    }

    /// Make `begin_frame` report that no canvas image is available
    pub fn skip_frames(&self, skip: bool) {
        self.state.skip_frames.set(skip);
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.state.draws.borrow().clone()
    }

    pub fn draw_count(&self) -> usize {
        self.state.draws.borrow().len()
    }

    /// Draws that cleared their target first
    pub fn clear_count(&self) -> usize {
        self.state
            .draws
            .borrow()
            .iter()
            .filter(|d| d.cleared.is_some())
            .count()
    }

    pub fn clear_draws(&self) {
        self.state.draws.borrow_mut().clear();
    }

    /// Completed frames (`end_frame` calls inside a frame)
    pub fn frame_count(&self) -> usize {
        self.state.frames.get()
    }

    /// Resources created and not yet deleted
    pub fn live_count(&self) -> usize {
        self.state.live.borrow().len()
    }

    pub fn live_of(&self, kind: MockResource) -> usize {
        self.state
            .live
            .borrow()
            .values()
            .filter(|k| **k == kind)
            .count()
    }

    pub fn created_of(&self, kind: MockResource) -> usize {
        self.state.created.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn deleted_of(&self, kind: MockResource) -> usize {
        self.state.deleted.borrow().get(&kind).copied().unwrap_or(0)
    }

    /// Current contents of a live buffer
    pub fn buffer_data(&self, id: u32) -> Option<Vec<u8>> {
        self.state.buffers.borrow().get(&id).map(|b| b.data.clone())
    }

    /// Sizes of the live textures
    pub fn texture_sizes(&self) -> Vec<(u32, u32)> {
        self.state.textures.borrow().values().copied().collect()
    }

    /// Label of the layout a live program was linked with
    pub fn program_label(&self, id: u32) -> Option<&'static str> {
        self.state.program_layouts.borrow().get(&id).copied()
    }

    /// Last size passed to `resize_surface`
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.state.surface_size.get()
    }

    /// Misuse detected so far: double deletes, writes to static or dead
    /// buffers, draws outside a frame, dangling handles in draws
    pub fn violations(&self) -> Vec<String> {
        self.state.violations.borrow().clone()
    }

    pub fn get_log(&self) -> Vec<String> {
        self.state.log.borrow().clone()
    }

    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.state.log.borrow().iter().any(|msg| msg.contains(substr))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn record(&self, msg: String) {
        self.state.log.borrow_mut().push(msg);
    }

    fn violation(&self, msg: String) {
        self.record(format!("violation: {}", msg));
        self.state.violations.borrow_mut().push(msg);
    }

    fn allocate(&self, kind: MockResource) -> u32 {
        let id = self.state.next_id.get() + 1;
        self.state.next_id.set(id);
        self.state.live.borrow_mut().insert(id, kind);
        *self.state.created.borrow_mut().entry(kind).or_insert(0) += 1;
        self.record(format!("create {:?} {}", kind, id));
        id
    }

    fn release(&self, kind: MockResource, id: u32) {
        match self.state.live.borrow_mut().remove(&id) {
            Some(live_kind) if live_kind == kind => {}
            Some(other) => {
                self.violation(format!("deleted {:?} {} as {:?}", other, id, kind));
            }
            None => self.violation(format!("double delete of {:?} {}", kind, id)),
        }
        *self.state.deleted.borrow_mut().entry(kind).or_insert(0) += 1;
        self.record(format!("delete {:?} {}", kind, id));
    }

    fn check_live(&self, kind: MockResource, id: u32) {
        if self.state.live.borrow().get(&id) != Some(&kind) {
            self.violation(format!("draw uses dead {:?} {}", kind, id));
        }
    }
}

impl GpuContext for MockGpu {
    type Shader = MockShader;
    type Program = MockId;
    type Buffer = MockId;
    type Texture = MockId;
    type Framebuffer = MockId;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<MockShader, String> {
        if self.state.fail_stage.get() == Some(stage) {
            self.record(format!("compile {} failed", stage.name()));
            return Err(format!("ERROR: 0:1: mock {} compile failure", stage.name()));
        }
        if source.trim().is_empty() {
            return Err("ERROR: empty source".into());
        }
        let id = self.allocate(MockResource::Shader);
        Ok(MockShader { id, stage })
    }

    fn link_program(
        &self,
        layout: &ProgramLayout,
        vertex: &MockShader,
        fragment: &MockShader,
    ) -> Result<MockId, String> {
        if self.state.fail_link.get() {
            self.record(format!("link {} failed", layout.label));
            return Err("mock link failure".into());
        }
        if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
            return Err("stages passed in the wrong order".into());
        }
        let id = self.allocate(MockResource::Program);
        self.state
            .program_layouts
            .borrow_mut()
            .insert(id, layout.label);
        Ok(MockId(id))
    }

    fn create_buffer(
        &self,
        data: &[u8],
        _target: BufferTarget,
        usage: BufferUsage,
    ) -> Option<MockId> {
        if self.state.fail_buffers.get() {
            return None;
        }
        let id = self.allocate(MockResource::Buffer);
        self.state.buffers.borrow_mut().insert(
            id,
            BufferRecord {
                data: data.to_vec(),
                usage,
            },
        );
        Some(MockId(id))
    }

    fn write_buffer(&self, buffer: &MockId, data: &[u8]) {
        let problem = match self.state.buffers.borrow_mut().get_mut(&buffer.0) {
            None => Some(format!("write to dead buffer {}", buffer.0)),
            Some(record) if record.usage == BufferUsage::Static => {
                Some(format!("write to static buffer {}", buffer.0))
            }
            Some(record) if data.len() > record.data.len() => Some(format!(
                "write of {} bytes overflows buffer {} of {}",
                data.len(),
                buffer.0,
                record.data.len()
            )),
            Some(record) => {
                record.data[..data.len()].copy_from_slice(data);
                None
            }
        };
        if let Some(msg) = problem {
            self.violation(msg);
        }
    }

    fn create_texture(&self, width: u32, height: u32) -> Option<MockId> {
        if self.state.fail_textures.get() || width == 0 || height == 0 {
            return None;
        }
        let id = self.allocate(MockResource::Texture);
        self.state.textures.borrow_mut().insert(id, (width, height));
        Some(MockId(id))
    }

    fn create_framebuffer(&self, texture: &MockId) -> Option<MockId> {
        if !self.state.textures.borrow().contains_key(&texture.0) {
            return None;
        }
        Some(MockId(self.allocate(MockResource::Framebuffer)))
    }

    fn framebuffer_status(&self, _framebuffer: &MockId) -> FramebufferStatus {
        self.state
            .framebuffer_status
            .get()
            .unwrap_or(FramebufferStatus::Complete)
    }

    fn resize_surface(&self, width: u32, height: u32) {
        self.state.surface_size.set(Some((width, height)));
        self.record(format!("resize surface {}x{}", width, height));
    }

    fn begin_frame(&self) -> bool {
        if self.state.skip_frames.get() {
            return false;
        }
        if self.state.in_frame.replace(true) {
            self.violation("begin_frame inside a frame".into());
        }
        true
    }

    fn draw(&self, call: &DrawCall<'_, Self>) {
        if !self.state.in_frame.get() {
            self.violation("draw outside a frame".into());
        }
        self.check_live(MockResource::Program, call.program.0);
        for buffer in call.vertex_buffers {
            self.check_live(MockResource::Buffer, buffer.0);
        }
        if let Some(framebuffer) = call.target {
            self.check_live(MockResource::Framebuffer, framebuffer.0);
        }
        if let Some(texture) = call.texture {
            self.check_live(MockResource::Texture, texture.0);
        }

        self.state.draws.borrow_mut().push(DrawRecord {
            framebuffer: call.target.map(|fb| fb.0),
            cleared: call.clear,
            program: call.program.0,
            uniforms: call.uniforms.to_vec(),
            buffers: call.vertex_buffers.iter().map(|b| b.0).collect(),
            texture: call.texture.map(|t| t.0),
            vertex_count: call.vertex_count,
            instance_count: call.instance_count,
        });
    }

    fn end_frame(&self) {
        if self.state.in_frame.replace(false) {
            self.state.frames.set(self.state.frames.get() + 1);
        } else {
            self.violation("end_frame outside a frame".into());
        }
    }

    fn delete_shader(&self, shader: MockShader) {
        self.release(MockResource::Shader, shader.id);
    }

    fn delete_program(&self, program: MockId) {
        self.state.program_layouts.borrow_mut().remove(&program.0);
        self.release(MockResource::Program, program.0);
    }

    fn delete_buffer(&self, buffer: MockId) {
        self.state.buffers.borrow_mut().remove(&buffer.0);
        self.release(MockResource::Buffer, buffer.0);
    }

    fn delete_texture(&self, texture: MockId) {
        self.state.textures.borrow_mut().remove(&texture.0);
        self.release(MockResource::Texture, texture.0);
    }

    fn delete_framebuffer(&self, framebuffer: MockId) {
        self.release(MockResource::Framebuffer, framebuffer.0);
    }
}

/// Canvas with a settable layout size and pixel ratio
///
/// Starts with the HTML default backing store of 300×150.
#[derive(Clone, Debug, PartialEq)]
pub struct MockCanvas {
    client: (f64, f64),
    dpr: f64,
    size: (u32, u32),
}

impl MockCanvas {
    pub fn new(client_width: f64, client_height: f64, dpr: f64) -> Self {
        Self {
            client: (client_width, client_height),
            dpr,
            size: (300, 150),
        }
    }

    /// Change the layout size, as a CSS resize would
    pub fn set_client_size(&mut self, width: f64, height: f64) {
        self.client = (width, height);
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }
}

impl CanvasSurface for MockCanvas {
    fn client_size(&self) -> (f64, f64) {
        self.client
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_tracked() {
        let gpu = MockGpu::new();
        let a = gpu.create_buffer(&[0; 4], BufferTarget::Array, BufferUsage::Static);
        let b = gpu.create_buffer(&[0; 4], BufferTarget::Array, BufferUsage::Static);
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a, b);
        assert_eq!(gpu.live_of(MockResource::Buffer), 2);

        gpu.delete_buffer(a);
        assert_eq!(gpu.live_count(), 1);
        assert_eq!(gpu.deleted_of(MockResource::Buffer), 1);
        assert!(gpu.violations().is_empty());
    }

    #[test]
    fn test_double_delete_is_a_violation() {
        let gpu = MockGpu::new();
        let texture = gpu.create_texture(4, 4).unwrap();
        let id = texture.0;
        gpu.delete_texture(texture);
        gpu.delete_texture(MockId(id));
        assert_eq!(gpu.violations().len(), 1);
    }

    #[test]
    fn test_static_buffer_rejects_writes() {
        let gpu = MockGpu::new();
        let buffer = gpu
            .create_buffer(&[1, 2, 3, 4], BufferTarget::Array, BufferUsage::Static)
            .unwrap();
        gpu.write_buffer(&buffer, &[9, 9, 9, 9]);
        assert_eq!(gpu.buffer_data(buffer.0), Some(vec![1, 2, 3, 4]));
        assert!(gpu.has_log_containing("static buffer"));
    }

    #[test]
    fn test_dynamic_buffer_accepts_writes() {
        let gpu = MockGpu::new();
        let buffer = gpu
            .create_buffer(&[0; 8], BufferTarget::Array, BufferUsage::Dynamic)
            .unwrap();
        gpu.write_buffer(&buffer, &[7; 8]);
        assert_eq!(gpu.buffer_data(buffer.0), Some(vec![7; 8]));
        assert!(gpu.violations().is_empty());
    }

    #[test]
    fn test_compile_failure_injection() {
        let gpu = MockGpu::new();
        gpu.fail_shader_compile(ShaderStage::Fragment);
        assert!(gpu.compile_shader(ShaderStage::Vertex, "vs").is_ok());
        let err = gpu.compile_shader(ShaderStage::Fragment, "fs").unwrap_err();
        assert!(err.contains("fragment"));
    }

    #[test]
    fn test_frame_bracketing() {
        let gpu = MockGpu::new();
        assert!(gpu.begin_frame());
        gpu.end_frame();
        gpu.end_frame();
        assert_eq!(gpu.frame_count(), 1);
        assert_eq!(gpu.violations().len(), 1);
    }

    #[test]
    fn test_mock_canvas_defaults_to_html_size() {
        let canvas = MockCanvas::new(800.0, 600.0, 2.0);
        assert_eq!(canvas.size(), (300, 150));
        assert_eq!(canvas.client_size(), (800.0, 600.0));
    }
}
