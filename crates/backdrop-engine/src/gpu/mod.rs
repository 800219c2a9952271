//! GPU backend seam and resource helpers
//!
//! [`GpuContext`] is the narrow set of operations the renderer needs from a
//! graphics API. The wgpu implementation lives in [`wgpu_context`] (feature
//! `wasm`); tests use the recording context from `backdrop-gpu-mock`.
//!
//! Raw handles are wrapped in [`GpuHandle`]s that release themselves through
//! the owning context when dropped, so replacing a field is enough to free
//! the old resource.

mod canvas;
mod handle;
mod util;

#[cfg(feature = "wasm")]
pub mod wgpu_context;

pub use canvas::{backing_size, resize_canvas, CanvasSurface};
pub use handle::{
    Buffer, BufferKind, Framebuffer, FramebufferKind, GpuHandle, Program, ProgramKind,
    ResourceKind, Shader, ShaderKind, Texture, TextureKind,
};
pub use util::{
    compile_shader, create_buffer, create_framebuffer, create_program,
    create_program_from_sources, RenderTexture,
};

/// Shader pipeline stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// What a buffer is bound as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BufferTarget {
    #[default]
    Array,
    ElementArray,
}

/// Update frequency hint; dynamic buffers accept `write_buffer`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BufferUsage {
    #[default]
    Static,
    Dynamic,
}

/// Vertex attribute component layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeFormat {
    Float32,
    Float32x2,
}

impl AttributeFormat {
    pub fn size(&self) -> u64 {
        match self {
            AttributeFormat::Float32 => 4,
            AttributeFormat::Float32x2 => 8,
        }
    }
}

/// Whether an attribute advances per vertex or per instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepMode {
    Vertex,
    Instance,
}

/// One attribute, fed from its own buffer slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexSlot {
    pub name: &'static str,
    pub location: u32,
    pub format: AttributeFormat,
    pub step: StepMode,
}

/// Where a program's fragments land
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// The off-screen RGBA8 texture
    Offscreen,
    /// The canvas surface
    Screen,
}

/// Fixed-function state and interface of a program
#[derive(Clone, Copy, Debug)]
pub struct ProgramLayout {
    pub label: &'static str,
    /// One buffer per slot, bound in slot order
    pub attributes: &'static [VertexSlot],
    /// Size of the uniform block in bytes (multiple of 16)
    pub uniform_size: u64,
    /// Whether the fragment stage samples a texture at group 1
    pub samples_texture: bool,
    /// Standard `src_alpha, one_minus_src_alpha` blending
    pub alpha_blend: bool,
    pub output: OutputTarget,
}

/// Framebuffer completeness, with the conventional GL status codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    IncompleteAttachment,
    IncompleteDimensions,
    Unsupported,
}

impl FramebufferStatus {
    pub fn code(&self) -> u32 {
        match self {
            FramebufferStatus::Complete => 0x8CD5,
            FramebufferStatus::IncompleteAttachment => 0x8CD6,
            FramebufferStatus::IncompleteDimensions => 0x8CD9,
            FramebufferStatus::Unsupported => 0x8CDD,
        }
    }
}

/// One draw into either the off-screen target or the canvas
pub struct DrawCall<'a, C: GpuContext + ?Sized> {
    /// `None` draws to the canvas
    pub target: Option<&'a C::Framebuffer>,
    pub clear: Option<[f32; 4]>,
    pub program: &'a C::Program,
    pub uniforms: &'a [u8],
    /// Buffers in the order of the program's attribute slots
    pub vertex_buffers: &'a [&'a C::Buffer],
    pub texture: Option<&'a C::Texture>,
    /// Vertices per instance, drawn as a triangle strip
    pub vertex_count: u32,
    pub instance_count: u32,
}

/// Graphics backend used by the renderer
///
/// Creation methods report failure instead of panicking. `compile_shader`
/// and `link_program` return the backend's diagnostic text; allocation
/// methods return `None`. Every raw handle handed out is eventually passed
/// back to the matching `delete_*`.
pub trait GpuContext {
    type Shader;
    type Program;
    type Buffer;
    type Texture;
    type Framebuffer;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    fn link_program(
        &self,
        layout: &ProgramLayout,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<Self::Program, String>;

    fn create_buffer(
        &self,
        data: &[u8],
        target: BufferTarget,
        usage: BufferUsage,
    ) -> Option<Self::Buffer>;

    /// Replace a dynamic buffer's contents from offset 0
    fn write_buffer(&self, buffer: &Self::Buffer, data: &[u8]);

    /// RGBA8, linear filtering, clamp-to-edge
    fn create_texture(&self, width: u32, height: u32) -> Option<Self::Texture>;

    /// Framebuffer with `texture` as color attachment 0
    fn create_framebuffer(&self, texture: &Self::Texture) -> Option<Self::Framebuffer>;

    fn framebuffer_status(&self, framebuffer: &Self::Framebuffer) -> FramebufferStatus;

    /// Match the presentation surface to a new backing-store size
    fn resize_surface(&self, width: u32, height: u32);

    /// Acquire the next canvas image; `false` skips the frame
    fn begin_frame(&self) -> bool;

    fn draw(&self, call: &DrawCall<'_, Self>);

    /// Submit recorded work and present
    fn end_frame(&self);

    fn delete_shader(&self, shader: Self::Shader);
    fn delete_program(&self, program: Self::Program);
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn delete_texture(&self, texture: Self::Texture);
    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_status_codes() {
        assert_eq!(FramebufferStatus::Complete.code(), 0x8CD5);
        assert_eq!(FramebufferStatus::IncompleteAttachment.code(), 0x8CD6);
        assert_eq!(FramebufferStatus::IncompleteDimensions.code(), 0x8CD9);
        assert_eq!(FramebufferStatus::Unsupported.code(), 0x8CDD);
    }

    #[test]
    fn test_attribute_sizes() {
        assert_eq!(AttributeFormat::Float32.size(), 4);
        assert_eq!(AttributeFormat::Float32x2.size(), 8);
    }

    #[test]
    fn test_buffer_defaults() {
        assert_eq!(BufferTarget::default(), BufferTarget::Array);
        assert_eq!(BufferUsage::default(), BufferUsage::Static);
    }
}
