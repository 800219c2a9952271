//! Fallible, logged resource creation
//!
//! Every helper logs the backend diagnostic and returns `None` on failure.
//! Callers check the result and degrade; nothing here panics.

use std::rc::Rc;

use crate::error::RenderError;

use super::{
    Buffer, BufferTarget, BufferUsage, FramebufferStatus, GpuContext, GpuHandle, Program,
    ProgramLayout, Shader, ShaderStage, Texture,
};

/// Off-screen color target: texture plus the framebuffer rendering into it
pub struct RenderTexture<C: GpuContext> {
    pub framebuffer: super::Framebuffer<C>,
    pub texture: Texture<C>,
    pub width: u32,
    pub height: u32,
}

/// Compile one shader stage
pub fn compile_shader<C: GpuContext>(
    ctx: &Rc<C>,
    stage: ShaderStage,
    source: &str,
) -> Option<Shader<C>> {
    match ctx.compile_shader(stage, source) {
        Ok(raw) => Some(GpuHandle::new(Rc::clone(ctx), raw)),
        Err(diagnostic) => {
            log::error!(
                "[backdrop] {} shader compile error: {}",
                stage.name(),
                diagnostic
            );
            None
        }
    }
}

/// Link two compiled stages into a program
pub fn create_program<C: GpuContext>(
    ctx: &Rc<C>,
    layout: &ProgramLayout,
    vertex: &Shader<C>,
    fragment: &Shader<C>,
) -> Option<Program<C>> {
    match ctx.link_program(layout, vertex.raw(), fragment.raw()) {
        Ok(raw) => Some(GpuHandle::new(Rc::clone(ctx), raw)),
        Err(diagnostic) => {
            log::error!(
                "[backdrop] program '{}' link error: {}",
                layout.label,
                diagnostic
            );
            None
        }
    }
}

/// Compile both stages and link them
///
/// The intermediate shaders are released before returning, whether or not
/// the link succeeded. The error names the program and, for compile
/// failures, the stage; the backend diagnostic has already been logged.
pub fn create_program_from_sources<C: GpuContext>(
    ctx: &Rc<C>,
    layout: &ProgramLayout,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<Program<C>, RenderError> {
    let compile = |stage: ShaderStage, source: &str| {
        compile_shader(ctx, stage, source).ok_or(RenderError::ShaderCompile {
            program: layout.label,
            stage: stage.name(),
        })
    };
    let vertex = compile(ShaderStage::Vertex, vertex_source)?;
    let fragment = compile(ShaderStage::Fragment, fragment_source)?;
    create_program(ctx, layout, &vertex, &fragment).ok_or(RenderError::ProgramLink(layout.label))
}

/// Allocate a buffer initialised with `data`
pub fn create_buffer<C: GpuContext>(
    ctx: &Rc<C>,
    data: &[u8],
    target: BufferTarget,
    usage: BufferUsage,
) -> Option<Buffer<C>> {
    match ctx.create_buffer(data, target, usage) {
        Some(raw) => Some(GpuHandle::new(Rc::clone(ctx), raw)),
        None => {
            log::error!(
                "[backdrop] failed to create {:?} buffer of {} bytes",
                target,
                data.len()
            );
            None
        }
    }
}

/// Allocate an off-screen color target of `width`×`height` device pixels
pub fn create_framebuffer<C: GpuContext>(
    ctx: &Rc<C>,
    width: u32,
    height: u32,
) -> Option<RenderTexture<C>> {
    let Some(raw_texture) = ctx.create_texture(width, height) else {
        log::error!("[backdrop] failed to create {}x{} texture", width, height);
        return None;
    };
    let texture: Texture<C> = GpuHandle::new(Rc::clone(ctx), raw_texture);

    let Some(raw_framebuffer) = ctx.create_framebuffer(texture.raw()) else {
        log::error!("[backdrop] failed to create framebuffer");
        return None;
    };
    let framebuffer = GpuHandle::new(Rc::clone(ctx), raw_framebuffer);

    let status = ctx.framebuffer_status(framebuffer.raw());
    if status != FramebufferStatus::Complete {
        log::error!(
            "[backdrop] {} ({:?})",
            RenderError::FramebufferIncomplete {
                status: status.code()
            },
            status
        );
        return None;
    }

    Some(RenderTexture {
        framebuffer,
        texture,
        width,
        height,
    })
}
