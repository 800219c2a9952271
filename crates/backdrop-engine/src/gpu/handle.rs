//! Scoped GPU handles
//!
//! A [`GpuHandle`] pairs a raw backend handle with the context that created
//! it and hands it back to the matching `delete_*` on drop.

use std::marker::PhantomData;
use std::rc::Rc;

use super::GpuContext;

/// Resource category, selecting the raw type and its release call
pub trait ResourceKind<C: GpuContext> {
    type Raw;
    fn release(ctx: &C, raw: Self::Raw);
}

pub struct ShaderKind;
pub struct ProgramKind;
pub struct BufferKind;
pub struct TextureKind;
pub struct FramebufferKind;

impl<C: GpuContext> ResourceKind<C> for ShaderKind {
    type Raw = C::Shader;
    fn release(ctx: &C, raw: Self::Raw) {
        ctx.delete_shader(raw);
    }
}

impl<C: GpuContext> ResourceKind<C> for ProgramKind {
    type Raw = C::Program;
    fn release(ctx: &C, raw: Self::Raw) {
        ctx.delete_program(raw);
    }
}

impl<C: GpuContext> ResourceKind<C> for BufferKind {
    type Raw = C::Buffer;
    fn release(ctx: &C, raw: Self::Raw) {
        ctx.delete_buffer(raw);
    }
}

impl<C: GpuContext> ResourceKind<C> for TextureKind {
    type Raw = C::Texture;
    fn release(ctx: &C, raw: Self::Raw) {
        ctx.delete_texture(raw);
    }
}

impl<C: GpuContext> ResourceKind<C> for FramebufferKind {
    type Raw = C::Framebuffer;
    fn release(ctx: &C, raw: Self::Raw) {
        ctx.delete_framebuffer(raw);
    }
}

/// Owned GPU resource, released when dropped
pub struct GpuHandle<C: GpuContext, K: ResourceKind<C>> {
    ctx: Rc<C>,
    /// `Some` until the handle is dropped
    raw: Option<K::Raw>,
    _kind: PhantomData<K>,
}

pub type Shader<C> = GpuHandle<C, ShaderKind>;
pub type Program<C> = GpuHandle<C, ProgramKind>;
pub type Buffer<C> = GpuHandle<C, BufferKind>;
pub type Texture<C> = GpuHandle<C, TextureKind>;
pub type Framebuffer<C> = GpuHandle<C, FramebufferKind>;

impl<C: GpuContext, K: ResourceKind<C>> GpuHandle<C, K> {
    /// Take ownership of a raw handle created by `ctx`
    pub fn new(ctx: Rc<C>, raw: K::Raw) -> Self {
        Self {
            ctx,
            raw: Some(raw),
            _kind: PhantomData,
        }
    }

    pub fn raw(&self) -> &K::Raw {
        match &self.raw {
            Some(raw) => raw,
            None => unreachable!("GPU handle used after release"),
        }
    }
}

impl<C: GpuContext, K: ResourceKind<C>> Drop for GpuHandle<C, K> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            K::release(&self.ctx, raw);
        }
    }
}
