use std::rc::Rc;

use crate::config::RendererConfig;
use crate::error::RenderError;
use crate::field::{MotionField, Node};
use crate::gpu::{
    self, AttributeFormat, Buffer, BufferTarget, BufferUsage, DrawCall, GpuContext,
    OutputTarget, Program, ProgramLayout, RenderTexture, StepMode, VertexSlot,
};
use crate::shaders;

use super::uniforms::{rgba, GlassUniforms, LatticeUniforms};

/// Sprite edge length in device pixels at scale 1
pub const POINT_SIZE: f32 = 6.0;

/// Glass distortion in texture units per unit of height-field slope
pub const GLASS_STRENGTH: f32 = 0.003;

/// Vertices per sprite / full-screen quad (triangle strip)
const QUAD_VERTICES: u32 = 4;

pub const LATTICE_ATTRIBUTES: &[VertexSlot] = &[
    VertexSlot {
        name: "rest",
        location: 0,
        format: AttributeFormat::Float32x2,
        step: StepMode::Instance,
    },
    VertexSlot {
        name: "offset",
        location: 1,
        format: AttributeFormat::Float32x2,
        step: StepMode::Instance,
    },
    VertexSlot {
        name: "scale",
        location: 2,
        format: AttributeFormat::Float32,
        step: StepMode::Instance,
    },
    VertexSlot {
        name: "glow",
        location: 3,
        format: AttributeFormat::Float32,
        step: StepMode::Instance,
    },
];

pub const QUAD_ATTRIBUTES: &[VertexSlot] = &[
    VertexSlot {
        name: "position",
        location: 0,
        format: AttributeFormat::Float32x2,
        step: StepMode::Vertex,
    },
    VertexSlot {
        name: "texcoord",
        location: 1,
        format: AttributeFormat::Float32x2,
        step: StepMode::Vertex,
    },
];

pub const LATTICE_LAYOUT: ProgramLayout = ProgramLayout {
    label: "lattice",
    attributes: LATTICE_ATTRIBUTES,
    uniform_size: std::mem::size_of::<LatticeUniforms>() as u64,
    samples_texture: false,
    alpha_blend: true,
    output: OutputTarget::Offscreen,
};

pub const GLASS_LAYOUT: ProgramLayout = ProgramLayout {
    label: "glass",
    attributes: QUAD_ATTRIBUTES,
    uniform_size: std::mem::size_of::<GlassUniforms>() as u64,
    samples_texture: true,
    alpha_blend: false,
    output: OutputTarget::Screen,
};

/// Strip order: bottom-left, bottom-right, top-left, top-right
const QUAD_POSITIONS: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
/// Texture rows run top-down
const QUAD_TEXCOORDS: [f32; 8] = [0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];

/// Static full-screen quad geometry
struct QuadBuffers<C: GpuContext> {
    positions: Buffer<C>,
    texcoords: Buffer<C>,
}

impl<C: GpuContext> QuadBuffers<C> {
    fn allocate(ctx: &Rc<C>) -> Option<Self> {
        Some(Self {
            positions: gpu::create_buffer(
                ctx,
                bytemuck::cast_slice(&QUAD_POSITIONS),
                BufferTarget::Array,
                BufferUsage::Static,
            )?,
            texcoords: gpu::create_buffer(
                ctx,
                bytemuck::cast_slice(&QUAD_TEXCOORDS),
                BufferTarget::Array,
                BufferUsage::Static,
            )?,
        })
    }
}

/// Per-node attribute buffers, one slot each
struct NodeBuffers<C: GpuContext> {
    rest: Buffer<C>,
    offset: Buffer<C>,
    scale: Buffer<C>,
    glow: Buffer<C>,
    count: usize,
}

impl<C: GpuContext> NodeBuffers<C> {
    fn allocate(ctx: &Rc<C>, nodes: &[Node]) -> Option<Self> {
        let rest: Vec<f32> = nodes.iter().flat_map(|n| n.rest.to_array()).collect();
        let offsets = vec![0.0f32; nodes.len() * 2];
        let scales = vec![1.0f32; nodes.len()];
        let glows = vec![0.0f32; nodes.len()];

        let buffer = |data: &[f32], usage| {
            gpu::create_buffer(ctx, bytemuck::cast_slice(data), BufferTarget::Array, usage)
        };

        Some(Self {
            rest: buffer(&rest, BufferUsage::Static)?,
            offset: buffer(&offsets, BufferUsage::Dynamic)?,
            scale: buffer(&scales, BufferUsage::Dynamic)?,
            glow: buffer(&glows, BufferUsage::Dynamic)?,
            count: nodes.len(),
        })
    }
}

/// CPU-side copies of the dynamic attributes, reused every frame
#[derive(Default)]
struct Staging {
    offsets: Vec<f32>,
    scales: Vec<f32>,
    glows: Vec<f32>,
}

impl Staging {
    fn fill(&mut self, nodes: &[Node]) {
        self.offsets.clear();
        self.scales.clear();
        self.glows.clear();
        for node in nodes {
            self.offsets.extend_from_slice(&node.offset().to_array());
            self.scales.push(node.scale);
            self.glows.push(node.glow);
        }
    }
}

/// Every GPU object the renderer owns
///
/// Programs are mandatory. The buffers and off-screen target are optional:
/// when an allocation fails the frame is skipped, and the next resize tries
/// again.
pub(super) struct Pipeline<C: GpuContext> {
    ctx: Rc<C>,
    lattice: Program<C>,
    glass: Program<C>,
    quad: Option<QuadBuffers<C>>,
    nodes: Option<NodeBuffers<C>>,
    target: Option<RenderTexture<C>>,
    staging: Staging,
}

impl<C: GpuContext> Pipeline<C> {
    pub(super) fn build(
        ctx: Rc<C>,
        field: &MotionField,
        size: (u32, u32),
    ) -> Result<Self, RenderError> {
        let lattice = gpu::create_program_from_sources(
            &ctx,
            &LATTICE_LAYOUT,
            shaders::LATTICE_VERTEX,
            shaders::LATTICE_FRAGMENT,
        )?;
        let glass = gpu::create_program_from_sources(
            &ctx,
            &GLASS_LAYOUT,
            shaders::GLASS_VERTEX,
            shaders::GLASS_FRAGMENT,
        )?;

        let quad = QuadBuffers::allocate(&ctx);
        let nodes = NodeBuffers::allocate(&ctx, field.nodes());
        let target = allocate_target(&ctx, size);

        Ok(Self {
            ctx,
            lattice,
            glass,
            quad,
            nodes,
            target,
            staging: Staging::default(),
        })
    }

    /// Recreate everything sized to the canvas or the node count
    pub(super) fn rebuild_sized(&mut self, field: &MotionField, size: (u32, u32)) {
        self.ctx.resize_surface(size.0, size.1);

        // Release before allocating so peak usage stays at one target
        self.target = None;
        self.target = allocate_target(&self.ctx, size);

        self.nodes = None;
        self.nodes = NodeBuffers::allocate(&self.ctx, field.nodes());

        if self.quad.is_none() {
            self.quad = QuadBuffers::allocate(&self.ctx);
        }
    }

    /// First resource a frame needs but does not have
    pub(super) fn check_ready(&self) -> Result<(), RenderError> {
        if self.quad.is_none() {
            return Err(RenderError::ResourceAllocation("quad buffers"));
        }
        if self.nodes.is_none() {
            return Err(RenderError::ResourceAllocation("node buffers"));
        }
        if self.target.is_none() {
            return Err(RenderError::ResourceAllocation("framebuffer"));
        }
        Ok(())
    }

    /// Upload node attributes and run both passes
    ///
    /// Returns `false` if the frame was skipped.
    pub(super) fn draw_frame(
        &mut self,
        field: &MotionField,
        config: &RendererConfig,
        time: f64,
    ) -> bool {
        let (Some(quad), Some(nodes), Some(target)) = (&self.quad, &self.nodes, &self.target)
        else {
            return false;
        };
        if nodes.count != field.nodes().len() {
            log::warn!(
                "[backdrop] node buffers hold {} nodes, field has {}",
                nodes.count,
                field.nodes().len()
            );
            return false;
        }

        let ctx = &self.ctx;

        self.staging.fill(field.nodes());
        ctx.write_buffer(nodes.offset.raw(), bytemuck::cast_slice(&self.staging.offsets));
        ctx.write_buffer(nodes.scale.raw(), bytemuck::cast_slice(&self.staging.scales));
        ctx.write_buffer(nodes.glow.raw(), bytemuck::cast_slice(&self.staging.glows));

        if !ctx.begin_frame() {
            return false;
        }

        // Same floor as the off-screen target; the vertex stage divides by it
        let (width, height) = field.size();
        let pointer = field.mouse_state();
        let lattice_uniforms = LatticeUniforms {
            resolution: [width.max(1.0), height.max(1.0)],
            time: time as f32,
            point_size: POINT_SIZE,
            node_color: rgba(config.node_color),
            glow_color: rgba(config.glow_color),
            mouse: [
                pointer.position.x,
                pointer.position.y,
                pointer.velocity.x,
                pointer.velocity.y,
            ],
            mouse_active: if pointer.active { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        };

        // Pass 1: lattice into the off-screen target
        ctx.draw(&DrawCall {
            target: Some(target.framebuffer.raw()),
            clear: Some(config.background_color),
            program: self.lattice.raw(),
            uniforms: bytemuck::bytes_of(&lattice_uniforms),
            vertex_buffers: &[
                nodes.rest.raw(),
                nodes.offset.raw(),
                nodes.scale.raw(),
                nodes.glow.raw(),
            ],
            texture: None,
            vertex_count: QUAD_VERTICES,
            instance_count: nodes.count as u32,
        });

        let glass_uniforms = GlassUniforms {
            resolution: [target.width as f32, target.height as f32],
            time: time as f32,
            strength: GLASS_STRENGTH,
        };

        // Pass 2: glass composite onto the canvas
        ctx.draw(&DrawCall {
            target: None,
            clear: Some(config.background_color),
            program: self.glass.raw(),
            uniforms: bytemuck::bytes_of(&glass_uniforms),
            vertex_buffers: &[quad.positions.raw(), quad.texcoords.raw()],
            texture: Some(target.texture.raw()),
            vertex_count: QUAD_VERTICES,
            instance_count: 1,
        });

        ctx.end_frame();
        true
    }
}

fn allocate_target<C: GpuContext>(
    ctx: &Rc<C>,
    (width, height): (u32, u32),
) -> Option<RenderTexture<C>> {
    gpu::create_framebuffer(ctx, width.max(1), height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_slots_are_per_instance() {
        assert!(LATTICE_ATTRIBUTES
            .iter()
            .all(|slot| slot.step == StepMode::Instance));
        let locations: Vec<u32> = LATTICE_ATTRIBUTES.iter().map(|s| s.location).collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(LATTICE_LAYOUT.uniform_size % 16, 0);
        assert_eq!(GLASS_LAYOUT.uniform_size % 16, 0);
    }

    #[test]
    fn test_quad_covers_clip_space() {
        let xs: Vec<f32> = QUAD_POSITIONS.iter().step_by(2).copied().collect();
        let ys: Vec<f32> = QUAD_POSITIONS.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(xs, vec![-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(ys, vec![-1.0, -1.0, 1.0, 1.0]);
        // Bottom of clip space samples the bottom texture row
        assert_eq!(QUAD_TEXCOORDS[1], 1.0);
        assert_eq!(QUAD_TEXCOORDS[5], 0.0);
    }

    #[test]
    fn test_staging_reuses_capacity() {
        let mut field = MotionField::new(30.0, 60.0, 60.0);
        field.update(0.5);
        let mut staging = Staging::default();
        staging.fill(field.nodes());
        assert_eq!(staging.offsets.len(), field.nodes().len() * 2);
        let cap = staging.offsets.capacity();
        staging.fill(field.nodes());
        assert_eq!(staging.offsets.capacity(), cap);
        assert_eq!(staging.scales.len(), field.nodes().len());
    }
}
