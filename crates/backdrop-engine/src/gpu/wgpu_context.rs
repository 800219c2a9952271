//! wgpu implementation of [`GpuContext`]
//!
//! Acquisition prefers WebGPU and falls back to the WebGL2 backend. WGSL is
//! parsed and validated with naga before it reaches the device, so shader
//! errors surface synchronously as diagnostics instead of as uncaptured
//! device errors.

use std::cell::RefCell;

use wgpu::util::DeviceExt;

use super::{
    AttributeFormat, BufferTarget, BufferUsage, DrawCall, FramebufferStatus, GpuContext,
    OutputTarget, ProgramLayout, ShaderStage, StepMode,
};
use crate::error::RenderError;

/// Off-screen color format
const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

/// Validated shader stage
pub struct WgpuShader {
    stage: ShaderStage,
    module: wgpu::ShaderModule,
    ir: naga::Module,
}

/// Render pipeline with its own uniform block
pub struct WgpuProgram {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: Option<wgpu::BindGroupLayout>,
}

pub struct WgpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

pub struct WgpuFramebuffer {
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// Work recorded between `begin_frame` and `end_frame`
struct FrameState {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

/// Device, queue and canvas surface
pub struct WgpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: RefCell<wgpu::SurfaceConfiguration>,
    frame: RefCell<Option<FrameState>>,
    backend: &'static str,
}

impl WgpuContext {
    /// Acquire a context for `canvas`, trying WebGPU before WebGL2
    ///
    /// The canvas backing store should already be sized; the surface is
    /// configured to its current dimensions.
    #[cfg(target_arch = "wasm32")]
    pub async fn acquire(canvas: web_sys::HtmlCanvasElement) -> Result<Self, RenderError> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        if browser_has_webgpu() {
            let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
                backends: wgpu::Backends::BROWSER_WEBGPU,
                ..Default::default()
            });
            // A canvas cannot switch context types, so probe for an adapter
            // before binding the surface.
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::LowPower,
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await;
            if let Some(adapter) = adapter {
                let surface = instance
                    .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
                    .map_err(|e| {
                        RenderError::ContextUnavailable(format!("WebGPU surface: {}", e))
                    })?;
                return Self::from_parts(surface, adapter, width, height, "WebGPU").await;
            }
            log::warn!("[backdrop] no WebGPU adapter, falling back to WebGL2");
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| RenderError::ContextUnavailable(format!("WebGL2 surface: {}", e)))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| {
                RenderError::ContextUnavailable("neither WebGPU nor WebGL2 is available".into())
            })?;

        Self::from_parts(surface, adapter, width, height, "WebGL2").await
    }

    /// Canvas surfaces only exist on wasm32
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn acquire(_canvas: web_sys::HtmlCanvasElement) -> Result<Self, RenderError> {
        Err(RenderError::ContextUnavailable(
            "WgpuContext only supports WASM targets".into(),
        ))
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    async fn from_parts(
        surface: wgpu::Surface<'static>,
        adapter: wgpu::Adapter,
        width: u32,
        height: u32,
        backend: &'static str,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Backdrop Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| RenderError::ContextUnavailable(format!("device request: {}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // Colors are authored in display space; a non-sRGB target avoids a
        // second encode on write.
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| {
                RenderError::ContextUnavailable("surface reports no formats".into())
            })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "[backdrop] {} context ready: {}x{} {:?}",
            backend,
            width,
            height,
            format
        );

        Ok(Self {
            device,
            queue,
            surface,
            config: RefCell::new(config),
            frame: RefCell::new(None),
            backend,
        })
    }

    /// "WebGPU" or "WebGL2"
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.borrow().format
    }

    fn uniform_layout(&self, label: &str) -> wgpu::BindGroupLayout {
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            })
    }

    fn texture_layout(&self, label: &str) -> wgpu::BindGroupLayout {
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            })
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_has_webgpu() -> bool {
    web_sys::window()
        .map(|w| {
            js_sys::Reflect::has(&w.navigator(), &js_sys::JsString::from("gpu")).unwrap_or(false)
        })
        .unwrap_or(false)
}

/// Parse and validate WGSL
fn validate_wgsl(source: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| e.into_inner().to_string())?;
    Ok(module)
}

fn entry_point<'m>(
    module: &'m naga::Module,
    stage: ShaderStage,
) -> Option<&'m naga::EntryPoint> {
    let (name, naga_stage) = match stage {
        ShaderStage::Vertex => (VERTEX_ENTRY, naga::ShaderStage::Vertex),
        ShaderStage::Fragment => (FRAGMENT_ENTRY, naga::ShaderStage::Fragment),
    };
    module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == naga_stage)
}

/// User-defined `@location`s of an entry point's inputs or outputs
fn locations(module: &naga::Module, ep: &naga::EntryPoint, outputs: bool) -> Vec<u32> {
    let mut found = Vec::new();
    let mut visit = |ty: naga::Handle<naga::Type>, binding: Option<&naga::Binding>| {
        match binding {
            Some(naga::Binding::Location { location, .. }) => found.push(*location),
            Some(naga::Binding::BuiltIn(_)) => {}
            None => {
                if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                    for member in members {
                        if let Some(naga::Binding::Location { location, .. }) = &member.binding {
                            found.push(*location);
                        }
                    }
                }
            }
        }
    };

    if outputs {
        if let Some(result) = &ep.function.result {
            visit(result.ty, result.binding.as_ref());
        }
    } else {
        for arg in &ep.function.arguments {
            visit(arg.ty, arg.binding.as_ref());
        }
    }
    found
}

fn vertex_format(format: AttributeFormat) -> wgpu::VertexFormat {
    match format {
        AttributeFormat::Float32 => wgpu::VertexFormat::Float32,
        AttributeFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
    }
}

impl GpuContext for WgpuContext {
    type Shader = WgpuShader;
    type Program = WgpuProgram;
    type Buffer = wgpu::Buffer;
    type Texture = WgpuTexture;
    type Framebuffer = WgpuFramebuffer;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<WgpuShader, String> {
        let ir = validate_wgsl(source)?;
        if entry_point(&ir, stage).is_none() {
            return Err(format!(
                "missing {} entry point '{}'",
                stage.name(),
                match stage {
                    ShaderStage::Vertex => VERTEX_ENTRY,
                    ShaderStage::Fragment => FRAGMENT_ENTRY,
                }
            ));
        }

        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(stage.name()),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

        Ok(WgpuShader { stage, module, ir })
    }

    fn link_program(
        &self,
        layout: &ProgramLayout,
        vertex: &WgpuShader,
        fragment: &WgpuShader,
    ) -> Result<WgpuProgram, String> {
        if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
            return Err("stages passed in the wrong order".into());
        }
        let (Some(vs), Some(fs)) = (
            entry_point(&vertex.ir, ShaderStage::Vertex),
            entry_point(&fragment.ir, ShaderStage::Fragment),
        ) else {
            return Err("missing entry point".into());
        };

        // Interface matching: every attribute the vertex stage reads must be
        // fed, every varying the fragment stage reads must be written.
        for location in locations(&vertex.ir, vs, false) {
            if !layout.attributes.iter().any(|slot| slot.location == location) {
                return Err(format!("vertex input @location({}) has no buffer", location));
            }
        }
        let written = locations(&vertex.ir, vs, true);
        for location in locations(&fragment.ir, fs, false) {
            if !written.contains(&location) {
                return Err(format!(
                    "fragment input @location({}) is not written by the vertex stage",
                    location
                ));
            }
        }

        let uniform_layout = self.uniform_layout(layout.label);
        let texture_layout = layout
            .samples_texture
            .then(|| self.texture_layout(layout.label));

        let mut group_layouts = vec![&uniform_layout];
        if let Some(textures) = &texture_layout {
            group_layouts.push(textures);
        }
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(layout.label),
                bind_group_layouts: &group_layouts,
                push_constant_ranges: &[],
            });

        let attributes: Vec<[wgpu::VertexAttribute; 1]> = layout
            .attributes
            .iter()
            .map(|slot| {
                [wgpu::VertexAttribute {
                    format: vertex_format(slot.format),
                    offset: 0,
                    shader_location: slot.location,
                }]
            })
            .collect();
        let buffers: Vec<wgpu::VertexBufferLayout> = layout
            .attributes
            .iter()
            .zip(&attributes)
            .map(|(slot, attribute)| wgpu::VertexBufferLayout {
                array_stride: slot.format.size(),
                step_mode: match slot.step {
                    StepMode::Vertex => wgpu::VertexStepMode::Vertex,
                    StepMode::Instance => wgpu::VertexStepMode::Instance,
                },
                attributes: attribute,
            })
            .collect();

        let format = match layout.output {
            OutputTarget::Offscreen => OFFSCREEN_FORMAT,
            OutputTarget::Screen => self.surface_format(),
        };

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(layout.label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &vertex.module,
                    entry_point: Some(VERTEX_ENTRY),
                    buffers: &buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &fragment.module,
                    entry_point: Some(FRAGMENT_ENTRY),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: layout.alpha_blend.then_some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(layout.label),
            size: layout.uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(layout.label),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(WgpuProgram {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
        })
    }

    fn create_buffer(
        &self,
        data: &[u8],
        target: BufferTarget,
        usage: BufferUsage,
    ) -> Option<wgpu::Buffer> {
        if data.len() as u64 > self.device.limits().max_buffer_size {
            return None;
        }
        let mut usages = match target {
            BufferTarget::Array => wgpu::BufferUsages::VERTEX,
            BufferTarget::ElementArray => wgpu::BufferUsages::INDEX,
        };
        if usage == BufferUsage::Dynamic {
            usages |= wgpu::BufferUsages::COPY_DST;
        }
        Some(
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Backdrop Buffer"),
                    contents: data,
                    usage: usages,
                }),
        )
    }

    fn write_buffer(&self, buffer: &wgpu::Buffer, data: &[u8]) {
        if data.len() as u64 > buffer.size() {
            log::warn!(
                "[backdrop] write of {} bytes exceeds buffer of {}",
                data.len(),
                buffer.size()
            );
            return;
        }
        self.queue.write_buffer(buffer, 0, data);
    }

    fn create_texture(&self, width: u32, height: u32) -> Option<WgpuTexture> {
        let max = self.device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max || height > max {
            return None;
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Lattice Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Lattice Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Some(WgpuTexture {
            texture,
            view,
            sampler,
        })
    }

    fn create_framebuffer(&self, texture: &WgpuTexture) -> Option<WgpuFramebuffer> {
        Some(WgpuFramebuffer {
            view: texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default()),
            width: texture.texture.width(),
            height: texture.texture.height(),
        })
    }

    fn framebuffer_status(&self, framebuffer: &WgpuFramebuffer) -> FramebufferStatus {
        let max = self.device.limits().max_texture_dimension_2d;
        if framebuffer.width == 0 || framebuffer.height == 0 {
            FramebufferStatus::IncompleteAttachment
        } else if framebuffer.width > max || framebuffer.height > max {
            FramebufferStatus::IncompleteDimensions
        } else {
            FramebufferStatus::Complete
        }
    }

    fn resize_surface(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let mut config = self.config.borrow_mut();
        config.width = width;
        config.height = height;
        self.surface.configure(&self.device, &config);
    }

    fn begin_frame(&self) -> bool {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config.borrow());
                log::debug!("[backdrop] surface reconfigured, skipping frame");
                return false;
            }
            Err(e) => {
                log::warn!("[backdrop] could not acquire frame: {}", e);
                return false;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Frame"),
            });

        *self.frame.borrow_mut() = Some(FrameState {
            surface_texture,
            view,
            encoder,
        });
        true
    }

    fn draw(&self, call: &DrawCall<'_, Self>) {
        let mut guard = self.frame.borrow_mut();
        let Some(frame) = guard.as_mut() else {
            log::warn!("[backdrop] draw outside of a frame ignored");
            return;
        };

        self.queue
            .write_buffer(&call.program.uniform_buffer, 0, call.uniforms);

        let texture_group = match (call.texture, &call.program.texture_layout) {
            (Some(texture), Some(layout)) => {
                Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Lattice Texture"),
                    layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&texture.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&texture.sampler),
                        },
                    ],
                }))
            }
            _ => None,
        };

        let view = match call.target {
            Some(framebuffer) => &framebuffer.view,
            None => &frame.view,
        };
        let load = match call.clear {
            Some([r, g, b, a]) => wgpu::LoadOp::Clear(wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            }),
            None => wgpu::LoadOp::Load,
        };

        let mut pass = frame
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(if call.target.is_some() {
                    "Lattice Pass"
                } else {
                    "Glass Pass"
                }),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        pass.set_pipeline(&call.program.pipeline);
        pass.set_bind_group(0, &call.program.uniform_bind_group, &[]);
        if let Some(group) = &texture_group {
            pass.set_bind_group(1, group, &[]);
        }
        for (slot, buffer) in call.vertex_buffers.iter().enumerate() {
            pass.set_vertex_buffer(slot as u32, buffer.slice(..));
        }
        pass.draw(0..call.vertex_count, 0..call.instance_count);
    }

    fn end_frame(&self) {
        let Some(frame) = self.frame.borrow_mut().take() else {
            return;
        };
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.surface_texture.present();
    }

    fn delete_shader(&self, _shader: WgpuShader) {}

    fn delete_program(&self, program: WgpuProgram) {
        program.uniform_buffer.destroy();
    }

    fn delete_buffer(&self, buffer: wgpu::Buffer) {
        buffer.destroy();
    }

    fn delete_texture(&self, texture: WgpuTexture) {
        texture.texture.destroy();
    }

    fn delete_framebuffer(&self, _framebuffer: WgpuFramebuffer) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders;

    #[test]
    fn test_shaders_validate() {
        for source in [
            shaders::LATTICE_VERTEX,
            shaders::LATTICE_FRAGMENT,
            shaders::GLASS_VERTEX,
            shaders::GLASS_FRAGMENT,
        ] {
            if let Err(diagnostic) = validate_wgsl(source) {
                panic!("{}", diagnostic);
            }
        }
    }

    #[test]
    fn test_lattice_interface_matches() {
        let vs = validate_wgsl(shaders::LATTICE_VERTEX).unwrap();
        let fs = validate_wgsl(shaders::LATTICE_FRAGMENT).unwrap();
        let vs_ep = entry_point(&vs, ShaderStage::Vertex).unwrap();
        let fs_ep = entry_point(&fs, ShaderStage::Fragment).unwrap();

        let mut inputs = locations(&vs, vs_ep, false);
        inputs.sort_unstable();
        assert_eq!(inputs, vec![0, 1, 2, 3]);

        let written = locations(&vs, vs_ep, true);
        for location in locations(&fs, fs_ep, false) {
            assert!(written.contains(&location));
        }
    }

    #[test]
    fn test_invalid_wgsl_reports_diagnostic() {
        let err = validate_wgsl("@vertex fn vs_main( -> {").unwrap_err();
        assert!(!err.is_empty());
    }
}
