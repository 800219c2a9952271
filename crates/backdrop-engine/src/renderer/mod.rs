//! Two-pass lattice renderer
//!
//! Owns the canvas, the motion field and every GPU object, and runs one
//! frame per `render` call:
//!
//! - **Pass 1**: Nodes as instanced point sprites into an off-screen RGBA8
//!   texture cleared to the background color
//! - **Pass 2**: Full-screen quad sampling that texture through the frosted
//!   glass shader onto the canvas
//!
//! ## Lifecycle
//!
//! `Uninitialized` → `Ready` | `Failed` → `Destroyed`. Acquiring a context
//! is the platform's job; a renderer that never receives one stays
//! `Uninitialized` and every frame is a no-op.

mod fps;
mod pipeline;
mod uniforms;

pub use fps::FpsCounter;
pub use pipeline::{
    GLASS_LAYOUT, GLASS_STRENGTH, LATTICE_ATTRIBUTES, LATTICE_LAYOUT, POINT_SIZE,
    QUAD_ATTRIBUTES,
};
pub use uniforms::{GlassUniforms, LatticeUniforms};

use std::rc::Rc;

use crate::config::RendererConfig;
use crate::error::RenderError;
use crate::field::MotionField;
use crate::gpu::{resize_canvas, CanvasSurface, GpuContext};

use pipeline::Pipeline;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererState {
    /// No context yet; frames are skipped
    Uninitialized,
    Ready,
    /// Program build failed; frames are skipped
    Failed,
    /// Resources released; the instance is unusable
    Destroyed,
}

/// Animated lattice behind a frosted-glass composite
pub struct LatticeRenderer<C: GpuContext, S: CanvasSurface> {
    canvas: S,
    config: RendererConfig,
    field: MotionField,
    pipeline: Option<Pipeline<C>>,
    state: RendererState,
    fps: FpsCounter,
    skip_reported: bool,
}

impl<C: GpuContext, S: CanvasSurface> LatticeRenderer<C, S> {
    /// Sync the canvas backing store and build a field covering it
    pub fn new(mut canvas: S, config: RendererConfig) -> Self {
        resize_canvas(&mut canvas);
        let (width, height) = canvas.size();
        let field = MotionField::new(config.grid_spacing, width as f32, height as f32);

        Self {
            canvas,
            config,
            field,
            pipeline: None,
            state: RendererState::Uninitialized,
            fps: FpsCounter::new(),
            skip_reported: false,
        }
    }

    /// Build programs, buffers and the off-screen target on `ctx`
    ///
    /// Program failures are logged and leave the renderer `Failed`; nothing
    /// retries on its own. Buffer or framebuffer allocation failures do not
    /// fail initialization: frames are skipped until a resize succeeds in
    /// allocating them.
    pub fn initialize(&mut self, ctx: C) -> Result<(), RenderError> {
        match self.state {
            RendererState::Destroyed => return Err(RenderError::Destroyed),
            RendererState::Ready => {
                log::debug!("[backdrop] initialize called twice, keeping current context");
                return Ok(());
            }
            RendererState::Uninitialized | RendererState::Failed => {}
        }

        match Pipeline::build(Rc::new(ctx), &self.field, self.canvas.size()) {
            Ok(pipeline) => {
                if let Err(e) = pipeline.check_ready() {
                    log::warn!("[backdrop] {}; frames will be skipped", e);
                }
                let (width, height) = self.canvas.size();
                log::info!(
                    "[backdrop] renderer ready: {}x{}, {} nodes",
                    width,
                    height,
                    self.field.nodes().len()
                );
                self.pipeline = Some(pipeline);
                self.state = RendererState::Ready;
                self.skip_reported = false;
                Ok(())
            }
            Err(e) => {
                log::error!("[backdrop] initialization failed: {}", e);
                self.state = RendererState::Failed;
                Err(e)
            }
        }
    }

    /// Advance the motion field by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.state == RendererState::Destroyed {
            return;
        }
        self.field.update(dt);
    }

    /// Draw one frame at host time `time` (seconds)
    ///
    /// Skips the frame with a warning when any resource is missing.
    pub fn render(&mut self, time: f64) {
        let Some(pipeline) = self.pipeline.as_mut() else {
            self.report_skip(&format!("renderer is {:?}", self.state));
            return;
        };

        if let Err(e) = pipeline.check_ready() {
            self.report_skip(&e.to_string());
            return;
        }

        if pipeline.draw_frame(&self.field, &self.config, time) {
            self.fps.record_frame(time);
            self.skip_reported = false;
        }
    }

    /// Warn on the first skipped frame of a run, then stay quiet
    fn report_skip(&mut self, reason: &str) {
        if self.skip_reported {
            log::debug!("[backdrop] frame skipped: {}", reason);
        } else {
            log::warn!("[backdrop] frame skipped: {}", reason);
            self.skip_reported = true;
        }
    }

    /// Re-sync the canvas and rebuild size-dependent state if it changed
    ///
    /// Also retries buffer and framebuffer allocation when an earlier
    /// attempt failed, even at an unchanged size.
    pub fn resize(&mut self) {
        if self.state == RendererState::Destroyed {
            return;
        }
        let changed = resize_canvas(&mut self.canvas);
        let incomplete = self
            .pipeline
            .as_ref()
            .is_some_and(|pipeline| pipeline.check_ready().is_err());
        if !changed && !incomplete {
            return;
        }

        let (width, height) = self.canvas.size();
        if changed {
            self.field.resize(width as f32, height as f32);
        }
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.rebuild_sized(&self.field, (width, height));
        }
        if changed {
            log::debug!("[backdrop] resized to {}x{}", width, height);
        } else {
            log::debug!("[backdrop] retrying resource allocation at {}x{}", width, height);
        }
    }

    /// Forward a pointer sample given in client (CSS) pixels
    pub fn update_mouse(&mut self, client_x: f64, client_y: f64, dt: f32) {
        if self.state == RendererState::Destroyed {
            return;
        }
        let dpr = self.canvas.device_pixel_ratio();
        self.field
            .update_mouse((client_x * dpr) as f32, (client_y * dpr) as f32, dt);
    }

    pub fn deactivate_mouse(&mut self) {
        self.field.deactivate_mouse();
    }

    /// Release every GPU resource; later calls do nothing
    pub fn destroy(&mut self) {
        if self.state == RendererState::Destroyed {
            return;
        }
        self.pipeline = None;
        self.state = RendererState::Destroyed;
        log::info!("[backdrop] renderer destroyed");
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == RendererState::Ready
    }

    pub fn field(&self) -> &MotionField {
        &self.field
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn canvas(&self) -> &S {
        &self.canvas
    }

    /// Mutable canvas access; call [`resize`](Self::resize) after changing
    /// its layout size
    pub fn canvas_mut(&mut self) -> &mut S {
        &mut self.canvas
    }
}
