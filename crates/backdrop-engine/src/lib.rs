//! Hero Backdrop Engine
//!
//! Animated background for the portfolio hero section:
//! - A procedural "breathing" motion field over a lattice of points
//! - A GPU abstraction with fallible, logged resource creation
//! - A two-pass renderer: lattice into an off-screen texture, then a
//!   frosted-glass refraction composite onto the canvas
//!
//! ## Architecture
//!
//! - [`math`]: `Vec2` used by the field
//! - [`field`]: Lattice construction and the per-frame motion law
//! - [`gpu`]: `GpuContext` backend seam, scoped handles, creation helpers
//! - [`renderer`]: `LatticeRenderer` owning the pipeline and frame loop body
//! - [`config`]: Host-supplied configuration with defaults
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use backdrop_engine::MotionField;
//!
//! let mut field = MotionField::new(30.0, 120.0, 90.0);
//! assert_eq!(field.nodes().len(), 20);
//!
//! field.update(1.0 / 60.0);
//! assert!(field.time() > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: The field and orchestrator run without a browser
//! 2. **Host-Driven Time**: Nothing schedules itself; the page calls `update`/`render`
//! 3. **Degrade, Don't Crash**: GPU failures are logged and rendering becomes a no-op

pub mod config;
pub mod error;
pub mod field;
pub mod gpu;
pub mod math;
pub mod renderer;
pub mod shaders;

pub use config::RendererConfig;
pub use error::{ConfigError, RenderError};
pub use field::{
    BreathingLaw, Displacement, GridDimensions, MotionContext, MotionField, MotionLaw, Node,
    PointerState,
};
pub use gpu::{CanvasSurface, GpuContext};
pub use math::Vec2;
pub use renderer::{FpsCounter, LatticeRenderer, RendererState};

#[cfg(feature = "wasm")]
pub use gpu::wgpu_context::WgpuContext;
