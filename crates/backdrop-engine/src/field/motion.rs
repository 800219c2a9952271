//! Motion laws
//!
//! A law maps a node's rest coordinate and the field clock to a displacement.
//! The field applies it to every node each step; swapping laws changes the
//! animation without touching lattice management.

use std::f32::consts::TAU;

use super::node::{Node, PointerState};
use crate::math::Vec2;

/// Breathing frequency in Hz
pub const BREATH_FREQUENCY_HZ: f32 = 0.3;

/// Peak amplitude of a single wave term, in pixels
pub const BREATH_AMPLITUDE_PX: f32 = 3.0;

/// Spatial frequency of the radial ripple
pub const RIPPLE_WAVENUMBER: f32 = 0.02;

/// Spatial frequency of the diagonal wave
pub const DIAGONAL_WAVENUMBER: f32 = 0.01;

/// Spatial frequency of the horizontal and vertical waves
pub const AXIS_WAVENUMBER: f32 = 0.015;

const RIPPLE_WEIGHT: f32 = 0.4;
const DIAGONAL_WEIGHT: f32 = 0.3;
const AXIS_WEIGHT: f32 = 0.3;

/// Bound on |dx| and |dy| for a breathing law with the given amplitude
pub fn offset_envelope(amplitude: f32) -> f32 {
    amplitude * (RIPPLE_WEIGHT + DIAGONAL_WEIGHT + 2.0 * AXIS_WEIGHT)
}

/// Per-step inputs shared by every node
#[derive(Clone, Copy, Debug)]
pub struct MotionContext<'a> {
    /// Field clock in seconds
    pub time: f32,
    /// Canvas center in pixels
    pub center: Vec2,
    pub pointer: &'a PointerState,
}

/// Result of a law for one node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
    pub offset: Vec2,
    pub scale: f32,
    pub glow: f32,
}

/// Strategy computing each node's displacement for a step
pub trait MotionLaw {
    fn compute_offset(&self, node: &Node, ctx: &MotionContext<'_>) -> Displacement;
}

/// Superposed ripple and travelling waves; ignores the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreathingLaw {
    pub frequency: f32,
    pub amplitude: f32,
}

impl Default for BreathingLaw {
    fn default() -> Self {
        Self {
            frequency: BREATH_FREQUENCY_HZ,
            amplitude: BREATH_AMPLITUDE_PX,
        }
    }
}

impl MotionLaw for BreathingLaw {
    fn compute_offset(&self, node: &Node, ctx: &MotionContext<'_>) -> Displacement {
        let phase = ctx.time * self.frequency * TAU;
        let Vec2 { x, y } = node.rest;
        let a = self.amplitude;

        let dist = node.rest.distance(ctx.center);
        let ripple = (dist * RIPPLE_WAVENUMBER - phase).sin() * a;
        let diagonal = (x * DIAGONAL_WAVENUMBER + y * DIAGONAL_WAVENUMBER + phase).sin() * a * 0.6;
        let horizontal = (x * AXIS_WAVENUMBER + phase * 1.3).sin() * a * 0.4;
        let vertical = (y * AXIS_WAVENUMBER + phase * 1.7).cos() * a * 0.4;

        let dx = ripple * RIPPLE_WEIGHT + diagonal * DIAGONAL_WEIGHT + horizontal * AXIS_WEIGHT;
        let dy = ripple * RIPPLE_WEIGHT + diagonal * DIAGONAL_WEIGHT + vertical * AXIS_WEIGHT;

        Displacement {
            offset: Vec2::new(dx, dy),
            scale: 1.0,
            glow: 0.0,
        }
    }
}
