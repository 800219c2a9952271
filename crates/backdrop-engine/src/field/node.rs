//! Lattice node and pointer state

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Smoothing factor for the pointer velocity moving average
pub const POINTER_SMOOTHING: f32 = 0.3;

/// One vertex of the lattice
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Current position (rest + offset)
    pub position: Vec2,
    /// Undisturbed grid coordinate, fixed for a given canvas size
    pub rest: Vec2,
    /// Not driven by the breathing law; kept for reactive laws
    pub velocity: Vec2,
    pub scale: f32,
    /// Glow intensity (0..1)
    pub glow: f32,
}

impl Node {
    /// Node at rest on the given grid coordinate
    pub fn at_rest(rest: Vec2) -> Self {
        Self {
            position: rest,
            rest,
            velocity: Vec2::ZERO,
            scale: 1.0,
            glow: 0.0,
        }
    }

    /// Displacement from the rest position
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.position - self.rest
    }
}

/// Pointer position and smoothed velocity, in canvas pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub active: bool,
}

impl PointerState {
    /// Record a pointer sample
    ///
    /// The first sample after the pointer becomes active contributes no
    /// velocity, so a stale position never produces a jump.
    pub fn track(&mut self, position: Vec2, dt: f32) {
        if self.active && dt > 0.0 {
            let instant = (position - self.position) * (1.0 / dt);
            self.velocity =
                self.velocity * (1.0 - POINTER_SMOOTHING) + instant * POINTER_SMOOTHING;
        }
        self.position = position;
        self.active = true;
    }

    /// Pointer left the surface; position and velocity keep their last values
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_at_rest() {
        let node = Node::at_rest(Vec2::new(30.0, 60.0));
        assert_eq!(node.position, node.rest);
        assert_eq!(node.velocity, Vec2::ZERO);
        assert_eq!(node.scale, 1.0);
        assert_eq!(node.glow, 0.0);
        assert_eq!(node.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_first_sample_has_no_velocity() {
        let mut pointer = PointerState::default();
        pointer.track(Vec2::new(100.0, 100.0), 0.016);
        assert!(pointer.active);
        assert_eq!(pointer.velocity, Vec2::ZERO);
        assert_eq!(pointer.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_pointer_velocity_is_smoothed() {
        let mut pointer = PointerState::default();
        pointer.track(Vec2::new(0.0, 0.0), 0.1);
        pointer.track(Vec2::new(10.0, 0.0), 0.1);
        // instant = 100 px/s, smoothed = 0.3 * 100
        assert!((pointer.velocity.x - 30.0).abs() < 1e-4);

        pointer.track(Vec2::new(20.0, 0.0), 0.1);
        // 30 * 0.7 + 100 * 0.3
        assert!((pointer.velocity.x - 51.0).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_zero_dt_keeps_velocity() {
        let mut pointer = PointerState::default();
        pointer.track(Vec2::new(0.0, 0.0), 0.1);
        pointer.track(Vec2::new(10.0, 0.0), 0.1);
        let before = pointer.velocity;
        pointer.track(Vec2::new(50.0, 0.0), 0.0);
        assert_eq!(pointer.velocity, before);
        assert_eq!(pointer.position.x, 50.0);
    }

    #[test]
    fn test_pointer_deactivate() {
        let mut pointer = PointerState::default();
        pointer.track(Vec2::new(0.0, 0.0), 0.1);
        pointer.track(Vec2::new(10.0, 10.0), 0.1);
        let velocity = pointer.velocity;
        pointer.deactivate();
        assert!(!pointer.active);
        assert_eq!(pointer.velocity, velocity);
        assert_eq!(pointer.position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_pointer_reactivation_starts_without_jump() {
        let mut pointer = PointerState::default();
        pointer.track(Vec2::new(0.0, 0.0), 0.1);
        pointer.track(Vec2::new(10.0, 0.0), 0.1);
        let velocity = pointer.velocity;
        pointer.deactivate();

        // A far-away re-entry is not differenced against the stale position
        pointer.track(Vec2::new(500.0, 500.0), 0.1);
        assert!(pointer.active);
        assert_eq!(pointer.velocity, velocity);
    }
}
