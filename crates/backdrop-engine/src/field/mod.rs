//! Procedural motion field
//!
//! Owns the lattice of [`Node`]s tiling the canvas and advances them every
//! frame through a [`MotionLaw`]. The field is a pure function of its clock
//! and the rest grid: no velocity is integrated, so two fields fed the same
//! `update` sequence end up bit-identical.
//!
//! The lattice is rebuilt wholesale on every resize; nodes are never
//! mutated individually outside [`MotionField::update`].

mod motion;
mod node;

pub use motion::{
    offset_envelope, BreathingLaw, Displacement, MotionContext, MotionLaw, AXIS_WAVENUMBER,
    BREATH_AMPLITUDE_PX, BREATH_FREQUENCY_HZ, DIAGONAL_WAVENUMBER, RIPPLE_WAVENUMBER,
};
pub use node::{Node, PointerState, POINTER_SMOOTHING};

use serde::Serialize;

use crate::math::Vec2;

/// Column/row counts of the current lattice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    pub columns: usize,
    pub rows: usize,
}

impl GridDimensions {
    /// Lattice covering `width`×`height` at `spacing`, plus one edge row/column
    pub fn covering(spacing: f32, width: f32, height: f32) -> Self {
        Self {
            columns: cells(width, spacing) + 1,
            rows: cells(height, spacing) + 1,
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.columns * self.rows
    }
}

fn cells(extent: f32, spacing: f32) -> usize {
    (extent.max(0.0) / spacing).ceil() as usize
}

/// Lattice of nodes animated by a motion law
pub struct MotionField {
    nodes: Vec<Node>,
    spacing: f32,
    width: f32,
    height: f32,
    dimensions: GridDimensions,
    time: f32,
    pointer: PointerState,
    law: Box<dyn MotionLaw>,
}

impl MotionField {
    /// Field with the default breathing law
    pub fn new(spacing: f32, width: f32, height: f32) -> Self {
        Self::with_law(spacing, width, height, Box::new(BreathingLaw::default()))
    }

    /// Field driven by a custom law
    pub fn with_law(spacing: f32, width: f32, height: f32, law: Box<dyn MotionLaw>) -> Self {
        let mut field = Self {
            nodes: Vec::new(),
            spacing,
            width,
            height,
            dimensions: GridDimensions::default(),
            time: 0.0,
            pointer: PointerState::default(),
            law,
        };
        field.initialize(spacing, width, height);
        field
    }

    /// Rebuild the lattice at rest
    ///
    /// `spacing` must be positive; configuration validation guarantees this
    /// for host-supplied values.
    pub fn initialize(&mut self, spacing: f32, width: f32, height: f32) {
        debug_assert!(spacing > 0.0, "lattice spacing must be positive");

        self.spacing = spacing;
        self.width = width;
        self.height = height;
        self.dimensions = GridDimensions::covering(spacing, width, height);

        let GridDimensions { columns, rows } = self.dimensions;
        self.nodes = (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |col| {
                    Node::at_rest(Vec2::new(col as f32 * spacing, row as f32 * spacing))
                })
            })
            .collect();

        log::debug!(
            "[backdrop] lattice {}x{} ({} nodes) for {}x{} at spacing {}",
            columns,
            rows,
            self.nodes.len(),
            width,
            height,
            spacing
        );
    }

    /// Advance the clock by `dt` seconds and re-evaluate every node
    pub fn update(&mut self, dt: f32) {
        self.time += dt;

        let ctx = MotionContext {
            time: self.time,
            center: self.center(),
            pointer: &self.pointer,
        };

        for node in &mut self.nodes {
            let d = self.law.compute_offset(node, &ctx);
            node.position = node.rest + d.offset;
            node.scale = d.scale;
            node.glow = d.glow;
        }
    }

    /// Record a pointer sample in canvas pixels
    pub fn update_mouse(&mut self, x: f32, y: f32, dt: f32) {
        self.pointer.track(Vec2::new(x, y), dt);
    }

    pub fn deactivate_mouse(&mut self) {
        self.pointer.deactivate();
    }

    /// Rebuild the lattice for a new canvas size, discarding node state
    pub fn resize(&mut self, width: f32, height: f32) {
        self.initialize(self.spacing, width, height);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn mouse_state(&self) -> &PointerState {
        &self.pointer
    }

    /// Accumulated field time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn grid_dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Canvas size the lattice was built for
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_120x90_at_30() {
        let field = MotionField::new(30.0, 120.0, 90.0);
        assert_eq!(
            field.grid_dimensions(),
            GridDimensions {
                columns: 5,
                rows: 4
            }
        );
        assert_eq!(field.nodes().len(), 20);

        let last = field.nodes().last().unwrap();
        assert_eq!(last.rest, Vec2::new(120.0, 90.0));
    }

    #[test]
    fn test_lattice_partial_edge_coverage() {
        // 100 / 30 = 3.33 -> 4 cells -> 5 columns
        let field = MotionField::new(30.0, 100.0, 10.0);
        assert_eq!(field.grid_dimensions().columns, 5);
        assert_eq!(field.grid_dimensions().rows, 2);
        let max_x = field.nodes().iter().map(|n| n.rest.x).fold(0.0, f32::max);
        assert!(max_x >= 100.0);
    }

    #[test]
    fn test_lattice_is_row_major() {
        let field = MotionField::new(10.0, 20.0, 10.0);
        let rests: Vec<_> = field.nodes().iter().map(|n| n.rest.to_array()).collect();
        assert_eq!(
            rests,
            vec![
                [0.0, 0.0],
                [10.0, 0.0],
                [20.0, 0.0],
                [0.0, 10.0],
                [10.0, 10.0],
                [20.0, 10.0]
            ]
        );
    }

    #[test]
    fn test_zero_sized_canvas_still_has_origin_node() {
        let field = MotionField::new(30.0, 0.0, 0.0);
        assert_eq!(field.nodes().len(), 1);
        assert_eq!(field.nodes()[0].rest, Vec2::ZERO);
    }

    #[test]
    fn test_update_accumulates_time() {
        let mut field = MotionField::new(30.0, 60.0, 60.0);
        field.update(0.25);
        field.update(0.5);
        assert!((field.time() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_update_moves_nodes_off_rest() {
        let mut field = MotionField::new(30.0, 120.0, 90.0);
        field.update(0.4);
        assert!(field.nodes().iter().any(|n| n.offset().length() > 0.0));
        assert!(field.nodes().iter().all(|n| n.scale == 1.0 && n.glow == 0.0));
    }

    #[test]
    fn test_resize_discards_state_but_keeps_clock() {
        let mut field = MotionField::new(30.0, 120.0, 90.0);
        field.update(1.0);
        field.resize(60.0, 60.0);
        assert_eq!(field.nodes().len(), 9);
        assert!(field.nodes().iter().all(|n| n.position == n.rest));
        assert!((field.time() - 1.0).abs() < 1e-6);
        assert_eq!(field.center(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_mouse_state_roundtrip() {
        let mut field = MotionField::new(30.0, 120.0, 90.0);
        field.update_mouse(10.0, 20.0, 0.016);
        assert!(field.mouse_state().active);
        assert_eq!(field.mouse_state().position, Vec2::new(10.0, 20.0));
        field.deactivate_mouse();
        assert!(!field.mouse_state().active);
    }

    struct Frozen;

    impl MotionLaw for Frozen {
        fn compute_offset(&self, _node: &Node, _ctx: &MotionContext<'_>) -> Displacement {
            Displacement {
                offset: Vec2::new(1.0, -1.0),
                scale: 2.0,
                glow: 0.5,
            }
        }
    }

    #[test]
    fn test_custom_law_is_applied() {
        let mut field = MotionField::with_law(30.0, 30.0, 30.0, Box::new(Frozen));
        field.update(0.1);
        for node in field.nodes() {
            assert_eq!(node.offset(), Vec2::new(1.0, -1.0));
            assert_eq!(node.scale, 2.0);
            assert_eq!(node.glow, 0.5);
        }
    }
}
