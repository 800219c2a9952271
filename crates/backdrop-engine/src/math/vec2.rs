//! 2D vector for lattice positions and offsets

use serde::{Deserialize, Serialize};

/// 2D vector in canvas pixels (top-left origin)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Component array, in the layout vertex buffers expect
    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_add_sub_roundtrip_offset() {
        let rest = Vec2::new(60.0, 30.0);
        let offset = Vec2::new(1.5, -2.25);
        let position = rest + offset;
        let recovered = position - rest;
        assert!((recovered.x - 1.5).abs() < 1e-6);
        assert!((recovered.y + 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_vec2_distance_from_center() {
        let center = Vec2::new(60.0, 45.0);
        let corner = Vec2::new(0.0, 0.0);
        assert!((corner.distance(center) - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_vec2_scale_and_array() {
        let v = Vec2::new(3.0, 4.0) * 2.0;
        assert_eq!(v.to_array(), [6.0, 8.0]);
        assert!((v.length() - 10.0).abs() < 1e-6);
    }
}
