//! Geometry shared by the motion field and renderer

mod vec2;

pub use vec2::Vec2;
