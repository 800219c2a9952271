//! WGSL sources for the two render passes
//!
//! Stages live in separate modules and are compiled independently, then
//! linked by location. Uniform struct layouts mirror
//! `renderer::uniforms` byte for byte.

mod glass;
mod lattice;

pub use glass::{GLASS_FRAGMENT, GLASS_VERTEX};
pub use lattice::{LATTICE_FRAGMENT, LATTICE_VERTEX};
