/// Pass 1 uniform block
/// NOTE: Must match `LatticeUniforms` in the lattice WGSL byte for byte.
/// Total struct size is 80 bytes (padded to a 16-byte boundary).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LatticeUniforms {
    pub resolution: [f32; 2], // offset 0
    pub time: f32,            // offset 8
    pub point_size: f32,      // offset 12
    pub node_color: [f32; 4], // offset 16
    pub glow_color: [f32; 4], // offset 32
    pub mouse: [f32; 4],      // offset 48 - x, y, vx, vy
    pub mouse_active: f32,    // offset 64
    pub _pad: [f32; 3],       // offset 68 - padding to 80 bytes
}

/// Pass 2 uniform block (16 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlassUniforms {
    pub resolution: [f32; 2], // offset 0
    pub time: f32,            // offset 8
    pub strength: f32,        // offset 12
}

/// Expand an RGB triple to RGBA with full alpha
pub fn rgba(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<LatticeUniforms>(), 80);
        assert_eq!(std::mem::size_of::<GlassUniforms>(), 16);
    }

    #[test]
    fn test_lattice_uniform_bytes() {
        let u = LatticeUniforms {
            resolution: [640.0, 480.0],
            mouse_active: 1.0,
            ..Default::default()
        };
        let bytes: &[u8] = bytemuck::bytes_of(&u);
        assert_eq!(&bytes[0..4], &640.0f32.to_ne_bytes());
        assert_eq!(&bytes[64..68], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_rgba_appends_opaque_alpha() {
        assert_eq!(rgba([0.1, 0.2, 0.3]), [0.1, 0.2, 0.3, 1.0]);
    }
}
