/// Pass 1 vertex stage: expands each node into a screen-aligned sprite quad
///
/// Instance attributes: rest position, offset, scale, glow. The quad corner
/// comes from the vertex index of a 4-vertex triangle strip.
pub const LATTICE_VERTEX: &str = r#"
struct LatticeUniforms {
    resolution: vec2<f32>,
    time: f32,
    point_size: f32,
    node_color: vec4<f32>,
    glow_color: vec4<f32>,
    mouse: vec4<f32>,
    mouse_active: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) glow: f32,
};

@group(0) @binding(0) var<uniform> uniforms: LatticeUniforms;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) rest: vec2<f32>,
    @location(1) offset: vec2<f32>,
    @location(2) scale: f32,
    @location(3) glow: f32,
) -> VsOut {
    var out: VsOut;

    // Strip order: (-1,-1) (1,-1) (-1,1) (1,1)
    let corner = vec2<f32>(f32(vertex_index & 1u), f32(vertex_index >> 1u)) * 2.0 - 1.0;
    let size = uniforms.point_size * scale;
    let pixel = rest + offset + corner * size * 0.5;

    // Top-left pixel origin to clip space
    let clip = pixel / uniforms.resolution * 2.0 - 1.0;
    out.position = vec4<f32>(clip.x, -clip.y, 0.0, 1.0);
    out.local = corner;
    out.glow = glow;
    return out;
}
"#;

/// Pass 1 fragment stage: soft round sprite with glow pulse and roaming glint
pub const LATTICE_FRAGMENT: &str = r#"
struct LatticeUniforms {
    resolution: vec2<f32>,
    time: f32,
    point_size: f32,
    node_color: vec4<f32>,
    glow_color: vec4<f32>,
    mouse: vec4<f32>,
    mouse_active: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

struct FsIn {
    @location(0) local: vec2<f32>,
    @location(1) glow: f32,
};

@group(0) @binding(0) var<uniform> uniforms: LatticeUniforms;

@fragment
fn fs_main(in: FsIn) -> @location(0) vec4<f32> {
    let d = length(in.local);
    if (d > 1.0) {
        discard;
    }

    let t = uniforms.time;
    let falloff = 1.0 - smoothstep(0.5, 1.0, d);

    var color = mix(uniforms.node_color.rgb, uniforms.glow_color.rgb, in.glow);

    let pulse = 0.5 + 0.5 * sin(t * 3.0);
    let alpha = falloff * (0.6 + in.glow * (0.4 + 0.2 * pulse));

    // Glint orbits the sprite center
    let glint_center = vec2<f32>(sin(t * 0.8) * 0.45, cos(t * 1.1) * 0.45);
    let glint = 1.0 - smoothstep(0.0, 0.4, length(in.local - glint_center));
    color += vec3<f32>(glint * 0.35);

    return vec4<f32>(color, min(alpha, 1.0));
}
"#;
