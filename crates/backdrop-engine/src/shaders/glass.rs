/// Pass 2 vertex stage: full-screen quad with explicit texcoords
pub const GLASS_VERTEX: &str = r#"
struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
) -> VsOut {
    var out: VsOut;
    out.position = vec4<f32>(position, 0.0, 1.0);
    out.uv = texcoord;
    return out;
}
"#;

/// Pass 2 fragment stage: frosted glass over the lattice texture
///
/// A 3-octave value-noise height field stands in for the glass surface.
/// Its forward-difference gradient bends the lookup, each channel is read
/// with a small horizontal shift, and every read is a 5x5 box blur whose
/// radius grows with the local height.
pub const GLASS_FRAGMENT: &str = r#"
struct GlassUniforms {
    resolution: vec2<f32>,
    time: f32,
    strength: f32,
};

struct FsIn {
    @location(0) uv: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: GlassUniforms;
@group(1) @binding(0) var scene_tex: texture_2d<f32>;
@group(1) @binding(1) var scene_samp: sampler;

fn hash21(p: vec2<f32>) -> f32 {
    let p3 = fract(vec3<f32>(p.x, p.y, p.x) * 0.1031);
    let q = p3 + dot(p3, p3.yzx + 33.33);
    return fract((q.x + q.y) * q.z);
}

fn value_noise(p: vec2<f32>) -> f32 {
    let i = floor(p);
    let f = fract(p);
    let u = f * f * (3.0 - 2.0 * f);
    return mix(
        mix(hash21(i), hash21(i + vec2<f32>(1.0, 0.0)), u.x),
        mix(hash21(i + vec2<f32>(0.0, 1.0)), hash21(i + vec2<f32>(1.0, 1.0)), u.x),
        u.y
    );
}

fn height_at(uv: vec2<f32>) -> f32 {
    let drift = uniforms.time * 0.03;
    var h = value_noise(uv * 3.0 + vec2<f32>(drift, drift * 0.6)) * 0.5;
    h += value_noise(uv * 7.0 + vec2<f32>(-drift * 1.4, drift * 0.8)) * 0.3;
    h += value_noise(uv * 17.0 + vec2<f32>(drift * 0.5, -drift * 1.2)) * 0.2;
    return h;
}

fn frosted(uv: vec2<f32>, radius: f32) -> vec4<f32> {
    let step_uv = radius / uniforms.resolution;
    var acc = vec4<f32>(0.0);
    for (var y: i32 = -2; y <= 2; y = y + 1) {
        for (var x: i32 = -2; x <= 2; x = x + 1) {
            let tap = uv + vec2<f32>(f32(x), f32(y)) * step_uv;
            acc += textureSampleLevel(scene_tex, scene_samp, tap, 0.0);
        }
    }
    return acc / 25.0;
}

@fragment
fn fs_main(in: FsIn) -> @location(0) vec4<f32> {
    let uv = in.uv;

    let eps = 0.0015;
    let h = height_at(uv);
    let hx = height_at(uv + vec2<f32>(eps, 0.0));
    let hy = height_at(uv + vec2<f32>(0.0, eps));
    let normal = vec2<f32>(hx - h, hy - h) / eps;

    let base = uv + normal * uniforms.strength;
    let radius = mix(0.5, 3.0, h);
    let aberration = vec2<f32>(0.0025, 0.0);

    let r = frosted(base + aberration, radius).r;
    let g = frosted(base, radius).g;
    let b = frosted(base - aberration, radius).b;

    return vec4<f32>(r, g, b, 1.0);
}
"#;
