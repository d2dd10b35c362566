//! Effect descriptors: immutable vertex/fragment source pairs plus the
//! shared header injected ahead of both stages.
//!
//! The stored sources are stage bodies only; [`EffectDescriptor::composed`]
//! prepends the header (params block, texture bindings, stage interface)
//! and returns the single translation unit a host hands to its shader
//! module constructor.

use crate::errors::EffectError;
use crate::validate::validate_effect;

/// Shared declarations injected ahead of every effect program.
///
/// The `EffectParams` field order is normative: it is mirrored byte for
/// byte by `EffectUniforms`, each `vec3<f32>` padded by the scalar that
/// follows it.
pub const EFFECT_HEADER: &str = r#"struct EffectParams {
    background_color: vec3<f32>,
    time: f32,
    color1: vec3<f32>,
    real_time: f32,
    color2: vec3<f32>,
    resolution: f32,
    color_strength: f32,
    seed: f32,
    peak_value: f32,
    mode: i32,
}

@group(0) @binding(0)
var<uniform> params: EffectParams;

@group(0) @binding(1)
var source_texture: texture_2d<f32>;

@group(0) @binding(2)
var source_sampler: sampler;

struct VSOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
}
"#;

/// Fullscreen-plane passthrough vertex stage.
///
/// Emits the four corners of a quad in `[-0.5, 0.5]` from the vertex index
/// (host draws a 4-vertex triangle strip, no vertex buffer). Clip w is 0.5,
/// so the quad covers the viewport at half the depth range, and the corner
/// position passes through unchanged as the interpolated coordinate.
pub const KALEIDOSCOPE_VERTEX: &str = r#"@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> VSOut {
    let x = f32(vi & 1u) - 0.5;
    let y = f32((vi >> 1u) & 1u) - 0.5;
    var out: VSOut;
    out.pos = vec4<f32>(x, y, 0.0, 0.5);
    out.uv = vec2<f32>(x, y);
    return out;
}
"#;

/// The kaleidoscope fragment stage.
///
/// A pure per-pixel computation with no cross-pixel dependencies. The CPU
/// twin of this program lives in the `reference` module; the two are kept
/// in step, constant for constant.
pub const KALEIDOSCOPE_FRAGMENT: &str = r#"const PI: f32 = 3.14159265;
const TAU: f32 = 6.2831853;
const SECTIONS: f32 = 10.0;

// floor-based mod and fract, result follows the divisor sign
fn gmod(x: f32, y: f32) -> f32 {
    return x - y * floor(x / y);
}

fn gmod2(v: vec2<f32>, y: f32) -> vec2<f32> {
    return v - y * floor(v / y);
}

fn gfract(x: f32) -> f32 {
    return x - floor(x);
}

fn hue_to_rgb(h: f32) -> vec3<f32> {
    let r = abs(h * 6.0 - 3.0) - 1.0;
    let g = 2.0 - abs(h * 6.0 - 2.0);
    let b = 2.0 - abs(h * 6.0 - 4.0);
    return clamp(vec3<f32>(r, g, b), vec3<f32>(0.0), vec3<f32>(1.0));
}

fn hsv_to_rgb(hsv: vec3<f32>) -> vec3<f32> {
    let rgb = hue_to_rgb(hsv.x);
    return ((rgb - vec3<f32>(1.0)) * hsv.y + vec3<f32>(1.0)) * hsv.z;
}

// triangle wave, period 2, range [-1, 1]
fn spike(x: f32) -> f32 {
    let f = floor(x);
    if (gmod(f, 2.0) == 0.0) {
        return 1.0 - 2.0 * (x - f);
    }
    return -1.0 + 2.0 * (x - f);
}

// blend weight is the distance from the waveform midpoint
fn blend_pair(c1: vec3<f32>, c2: vec3<f32>, t: f32) -> vec3<f32> {
    return c1 + (c2 - c1) * abs(t);
}

fn hash(uv: vec2<f32>) -> f32 {
    let dt = dot(uv, vec2<f32>(12.9898, 78.233));
    let sn = gmod(dt, PI);
    return gfract(sin(sn) * 43758.5453);
}

@fragment
fn fs_main(in: VSOut) -> @location(0) vec4<f32> {
    let uvs = vec2<f32>(in.uv.x, in.uv.y / params.resolution);

    // breathing zoom, desynchronized across instances by the seed
    let scale = ((cos(params.real_time / (15000.0 + params.seed)) + 1.0) / 4.0 + 0.5) * 1.2;
    let pos = uvs * scale;

    // kaleidoscope fold; the radius-weighted term makes outer rings spin faster
    let rad = length(pos);
    let angle = atan2(pos.y, pos.x) + length(uvs) * tan(params.time / 20000.0);
    var ma = gmod(angle, TAU / SECTIONS);
    ma = abs(ma - PI / SECTIONS);
    let p = vec2<f32>(cos(ma), sin(ma)) * rad + vec2<f32>(0.5);

    let drift = sin(params.time / 24000.0);
    let sampled = textureSample(source_texture, source_sampler,
        gmod2(p + vec2<f32>(drift), 1.0));

    var grey = (sampled.r + sampled.g + sampled.b) / 3.0;
    grey = clamp(grey + 0.2, 0.0, 1.0);
    grey = grey * grey;

    // hue tint layer; not part of the current mix
    let hue = gmod(length(uvs) * 2.0 + spike(params.time / 5000.0), 1.0);
    let tint = hsv_to_rgb(vec3<f32>(hue, 1.0, 1.0)) * params.color_strength;

    let foreground = blend_pair(params.color1, params.color2,
        spike(params.real_time / 6000.0 + rad));

    if (params.mode == 1) {
        grey = grey * 1.2;
    } else {
        grey = grey + params.peak_value * 0.5;
    }

    var color = params.background_color + foreground * grey;

    // frame-seeded dither over the whole composition; output stays unclamped
    let nse = hash(in.uv + vec2<f32>(cos(params.real_time) * 15000.0));
    color += vec3<f32>(nse * (0.1 + 0.15 * params.peak_value));

    return vec4<f32>(color, 1.0);
}
"#;

/// An immutable vertex + fragment source pair.
///
/// Created once at load time and read-only thereafter; all time-varying
/// behavior comes from the uniforms the host re-supplies per evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectDescriptor {
    vertex_source: String,
    fragment_source: String,
}

impl EffectDescriptor {
    /// The built-in audio-reactive kaleidoscope effect.
    pub fn kaleidoscope() -> Self {
        Self {
            vertex_source: KALEIDOSCOPE_VERTEX.to_string(),
            fragment_source: KALEIDOSCOPE_FRAGMENT.to_string(),
        }
    }

    /// Build a descriptor from custom stage bodies, validating the composed
    /// program before it can reach a host.
    pub fn from_sources(vertex: &str, fragment: &str) -> Result<Self, EffectError> {
        let descriptor = Self {
            vertex_source: vertex.to_string(),
            fragment_source: fragment.to_string(),
        };
        validate_effect(&descriptor.composed())?;
        Ok(descriptor)
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    /// The complete program text: header, vertex stage, fragment stage.
    pub fn composed(&self) -> String {
        let mut out = String::with_capacity(
            EFFECT_HEADER.len() + self.vertex_source.len() + self.fragment_source.len() + 2,
        );
        out.push_str(EFFECT_HEADER);
        out.push('\n');
        out.push_str(&self.vertex_source);
        out.push('\n');
        out.push_str(&self.fragment_source);
        out
    }
}
