//! Pure scalar and color helpers shared by the fragment program and the CPU
//! reference evaluation.
//!
//! Every function here is total over the reals, side-effect free, and
//! evaluated identically on both sides of the GPU boundary. The GLSL-style
//! `gmod`/`gfract` variants exist because `f32::fract` and the `%` operator
//! take the sign of the dividend, while the shading formulas need the
//! floor-based forms whose result follows the divisor.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

/// Floor-based modulo: `x - y * floor(x / y)`.
pub fn gmod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// Floor-based fractional part, always in `[0, 1)` for finite input.
pub fn gfract(x: f32) -> f32 {
    x - x.floor()
}

/// Triangle wave with period 2 and range `[-1, 1]`.
///
/// Even-numbered unit intervals ramp down from 1 to -1, odd-numbered ones
/// ramp back up. `spike(0) = 1`, `spike(1) = -1`, `spike(0.5) = 0`.
pub fn spike(x: f32) -> f32 {
    let f = x.floor();
    if gmod(f, 2.0) == 0.0 {
        1.0 - 2.0 * (x - f)
    } else {
        -1.0 + 2.0 * (x - f)
    }
}

/// Dot-product/sine hash mapping a 2D coordinate to a pseudo-uniform scalar
/// in `[0, 1)`. Visual dithering only, nothing cryptographic.
pub fn hash(uv: Vec2) -> f32 {
    let dt = uv.dot(Vec2::new(12.9898, 78.233));
    let sn = gmod(dt, PI);
    gfract(sn.sin() * 43758.5453)
}

/// Standard hue-to-RGB construction, saturated to `[0, 1]` per channel.
pub fn hue_to_rgb(h: f32) -> Vec3 {
    let r = (h * 6.0 - 3.0).abs() - 1.0;
    let g = 2.0 - (h * 6.0 - 2.0).abs();
    let b = 2.0 - (h * 6.0 - 4.0).abs();
    Vec3::new(r, g, b).clamp(Vec3::ZERO, Vec3::ONE)
}

/// HSV to RGB with the hue channel expanded through [`hue_to_rgb`].
pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let rgb = hue_to_rgb(hsv.x);
    ((rgb - Vec3::ONE) * hsv.y + Vec3::ONE) * hsv.z
}

/// Straight-line interpolation between two colors.
pub fn lerp_color(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start + (end - start) * t
}

/// Blend between two colors by distance from the waveform midpoint.
///
/// `t` is expected in `[-1, 1]`; `t = 0` yields `c1`, either extreme yields
/// `c2`, and the sign of `t` is ignored.
pub fn blend_pair(c1: Vec3, c2: Vec3, t: f32) -> Vec3 {
    lerp_color(c1, c2, t.abs())
}
