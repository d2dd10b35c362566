//! CPU twin of the fragment stage.
//!
//! [`shade`] implements the per-pixel color computation step for step, with
//! the same constants as the WGSL in `effect`. It exists so the shading
//! formulas are evaluable without a GPU: property tests run against it, and
//! hosts porting the formula layer can diff their output against
//! [`render_frame`] grids.
//!
//! Every function here is pure. Evaluations are independent per coordinate,
//! the same embarrassingly-parallel contract the GPU pipeline gets.

use crate::fold::fold_point;
use crate::formula::{blend_pair, gmod, hash, hsv_to_rgb, spike};
use crate::sampler::TextureSource;
use crate::uniforms::{EffectUniforms, ToneMode};
use glam::{Vec2, Vec3, Vec4};
use image::{Rgba, RgbaImage};

/// Breathing zoom factor: a slow cosine of the wall clock, offset by the
/// per-instance seed so concurrent instances diverge.
pub fn breathing_scale(real_time: f32, seed: f32) -> f32 {
    (((real_time / (15000.0 + seed)).cos() + 1.0) / 4.0 + 0.5) * 1.2
}

/// Evaluate the fragment color at one interpolated coordinate.
///
/// `v_uv` is the vertex stage's passthrough position, `[-0.5, 0.5]` on each
/// axis over the fullscreen quad. The result is deliberately unclamped:
/// out-of-range channels pass through, and clamping is left to the
/// fixed-point output conversion (see [`render_frame`]).
pub fn shade(v_uv: Vec2, params: &EffectUniforms, texture: &dyn TextureSource) -> Vec4 {
    let uvs = Vec2::new(v_uv.x, v_uv.y / params.resolution);

    let scale = breathing_scale(params.real_time, params.seed);
    let pos = uvs * scale;

    // radius-weighted spin; atan2(0, 0) is 0, so the center never swirls
    let rad = pos.length();
    let spin = uvs.length() * (params.time / 20000.0).tan();
    let p = fold_point(pos, spin);

    let drift = (params.time / 24000.0).sin();
    let sampled = texture.sample(gmod(p.x + drift, 1.0), gmod(p.y + drift, 1.0));

    // greyscale luminance with a lifted, squared contrast curve
    let mut grey = ((sampled.x + sampled.y + sampled.z) / 3.0 + 0.2).clamp(0.0, 1.0);
    grey *= grey;

    let foreground = blend_pair(
        Vec3::from(params.color1),
        Vec3::from(params.color2),
        spike(params.real_time / 6000.0 + rad),
    );

    grey = match params.tone_mode() {
        ToneMode::Boosted => grey * 1.2,
        ToneMode::PeakDriven => grey + params.peak_value * 0.5,
    };

    let mut color = Vec3::from(params.background_color) + foreground * grey;

    // reseed the dither every frame through the wall clock
    let nse = hash(v_uv + Vec2::splat(params.real_time.cos() * 15000.0));
    color += Vec3::splat(nse * (0.1 + 0.15 * params.peak_value));

    color.extend(1.0)
}

/// The hue tint layer: distance-from-center hue cycled by the spike
/// waveform, scaled by `color_strength`.
///
/// Computed by the fragment stage but intentionally absent from its final
/// mix; exposed here for hosts and effect variants that blend it in.
pub fn hue_tint(v_uv: Vec2, params: &EffectUniforms) -> Vec3 {
    let uvs = Vec2::new(v_uv.x, v_uv.y / params.resolution);
    let hue = gmod(uvs.length() * 2.0 + spike(params.time / 5000.0), 1.0);
    hsv_to_rgb(Vec3::new(hue, 1.0, 1.0)) * params.color_strength
}

/// Evaluate [`shade`] over a pixel grid.
///
/// Pixel centers map onto the quad's coordinate range with y up, and each
/// channel goes through the clamping fixed-point conversion the host's
/// output stage would apply.
pub fn render_frame(
    params: &EffectUniforms,
    texture: &dyn TextureSource,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let u = (x as f32 + 0.5) / width as f32 - 0.5;
        let v = 0.5 - (y as f32 + 0.5) / height as f32;
        *px = to_rgba8(shade(Vec2::new(u, v), params, texture));
    }
    log::debug!("evaluated {}x{} reference frame", width, height);
    out
}

fn to_rgba8(color: Vec4) -> Rgba<u8> {
    let chan = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([chan(color.x), chan(color.y), chan(color.z), chan(color.w)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SolidColor;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "expected {} ~ {}", a, b);
    }

    fn grey_texture(level: f32) -> SolidColor {
        SolidColor(Vec4::new(level, level, level, 1.0))
    }

    /// Uniforms where everything that adds color is zeroed, so the output
    /// is the noise term alone.
    fn silent_params() -> EffectUniforms {
        EffectUniforms {
            background_color: [0.0; 3],
            color1: [0.0; 3],
            color2: [0.0; 3],
            ..EffectUniforms::default()
        }
    }

    #[test]
    fn test_breathing_scale_at_rest_is_exactly_1_2() {
        // ((cos 0 + 1) / 4 + 0.5) * 1.2
        assert_eq!(breathing_scale(0.0, 0.0), 1.2);
    }

    #[test]
    fn test_breathing_scale_bounds() {
        let mut t = 0.0f32;
        while t < 200_000.0 {
            let s = breathing_scale(t, 123.0);
            assert!((0.6..=1.2).contains(&s), "scale({}) = {}", t, s);
            t += 977.0;
        }
    }

    #[test]
    fn test_center_angle_term_vanishes() {
        // degenerate polar conversion at the exact center resolves to 0
        assert_eq!(0.0f32.atan2(0.0), 0.0);
    }

    #[test]
    fn test_mode_one_is_fixed_rescale_of_grey() {
        // sampled 0.4 grey: ((0.4 + 0.2)^2) = 0.36; mode 1 lifts it to
        // 0.432, and with equal peaks the noise term cancels in the diff
        let tex = grey_texture(0.4);
        let mut params = EffectUniforms {
            background_color: [0.0; 3],
            color1: [1.0, 1.0, 1.0],
            color2: [1.0, 1.0, 1.0],
            ..EffectUniforms::default()
        };
        let at = Vec2::new(0.2, -0.1);

        params.set_tone_mode(ToneMode::PeakDriven);
        let base = shade(at, &params, &tex);
        params.set_tone_mode(ToneMode::Boosted);
        let boosted = shade(at, &params, &tex);

        assert_close(boosted.x - base.x, 0.36 * 0.2);
        assert_close(boosted.y - base.y, 0.36 * 0.2);
        assert_close(boosted.z - base.z, 0.36 * 0.2);
    }

    #[test]
    fn test_mode_zero_diverges_with_peak() {
        // mode 0 adds peak * 0.5 to grey and peak * 0.15 * noise to the
        // output, so the lift grows predictably as peak goes 0 -> 1
        let tex = grey_texture(0.4);
        let params = EffectUniforms {
            background_color: [0.0; 3],
            color1: [1.0, 1.0, 1.0],
            color2: [1.0, 1.0, 1.0],
            ..EffectUniforms::default()
        };
        let at = Vec2::new(0.1, 0.3);

        let quiet = shade(at, &params, &tex);
        for step in 1..=4 {
            let peak = step as f32 * 0.25;
            let loud = shade(at, &EffectUniforms { peak_value: peak, ..params }, &tex);
            let lift = loud.x - quiet.x;
            assert!(
                lift >= 0.5 * peak - 1e-5 && lift <= 0.65 * peak + 1e-5,
                "peak {} lifted by {}",
                peak,
                lift
            );
        }
    }

    #[test]
    fn test_noise_bounds_follow_peak() {
        // with colors zeroed the output is the noise term alone
        let tex = grey_texture(0.0);
        let quiet = silent_params();
        let loud = EffectUniforms { peak_value: 1.0, ..silent_params() };

        for ix in -4..=4 {
            for iy in -4..=4 {
                for rt in [0.0, 333.0, 15000.0] {
                    let at = Vec2::new(ix as f32 * 0.11, iy as f32 * 0.09);
                    let q = shade(at, &EffectUniforms { real_time: rt, ..quiet }, &tex);
                    assert!(
                        (0.0..=0.1).contains(&q.x),
                        "quiet noise {} at {:?}",
                        q.x,
                        at
                    );
                    let l = shade(at, &EffectUniforms { real_time: rt, ..loud }, &tex);
                    assert!(
                        (0.0..=0.25).contains(&l.x),
                        "loud noise {} at {:?}",
                        l.x,
                        at
                    );
                }
            }
        }
    }

    #[test]
    fn test_noise_is_achromatic() {
        let out = shade(Vec2::new(0.21, -0.17), &silent_params(), &grey_texture(0.0));
        assert_eq!(out.x, out.y);
        assert_eq!(out.y, out.z);
    }

    #[test]
    fn test_output_is_not_clamped() {
        let params = EffectUniforms {
            background_color: [2.5, 2.5, -1.0],
            ..silent_params()
        };
        let out = shade(Vec2::ZERO, &params, &grey_texture(0.0));
        assert!(out.x > 1.0);
        assert!(out.z < 0.0);
    }

    #[test]
    fn test_alpha_is_opaque() {
        let out = shade(Vec2::new(0.3, 0.3), &EffectUniforms::default(), &grey_texture(0.5));
        assert_eq!(out.w, 1.0);
    }

    #[test]
    fn test_hue_tint_at_center_is_red_scaled() {
        // at the center the hue is spike(0) = 1, wrapped to 0: pure red
        let params = EffectUniforms {
            color_strength: 0.7,
            ..EffectUniforms::default()
        };
        let tint = hue_tint(Vec2::ZERO, &params);
        assert_close(tint.x, 0.7);
        assert_close(tint.y, 0.0);
        assert_close(tint.z, 0.0);
    }

    #[test]
    fn test_render_frame_matches_pointwise_shade() {
        let tex = grey_texture(0.3);
        let params = EffectUniforms::default();
        let frame = render_frame(&params, &tex, 8, 4);
        assert_eq!(frame.dimensions(), (8, 4));

        // spot-check one pixel against a direct evaluation
        let (x, y) = (5u32, 1u32);
        let u = (x as f32 + 0.5) / 8.0 - 0.5;
        let v = 0.5 - (y as f32 + 0.5) / 4.0;
        let expected = to_rgba8(shade(Vec2::new(u, v), &params, &tex));
        assert_eq!(*frame.get_pixel(x, y), expected);
    }

    #[test]
    fn test_render_frame_clamps_out_of_range_channels() {
        let params = EffectUniforms {
            background_color: [3.0, 3.0, 3.0],
            ..silent_params()
        };
        let frame = render_frame(&params, &grey_texture(0.0), 2, 2);
        assert_eq!(frame.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
