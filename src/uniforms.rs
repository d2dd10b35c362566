//! The uniform parameter contract of the effect.
//!
//! [`EffectUniforms`] mirrors the WGSL `EffectParams` uniform block byte for
//! byte, so a host can upload it with a single buffer write. Each
//! `vec3<f32>` sits on a 16-byte boundary with a scalar filling its pad,
//! which keeps the block at exactly 64 bytes with no explicit padding
//! fields.

use bytemuck::{Pod, Zeroable};

/// Scalar and vector uniforms, laid out to match the WGSL uniform block.
///
/// `time` and `real_time` are the caller's animation clocks (millisecond
/// scale). `time` is audio-influenced; `real_time` is the wall clock, kept
/// separate so scale/noise drift stays independent of the beat. The
/// descriptor itself holds no state between evaluations; callers re-supply
/// this struct every frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EffectUniforms {
    pub background_color: [f32; 3],
    /// Audio-influenced clock driving rotation and hue cycling.
    pub time: f32,
    pub color1: [f32; 3],
    /// Wall clock driving zoom, noise reseeding and the blend phase.
    pub real_time: f32,
    pub color2: [f32; 3],
    /// Vertical aspect correction factor.
    pub resolution: f32,
    pub color_strength: f32,
    /// Per-instance offset desynchronizing the breathing zoom.
    pub seed: f32,
    pub peak_value: f32,
    /// Raw tone mode selector, see [`ToneMode`].
    pub mode: i32,
}

impl EffectUniforms {
    /// View as the exact byte image of the WGSL uniform block.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn tone_mode(&self) -> ToneMode {
        ToneMode::from_raw(self.mode)
    }

    pub fn set_tone_mode(&mut self, mode: ToneMode) {
        self.mode = mode.as_raw();
    }
}

impl Default for EffectUniforms {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0],
            time: 0.0,
            color1: [1.0, 1.0, 1.0],
            real_time: 0.0,
            color2: [0.0, 0.0, 0.0],
            resolution: 1.0,
            color_strength: 1.0,
            seed: 0.0,
            peak_value: 0.0,
            mode: ToneMode::PeakDriven.as_raw(),
        }
    }
}

/// The one discrete branch in the effect: how luminance is shaped before
/// the foreground blend is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMode {
    /// Luminance gains a `peak_value * 0.5` brightness boost.
    PeakDriven = 0,
    /// Luminance is amplified by a fixed 1.2 factor.
    Boosted = 1,
}

impl ToneMode {
    /// Decode the raw uniform value. Anything other than 1 selects
    /// [`ToneMode::PeakDriven`], matching the fragment program's else arm.
    pub fn from_raw(raw: i32) -> Self {
        if raw == 1 {
            ToneMode::Boosted
        } else {
            ToneMode::PeakDriven
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// Value category of a uniform parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Scalar,
    Color,
    Int,
    Texture,
}

/// One entry of the parameter contract: public name, binding category, the
/// WGSL field declaration it must appear as (None for texture bindings),
/// and its semantic role.
#[derive(Debug, Clone, Copy)]
pub struct UniformInfo {
    pub name: &'static str,
    pub kind: UniformKind,
    pub wgsl_field: Option<&'static str>,
    pub role: &'static str,
}

/// The full parameter interface of the effect, in binding order.
///
/// Hosts can iterate this to drive uniform binding; the validator checks
/// every `wgsl_field` entry against the params struct in the source.
pub const UNIFORM_SCHEMA: &[UniformInfo] = &[
    UniformInfo {
        name: "texture",
        kind: UniformKind::Texture,
        wgsl_field: None,
        role: "source image to remap and recolor",
    },
    UniformInfo {
        name: "time",
        kind: UniformKind::Scalar,
        wgsl_field: Some("time: f32"),
        role: "audio-influenced animation clock driving rotation and hue cycling",
    },
    UniformInfo {
        name: "realTime",
        kind: UniformKind::Scalar,
        wgsl_field: Some("real_time: f32"),
        role: "wall-clock animation time driving scale, noise and foreground blend",
    },
    UniformInfo {
        name: "iResolution",
        kind: UniformKind::Scalar,
        wgsl_field: Some("resolution: f32"),
        role: "vertical aspect correction factor",
    },
    UniformInfo {
        name: "colorStrength",
        kind: UniformKind::Scalar,
        wgsl_field: Some("color_strength: f32"),
        role: "multiplier on the hue-derived color contribution",
    },
    UniformInfo {
        name: "backgroundColor",
        kind: UniformKind::Color,
        wgsl_field: Some("background_color: vec3<f32>"),
        role: "base color added under the foreground blend",
    },
    UniformInfo {
        name: "seed",
        kind: UniformKind::Scalar,
        wgsl_field: Some("seed: f32"),
        role: "per-instance randomization offset for the zoom scale",
    },
    UniformInfo {
        name: "color1",
        kind: UniformKind::Color,
        wgsl_field: Some("color1: vec3<f32>"),
        role: "first endpoint of the periodic foreground color blend",
    },
    UniformInfo {
        name: "color2",
        kind: UniformKind::Color,
        wgsl_field: Some("color2: vec3<f32>"),
        role: "second endpoint of the periodic foreground color blend",
    },
    UniformInfo {
        name: "peakValue",
        kind: UniformKind::Scalar,
        wgsl_field: Some("peak_value: f32"),
        role: "audio peak signal, brightens output and adds noise",
    },
    UniformInfo {
        name: "mode",
        kind: UniformKind::Int,
        wgsl_field: Some("mode: i32"),
        role: "selects between the two brightness-shaping formulas",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_block_is_64_bytes() {
        assert_eq!(std::mem::size_of::<EffectUniforms>(), 64);
        assert_eq!(EffectUniforms::default().as_bytes().len(), 64);
    }

    #[test]
    fn test_tone_mode_raw_round_trip() {
        assert_eq!(ToneMode::from_raw(0), ToneMode::PeakDriven);
        assert_eq!(ToneMode::from_raw(1), ToneMode::Boosted);
        // out-of-range raw values collapse to the else arm
        assert_eq!(ToneMode::from_raw(-1), ToneMode::PeakDriven);
        assert_eq!(ToneMode::from_raw(7), ToneMode::PeakDriven);
        assert_eq!(ToneMode::Boosted.as_raw(), 1);
    }

    #[test]
    fn test_set_tone_mode_writes_raw_field() {
        let mut u = EffectUniforms::default();
        u.set_tone_mode(ToneMode::Boosted);
        assert_eq!(u.mode, 1);
        assert_eq!(u.tone_mode(), ToneMode::Boosted);
    }

    #[test]
    fn test_schema_covers_every_parameter() {
        assert_eq!(UNIFORM_SCHEMA.len(), 11);
        let textures = UNIFORM_SCHEMA
            .iter()
            .filter(|u| u.kind == UniformKind::Texture)
            .count();
        assert_eq!(textures, 1);
        // every non-texture parameter names its WGSL field
        for info in UNIFORM_SCHEMA {
            assert_eq!(info.wgsl_field.is_none(), info.kind == UniformKind::Texture);
        }
    }
}
