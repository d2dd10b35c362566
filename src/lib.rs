//! Audio-reactive kaleidoscope shader effect as a host-consumable asset.
//!
//! The crate owns one immutable artifact, the [`EffectDescriptor`]: a WGSL
//! vertex/fragment source pair plus the uniform parameter contract
//! ([`UNIFORM_SCHEMA`], [`EffectUniforms`]) a host rendering pipeline binds
//! before each draw. The descriptor holds no state; rotation, hue cycling,
//! zoom and noise are all driven by the clocks and audio signals the host
//! re-supplies every frame.
//!
//! Alongside the GPU sources, the `formula`, `fold` and `reference` modules
//! carry a pure CPU implementation of the same per-pixel computation, used
//! by the property tests and by hosts that want a ground truth to diff
//! their port against. Compiling and binding the effect stays with the
//! embedding application, as does the render loop that feeds it.

pub mod effect;
pub mod errors;
pub mod export;
pub mod fold;
pub mod formula;
pub mod reference;
pub mod sampler;
pub mod uniforms;
pub mod validate;

pub use effect::{EffectDescriptor, EFFECT_HEADER, KALEIDOSCOPE_FRAGMENT, KALEIDOSCOPE_VERTEX};
pub use errors::{format_effect_error, EffectError};
pub use export::EffectJson;
pub use reference::{breathing_scale, hue_tint, render_frame, shade};
pub use sampler::{ImageTexture, SolidColor, TextureSource};
pub use uniforms::{EffectUniforms, ToneMode, UniformInfo, UniformKind, UNIFORM_SCHEMA};
pub use validate::validate_effect;
