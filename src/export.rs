//! JSON interchange for effect descriptors.
//!
//! Supports plain and base64-encoded source fields so descriptors survive
//! transport through systems that mangle embedded newlines or quotes.

use crate::effect::{EffectDescriptor, KALEIDOSCOPE_VERTEX};
use crate::errors::EffectError;
use serde::{Deserialize, Serialize};

/// Serialized form of an effect descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectJson {
    #[serde(default = "default_version")]
    pub version: String,

    /// RFC 3339 export timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,

    /// Encoding of the source fields: "plain" or "base64".
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Vertex stage body; the standard passthrough is assumed when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex: Option<String>,

    /// Fragment stage body, always required.
    pub fragment: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_encoding() -> String {
    "plain".to_string()
}

impl EffectJson {
    /// Snapshot a descriptor with a fresh export timestamp, plain encoding.
    pub fn from_descriptor(descriptor: &EffectDescriptor) -> Self {
        Self {
            version: default_version(),
            exported_at: Some(chrono::Utc::now().to_rfc3339()),
            encoding: default_encoding(),
            vertex: Some(descriptor.vertex_source().to_string()),
            fragment: descriptor.fragment_source().to_string(),
        }
    }

    /// Parse from a JSON string, decoding base64 source fields if needed.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let mut effect: Self = serde_json::from_str(json_str)?;

        if effect.encoding == "base64" {
            effect.fragment = decode_base64(&effect.fragment).unwrap_or(effect.fragment);
            if let Some(ref vertex) = effect.vertex {
                effect.vertex = Some(decode_base64(vertex).unwrap_or_else(|| vertex.clone()));
            }
            effect.encoding = default_encoding();
        }

        Ok(effect)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Encode source text to base64 for safe JSON storage.
    pub fn encode_to_base64(code: &str) -> String {
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, code.as_bytes())
    }

    /// Rebuild the validated descriptor this document describes.
    ///
    /// A missing vertex field falls back to the standard fullscreen
    /// passthrough; the composed program is validated before it is handed
    /// back.
    pub fn into_descriptor(self) -> Result<EffectDescriptor, EffectError> {
        let vertex = self.vertex.as_deref().unwrap_or(KALEIDOSCOPE_VERTEX);
        EffectDescriptor::from_sources(vertex, &self.fragment)
    }
}

/// Decode a base64 string to UTF-8 text.
fn decode_base64(encoded: &str) -> Option<String> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}
