use std::fmt;

/// Errors produced while checking an effect source against its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// The source breaks the descriptor contract (missing params struct,
    /// missing entry point, empty source).
    Validation(String),

    /// The source is not valid WGSL (naga parse or module validation failed).
    Parse(String),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::Validation(msg) => write!(f, "validation error: {}", msg),
            EffectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for EffectError {}

/// Render an error with a heading suitable for host UIs and logs.
pub fn format_effect_error(err: &EffectError) -> String {
    match err {
        EffectError::Validation(msg) => format!("Effect validation failed:\n{}", msg),
        EffectError::Parse(msg) => format!("Effect source did not parse:\n{}", msg),
    }
}
