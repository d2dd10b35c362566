//! Effect source validation.
//!
//! Catches contract breaks and WGSL errors before a source ever reaches the
//! host pipeline, so hosts get a usable diagnostic instead of a driver
//! error at module-creation time.

use crate::errors::EffectError;
use crate::uniforms::UNIFORM_SCHEMA;

/// Validate a composed effect program.
///
/// Checks, in order:
/// 1. the source is not empty;
/// 2. the params struct declares the full uniform contract;
/// 3. both entry points and the stage interface exist;
/// 4. the source parses and validates as WGSL via naga.
pub fn validate_effect(wgsl_src: &str) -> Result<(), EffectError> {
    if wgsl_src.trim().is_empty() {
        return Err(EffectError::Validation("effect source is empty".to_string()));
    }

    validate_params_struct(wgsl_src)?;
    validate_entry_points(wgsl_src)?;
    validate_wgsl_syntax(wgsl_src)?;

    Ok(())
}

/// Check the params struct against the uniform contract.
fn validate_params_struct(wgsl_src: &str) -> Result<(), EffectError> {
    if !wgsl_src.contains("struct EffectParams") {
        return Err(EffectError::Validation(
            "source must declare 'struct EffectParams' carrying the uniform contract"
                .to_string(),
        ));
    }

    // scan the struct body for every field the contract names
    if let Some(start) = wgsl_src.find("struct EffectParams") {
        if let Some(open) = wgsl_src[start..].find('{') {
            let body_start = start + open;
            if let Some(close) = wgsl_src[body_start..].find('}') {
                let body = &wgsl_src[body_start + 1..body_start + close];
                for info in UNIFORM_SCHEMA {
                    if let Some(field) = info.wgsl_field {
                        if !body.contains(field) {
                            return Err(EffectError::Validation(format!(
                                "EffectParams is missing the field '{}' (uniform '{}': {})",
                                field, info.name, info.role
                            )));
                        }
                    }
                }
            }
        }
    }

    if !wgsl_src.contains("@group(0) @binding(0)")
        || !wgsl_src.contains("var<uniform> params: EffectParams")
    {
        return Err(EffectError::Validation(
            "missing uniform binding declaration: \
             @group(0) @binding(0) var<uniform> params: EffectParams;"
                .to_string(),
        ));
    }

    if !wgsl_src.contains("source_texture") || !wgsl_src.contains("source_sampler") {
        return Err(EffectError::Validation(
            "missing texture bindings 'source_texture' / 'source_sampler'".to_string(),
        ));
    }

    Ok(())
}

/// Check both stages and the interface struct are present.
fn validate_entry_points(wgsl_src: &str) -> Result<(), EffectError> {
    if !wgsl_src.contains("@vertex") {
        return Err(EffectError::Validation(
            "source missing @vertex attribute".to_string(),
        ));
    }

    if !wgsl_src.contains("@fragment") {
        return Err(EffectError::Validation(
            "source missing @fragment attribute".to_string(),
        ));
    }

    if !wgsl_src.contains("fn vs_main") {
        return Err(EffectError::Validation(
            "source missing vertex entry point 'fn vs_main'".to_string(),
        ));
    }

    if !wgsl_src.contains("fn fs_main") {
        return Err(EffectError::Validation(
            "source missing fragment entry point 'fn fs_main'".to_string(),
        ));
    }

    if !wgsl_src.contains("struct VSOut") {
        return Err(EffectError::Validation(
            "source missing stage interface 'struct VSOut'".to_string(),
        ));
    }

    Ok(())
}

/// Parse and validate the WGSL with naga.
fn validate_wgsl_syntax(wgsl_src: &str) -> Result<(), EffectError> {
    log::debug!("validating effect source with naga ({} bytes)", wgsl_src.len());

    let module = match naga::front::wgsl::parse_str(wgsl_src) {
        Ok(module) => module,
        Err(parse_error) => {
            let msg = parse_error.emit_to_string(wgsl_src);
            log::error!("effect source failed to parse: {}", msg);
            return Err(EffectError::Parse(msg));
        }
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );

    if let Err(validation_error) = validator.validate(&module) {
        let msg = validation_error.emit_to_string(wgsl_src);
        log::error!("effect module failed validation: {}", msg);
        return Err(EffectError::Parse(msg));
    }

    log::debug!("naga validation passed");
    Ok(())
}
