//! Preset validation.
//!
//! Checks a [`Preset`] against the mixer's parameter ranges and the bus
//! layouts the engine accepts. All problems are reported, not just the first.
//!
//! # Example
//!
//! ```rust
//! use drywet_config::{Preset, validate_preset};
//!
//! let preset = Preset::new("Loud").with_gains(0.0, 30.0);
//! let err = validate_preset(&preset).unwrap_err();
//! assert!(err.to_string().contains("wet_gain_db"));
//! ```

use crate::Preset;
use drywet_core::{MIXER_PARAMS, ParamDescriptor, SupportedLayouts};
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Parameter value is NaN or infinite.
    #[error("parameter '{param}' is not a finite number")]
    NonFinite {
        /// Name of the parameter.
        param: String,
    },

    /// The engine does not accept this channel configuration.
    #[error("unsupported bus layout {input} in / {output} out")]
    UnsupportedLayout {
        /// Input channels.
        input: usize,
        /// Output channels.
        output: usize,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check one plain parameter value against its descriptor.
pub fn validate_param(desc: &ParamDescriptor, value: f32) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: desc.string_id.to_string(),
        });
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(())
}

/// Validate every field of a preset.
///
/// Gain and ramp ranges match the mixer parameters. A pinned layout must be
/// one the default engine accepts.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let values = [
        (&MIXER_PARAMS[0], preset.mix.dry_gain_db, "dry_gain_db"),
        (&MIXER_PARAMS[1], preset.mix.wet_gain_db, "wet_gain_db"),
        (&MIXER_PARAMS[2], preset.mix.ramp_ms, "ramp_ms"),
    ];

    let mut errors: Vec<ValidationError> = values
        .into_iter()
        .filter_map(|(desc, value, key)| {
            validate_param(desc, value).err().map(|e| rename_param(e, key))
        })
        .collect();

    if let Some(layout) = preset.bus_layout()
        && !SupportedLayouts::default().supports(&layout)
    {
        errors.push(ValidationError::UnsupportedLayout {
            input: layout.input_channels,
            output: layout.output_channels,
        });
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Report errors under the preset file's key rather than the parameter id.
fn rename_param(err: ValidationError, key: &str) -> ValidationError {
    match err {
        ValidationError::OutOfRange {
            value, min, max, ..
        } => ValidationError::OutOfRange {
            param: key.to_string(),
            value,
            min,
            max,
        },
        ValidationError::NonFinite { .. } => ValidationError::NonFinite {
            param: key.to_string(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drywet_core::BusLayout;

    #[test]
    fn default_preset_is_valid() {
        assert_eq!(validate_preset(&Preset::default()), Ok(()));
    }

    #[test]
    fn range_edges_are_valid() {
        let preset = Preset::new("Edges").with_gains(-60.0, 12.0).with_ramp_ms(100.0);
        assert_eq!(validate_preset(&preset), Ok(()));
        let preset = Preset::new("Edges").with_ramp_ms(0.0);
        assert_eq!(validate_preset(&preset), Ok(()));
    }

    #[test]
    fn pinned_layouts_are_checked() {
        let mono = Preset::new("Mono").with_layout(BusLayout::MONO);
        assert_eq!(validate_preset(&mono), Ok(()));

        let wide = Preset::new("Wide").with_layout(BusLayout::new(1, 2));
        assert_eq!(
            validate_preset(&wide),
            Err(ValidationError::UnsupportedLayout {
                input: 1,
                output: 2
            })
        );
    }

    #[test]
    fn single_error_is_reported_directly() {
        let preset = Preset::new("Slow").with_ramp_ms(500.0);
        assert_eq!(
            validate_preset(&preset),
            Err(ValidationError::OutOfRange {
                param: "ramp_ms".to_string(),
                value: 500.0,
                min: 0.0,
                max: 100.0,
            })
        );
    }

    #[test]
    fn all_errors_are_collected() {
        let preset = Preset::new("Broken")
            .with_gains(f32::NAN, -90.0)
            .with_layout(BusLayout::new(2, 6));
        let Err(ValidationError::Multiple(errors)) = validate_preset(&preset) else {
            panic!("expected multiple errors");
        };
        assert_eq!(errors.len(), 3);
        assert!(matches!(&errors[0], ValidationError::NonFinite { param } if param == "dry_gain_db"));
        assert!(matches!(&errors[1], ValidationError::OutOfRange { param, .. } if param == "wet_gain_db"));
        assert_eq!(
            errors[2],
            ValidationError::UnsupportedLayout {
                input: 2,
                output: 6
            }
        );
    }

    #[test]
    fn validate_param_uses_string_id() {
        let err = validate_param(&MIXER_PARAMS[1], 13.0).unwrap_err();
        assert!(err.to_string().contains("wet_gain"));
    }
}
