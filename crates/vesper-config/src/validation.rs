//! Parameter validation against the documented reverb ranges.
//!
//! The network itself accepts any value; this is where user input from
//! preset files and `key=value` overrides gets rejected before it reaches
//! the DSP.
//!
//! # Example
//!
//! ```rust
//! use vesper_config::{ValidationError, parse_param, validate_settings};
//! use vesper_reverb::{ReverbParam, ReverbSettings};
//!
//! assert_eq!(parse_param("decay", "0.8"), Ok(ReverbParam::Decay(0.8)));
//! assert!(matches!(parse_param("decay", "1.5"), Err(ValidationError::OutOfRange { .. })));
//!
//! validate_settings(&ReverbSettings::default()).expect("stock settings are valid");
//! ```

use thiserror::Error;
use vesper_reverb::{ParamKind, ReverbParam, ReverbSettings};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown reverb parameter '{0}'")]
    UnknownParameter(String),

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

    /// Value is not a number.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

impl ValidationError {
    /// Folds a list of failures into a single error, or `Ok` when empty.
    pub fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

/// Resolves a parameter id (`decay`, `input-diffusion1`, ...).
pub fn parse_kind(name: &str) -> ValidationResult<ParamKind> {
    name.parse()
        .map_err(|_| ValidationError::UnknownParameter(name.trim().to_string()))
}

/// Checks one value against the parameter's documented range.
///
/// Non-finite values are always out of range.
pub fn validate_value(kind: ParamKind, value: f32) -> ValidationResult<()> {
    let desc = kind.descriptor();
    if desc.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: kind.as_str().to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Checks every field of `settings`, reporting all failures at once.
pub fn validate_settings(settings: &ReverbSettings) -> ValidationResult<()> {
    let errors = ParamKind::ALL
        .into_iter()
        .filter_map(|kind| validate_value(kind, settings.get(kind)).err())
        .collect();
    ValidationError::collect(errors)
}

/// Parses a `key=value` override into a validated [`ReverbParam`].
pub fn parse_param(name: &str, value: &str) -> ValidationResult<ReverbParam> {
    let kind = parse_kind(name)?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|e| ValidationError::InvalidFormat {
            param: kind.as_str().to_string(),
            reason: format!("'{}': {e}", value.trim()),
        })?;
    validate_value(kind, value)?;
    Ok(ReverbParam::new(kind, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_settings_validate() {
        assert_eq!(validate_settings(&ReverbSettings::default()), Ok(()));
        assert_eq!(
            validate_settings(&ReverbSettings::for_sample_rate(192_000.0)),
            Ok(())
        );
    }

    #[test]
    fn test_single_failure_is_not_wrapped() {
        let settings = ReverbSettings {
            decay: 1.2,
            ..ReverbSettings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                param: "decay".to_string(),
                value: 1.2,
                min: 0.0,
                max: 1.0,
            }
        );
    }

    #[test]
    fn test_failures_aggregate() {
        let settings = ReverbSettings {
            size: 0.0,
            wet: 20.0,
            predelay: f32::NAN,
            ..ReverbSettings::default()
        };
        match validate_settings(&settings) {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 3);
                let msg = ValidationError::Multiple(errors).to_string();
                assert!(msg.contains("'size'") && msg.contains("'wet'"), "{msg}");
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn test_documented_ranges() {
        assert!(validate_value(ParamKind::Predelay, 1.0).is_ok());
        assert!(validate_value(ParamKind::Predelay, 1.01).is_err());
        assert!(validate_value(ParamKind::Bandwidth, 96_000.0).is_ok());
        assert!(validate_value(ParamKind::Bandwidth, 0.5).is_err());
        assert!(validate_value(ParamKind::Modulation, 4.0).is_ok());
        assert!(validate_value(ParamKind::Size, 0.1).is_ok());
        assert!(validate_value(ParamKind::Size, 4.1).is_err());
        assert!(validate_value(ParamKind::Dry, -120.0).is_ok());
        assert!(validate_value(ParamKind::Dry, 12.5).is_err());
        assert!(validate_value(ParamKind::Damping, -0.01).is_err());
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("Input-Diffusion2", " 0.5 "),
            Ok(ReverbParam::InputDiffusion2(0.5))
        );
        assert_eq!(
            parse_param("room_size", "1"),
            Err(ValidationError::UnknownParameter("room_size".to_string()))
        );
        assert!(matches!(
            parse_param("wet", "loud"),
            Err(ValidationError::InvalidFormat { ref param, .. }) if param == "wet"
        ));
        assert!(matches!(
            parse_param("size", "8"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
