//! Presets and parameter validation for the vesper reverb.
//!
//! # Features
//!
//! - **Presets**: [`ReverbPreset`] loads and saves TOML files holding any
//!   subset of the twelve reverb parameters
//! - **Validation**: range checks against the documented parameter ranges,
//!   aggregating every failure
//! - **Factory presets**: built-in voicings available without files
//! - **Paths**: the platform-specific user presets directory
//!
//! # Example
//!
//! ```rust,no_run
//! use vesper_config::{ReverbPreset, get_factory_preset, user_presets_dir};
//! use vesper_reverb::{ReverbNetwork, ReverbParam};
//!
//! let hall = get_factory_preset("hall").unwrap();
//! let reverb = ReverbNetwork::with_settings(48_000.0, hall.to_settings(48_000.0)?);
//! assert_eq!(reverb.settings().size, 2.0);
//!
//! let mine = ReverbPreset::new("Long Plate")
//!     .with_description("Plate with a longer tail")
//!     .with_param(ReverbParam::Decay(0.9));
//! mine.save(user_presets_dir().join("long_plate.toml"))?;
//! # Ok::<(), vesper_config::ConfigError>(())
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets.
#[cfg(feature = "std")]
pub mod paths;

/// Parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    factory_preset_names, factory_presets, get_factory_preset, is_factory_preset,
};
#[cfg(feature = "std")]
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_config_dir, user_presets_dir,
};
pub use preset::ReverbPreset;
pub use validation::{
    ValidationError, ValidationResult, parse_kind, parse_param, validate_settings, validate_value,
};
