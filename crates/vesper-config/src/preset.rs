//! Reverb preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use vesper_reverb::{ParamKind, ReverbParam, ReverbSettings};

use crate::error::ConfigError;
use crate::validation::{ValidationError, parse_kind, validate_value};

/// A named set of reverb parameter values.
///
/// Only the parameters a preset cares about need to be listed; anything
/// missing keeps its stock value when the preset is turned into
/// [`ReverbSettings`].
///
/// # TOML Format
///
/// ```toml
/// name = "Hall"
/// description = "Large, darker hall"
///
/// [params]
/// size = 2.0
/// decay = 0.85
/// damping = 0.3
/// predelay = 0.025
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReverbPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by parameter id.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl ReverbPreset {
    /// Create a preset with no parameter overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset listing every value of `settings`.
    pub fn from_settings(name: impl Into<String>, settings: &ReverbSettings) -> Self {
        let mut preset = Self::new(name);
        for param in settings.params() {
            preset = preset.with_param(param);
        }
        preset
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set one parameter value, replacing any spelling of the same key.
    pub fn with_param(mut self, param: ReverbParam) -> Self {
        let kind = param.kind();
        self.params
            .retain(|key, _| !parse_kind(key).is_ok_and(|k| k == kind));
        self.params
            .insert(param.kind().as_str().to_string(), param.value());
        self
    }

    /// Look up a parameter value listed in the preset.
    pub fn get(&self, kind: ParamKind) -> Option<f32> {
        self.params
            .iter()
            .find(|(key, _)| parse_kind(key).is_ok_and(|k| k == kind))
            .map(|(_, &value)| value)
    }

    /// Checks every listed key and value, reporting all failures at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let errors = self
            .params
            .iter()
            .filter_map(|(key, &value)| {
                parse_kind(key)
                    .and_then(|kind| validate_value(kind, value))
                    .err()
            })
            .collect();
        ValidationError::collect(errors)
    }

    /// Resolves the preset into settings for a network running at `sample_rate`.
    ///
    /// Unlisted parameters take their stock values. A bandwidth above
    /// `sample_rate` is limited to it.
    pub fn to_settings(&self, sample_rate: f32) -> Result<ReverbSettings, ConfigError> {
        self.validate()?;

        let mut settings = ReverbSettings::for_sample_rate(sample_rate);
        for (key, &value) in &self.params {
            settings.set(parse_kind(key)?, value);
        }
        settings.bandwidth = settings.bandwidth.min(sample_rate);
        Ok(settings)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ReverbPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
