//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use vesper_config::{ReverbPreset, find_preset, get_factory_preset, parse_param};
use vesper_core::linear_to_db;
use vesper_reverb::ReverbSettings;

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.trim().to_string(), value.trim().to_string())),
        None => Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        )),
    }
}

/// Load a preset by name or path.
///
/// Factory presets are tried first, then the user presets directory, then
/// `name` as a file path.
pub fn load_preset(name: &str) -> anyhow::Result<ReverbPreset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        return ReverbPreset::load(&path)
            .with_context(|| format!("loading preset {}", path.display()));
    }

    anyhow::bail!(
        "Preset '{}' not found. Use 'vesper presets list' to see available presets.",
        name
    )
}

/// Resolves the optional preset plus `--param` overrides into settings.
pub fn resolve_settings(
    preset: Option<&str>,
    overrides: &[(String, String)],
    sample_rate: f32,
) -> anyhow::Result<ReverbSettings> {
    let mut settings = match preset {
        Some(name) => {
            let preset = load_preset(name)?;
            println!("Preset: {}", preset.name);
            preset.to_settings(sample_rate)?
        }
        None => ReverbSettings::for_sample_rate(sample_rate),
    };

    for (key, value) in overrides {
        let param = parse_param(key, value)?;
        settings.apply(param);
    }

    tracing::debug!(?settings, "resolved reverb settings");
    Ok(settings)
}

/// Progress bar in the shared CLI style.
pub fn progress_bar(len: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// One-line level summary in dBFS.
pub fn level_summary(samples: &[f32]) -> String {
    format!(
        "RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(samples)),
        linear_to_db(peak(samples))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_reverb::ReverbParam;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("size=2"),
            Ok(("size".to_string(), "2".to_string()))
        );
        assert_eq!(
            parse_key_val("wet = -1.5"),
            Ok(("wet".to_string(), "-1.5".to_string()))
        );
        assert!(parse_key_val("decay").is_err());
    }

    #[test]
    fn test_resolve_settings_applies_overrides_after_preset() {
        let overrides = vec![("decay".to_string(), "0.6".to_string())];
        let settings = resolve_settings(Some("plate"), &overrides, 44_100.0).unwrap();
        assert_eq!(settings.size, 2.0);
        assert_eq!(settings.decay, 0.6);

        let mut expected = ReverbSettings::for_sample_rate(44_100.0);
        expected.apply(ReverbParam::Decay(0.6));
        assert_eq!(resolve_settings(None, &overrides, 44_100.0).unwrap(), expected);
    }

    #[test]
    fn test_resolve_settings_rejects_bad_override() {
        let overrides = vec![("size".to_string(), "9".to_string())];
        assert!(resolve_settings(None, &overrides, 44_100.0).is_err());
        assert!(resolve_settings(Some("no_such_preset_anywhere"), &[], 44_100.0).is_err());
    }

    #[test]
    fn test_levels() {
        assert_eq!(peak(&[0.1, -0.5, 0.25]), 0.5);
        assert!((rms(&[1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(rms(&[]), 0.0);
    }
}
