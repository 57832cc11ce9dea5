//! Factory presets bundled with the vesper library.
//!
//! These are embedded at compile time and always available without
//! external files.

use crate::ReverbPreset;

/// TOML content for factory presets, keyed by identifier.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("plate", PLATE_PRESET),
    ("hall", HALL_PRESET),
    ("room", ROOM_PRESET),
    ("cathedral", CATHEDRAL_PRESET),
    ("shimmer_wash", SHIMMER_WASH_PRESET),
    ("dry_check", DRY_CHECK_PRESET),
];

/// Stock voicing, every parameter at its default.
const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Stock plate voicing"
"#;

/// The classic render: double size, wet nearly at unity.
const PLATE_PRESET: &str = r#"
name = "Plate"
description = "Bright, dense plate with a forward wet signal"

[params]
size = 2.0
wet = -1.0
decay = 0.75
damping = 0.1
predelay = 0.005
"#;

const HALL_PRESET: &str = r#"
name = "Hall"
description = "Large, darker hall with a short gap before the tail"

[params]
size = 2.0
decay = 0.85
damping = 0.3
bandwidth = 12000.0
predelay = 0.025
modulation = 1.5
wet = -8.0
"#;

const ROOM_PRESET: &str = r#"
name = "Room"
description = "Small, quickly decaying room"

[params]
size = 0.5
decay = 0.5
damping = 0.4
predelay = 0.002
wet = -10.0
"#;

const CATHEDRAL_PRESET: &str = r#"
name = "Cathedral"
description = "Very long, dark and slowly moving tail"

[params]
size = 3.5
decay = 0.93
damping = 0.2
bandwidth = 9000.0
predelay = 0.06
modulation = 2.0
wet = -4.0
"#;

const SHIMMER_WASH_PRESET: &str = r#"
name = "Shimmer Wash"
description = "Near-infinite bright wash with deep modulation"

[params]
size = 2.5
decay = 0.95
damping = 0.02
diffusion1 = 0.75
diffusion2 = 0.65
modulation = 3.0
wet = -3.0
dry = -6.0
"#;

/// Reverb pulled to the noise floor; output should match the input.
const DRY_CHECK_PRESET: &str = r#"
name = "Dry Check"
description = "Wet at -120 dB for level and latency checks"

[params]
wet = -120.0
dry = 0.0
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<ReverbPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| ReverbPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use vesper_config::get_factory_preset;
///
/// let hall = get_factory_preset("hall").expect("hall is bundled");
/// assert_eq!(hall.name, "Hall");
/// assert!(get_factory_preset("Shimmer Wash").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<ReverbPreset> {
    let name = name.trim();
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Some((*id, ReverbPreset::from_toml(toml).ok()?)))
        .find(|(id, preset)| id.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name))
        .map(|(_, preset)| preset)
}

/// Get the identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
