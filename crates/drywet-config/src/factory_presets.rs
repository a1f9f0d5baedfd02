//! Factory presets bundled with the drywet library.
//!
//! These are always available without external files and cover the usual
//! starting points for a parallel blend.

use crate::Preset;

/// Names of all factory presets.
pub static FACTORY_PRESET_NAMES: &[&str] = &["unity", "dry_only", "wet_only", "parallel_blend"];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("unity", UNITY_PRESET),
    ("dry_only", DRY_ONLY_PRESET),
    ("wet_only", WET_ONLY_PRESET),
    ("parallel_blend", PARALLEL_BLEND_PRESET),
];

/// Both paths at unity gain.
const UNITY_PRESET: &str = r#"
name = "Unity"
description = "Dry and wet both at 0 dB"

[mix]
dry_gain_db = 0.0
wet_gain_db = 0.0
ramp_ms = 1.0
"#;

/// Wet path silenced.
const DRY_ONLY_PRESET: &str = r#"
name = "Dry Only"
description = "Unprocessed signal only"

[mix]
dry_gain_db = 0.0
wet_gain_db = -60.0
ramp_ms = 1.0
"#;

/// Dry path silenced.
const WET_ONLY_PRESET: &str = r#"
name = "Wet Only"
description = "Processed signal only"

[mix]
dry_gain_db = -60.0
wet_gain_db = 0.0
ramp_ms = 1.0
"#;

const PARALLEL_BLEND_PRESET: &str = r#"
name = "Parallel Blend"
description = "Wet tucked 6 dB under the dry signal with a slow ramp"

[mix]
dry_gain_db = 0.0
wet_gain_db = -6.0
ramp_ms = 20.0
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use drywet_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by key or display name, case-insensitively.
///
/// ```rust
/// use drywet_config::get_factory_preset;
///
/// let preset = get_factory_preset("Dry Only").unwrap();
/// assert_eq!(preset.mix.wet_gain_db, -60.0);
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(key, _)| key.to_lowercase() == name_lower)
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Keys of all factory presets.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;

    #[test]
    fn test_all_factory_presets_parse() {
        for (key, toml) in FACTORY_PRESETS_TOML {
            let result = Preset::from_toml(toml);
            assert!(result.is_ok(), "factory preset '{key}' failed to parse: {:?}", result.err());
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_all_factory_presets_validate() {
        for preset in factory_presets() {
            assert_eq!(validate_preset(&preset), Ok(()), "{}", preset.name);
        }
    }

    #[test]
    fn test_get_factory_preset() {
        assert_eq!(get_factory_preset("unity").unwrap().name, "Unity");
        assert_eq!(get_factory_preset("WET_ONLY").unwrap().name, "Wet Only");
        assert_eq!(get_factory_preset("parallel blend").unwrap().mix.ramp_ms, 20.0);
        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn test_is_factory_preset() {
        assert!(is_factory_preset("dry_only"));
        assert!(is_factory_preset("Dry Only"));
        assert!(!is_factory_preset("my_custom"));
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES);
    }

    #[test]
    fn test_names_match_table() {
        let keys: Vec<&str> = FACTORY_PRESETS_TOML.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, FACTORY_PRESET_NAMES);
    }
}
