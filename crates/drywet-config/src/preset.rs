//! Preset file format and operations.

use drywet_core::{BusLayout, DEFAULT_RAMP_SECONDS, MixerSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// A saved mixer configuration.
///
/// Presets are stored as TOML files. They can be loaded from files, created
/// programmatically, and saved to disk.
///
/// # TOML Format
///
/// ```toml
/// name = "Parallel Blend"
/// description = "Wet tucked 6 dB under the dry signal"
///
/// [mix]
/// dry_gain_db = 0.0
/// wet_gain_db = -6.0
/// ramp_ms = 1.0
///
/// [layout]
/// input_channels = 2
/// output_channels = 2
/// ```
///
/// A missing `[mix]` falls back to unity gains and a 1 ms ramp. Without a
/// `[layout]` the preset fits any supported channel count; with one, it is
/// only used with that bus layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Gain and ramp settings.
    #[serde(default)]
    pub mix: MixSection,

    /// Bus layout the preset is pinned to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSection>,
}

/// `[mix]` section of a preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MixSection {
    /// Dry path gain in dB.
    #[serde(default)]
    pub dry_gain_db: f32,
    /// Wet path gain in dB.
    #[serde(default)]
    pub wet_gain_db: f32,
    /// Gain ramp in milliseconds.
    #[serde(default = "default_ramp_ms")]
    pub ramp_ms: f32,
}

fn default_ramp_ms() -> f32 {
    (DEFAULT_RAMP_SECONDS * 1000.0) as f32
}

impl Default for MixSection {
    fn default() -> Self {
        Self {
            dry_gain_db: 0.0,
            wet_gain_db: 0.0,
            ramp_ms: default_ramp_ms(),
        }
    }
}

/// `[layout]` section of a preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutSection {
    /// Channels delivered by the host.
    pub input_channels: usize,
    /// Channels the host expects back.
    pub output_channels: usize,
}

impl From<BusLayout> for LayoutSection {
    fn from(layout: BusLayout) -> Self {
        Self {
            input_channels: layout.input_channels,
            output_channels: layout.output_channels,
        }
    }
}

impl Preset {
    /// Create a preset at unity gain with the default ramp and no pinned
    /// layout.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            mix: MixSection::default(),
            layout: None,
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set both gains in dB.
    pub fn with_gains(mut self, dry_gain_db: f32, wet_gain_db: f32) -> Self {
        self.mix.dry_gain_db = dry_gain_db;
        self.mix.wet_gain_db = wet_gain_db;
        self
    }

    /// Set the ramp in milliseconds.
    pub fn with_ramp_ms(mut self, ramp_ms: f32) -> Self {
        self.mix.ramp_ms = ramp_ms;
        self
    }

    /// Pin the preset to a bus layout.
    pub fn with_layout(mut self, layout: BusLayout) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Capture an engine configuration as a preset.
    pub fn from_settings(name: impl Into<String>, settings: &MixerSettings) -> Self {
        Self::new(name)
            .with_gains(settings.dry_gain_db, settings.wet_gain_db)
            .with_ramp_ms((settings.ramp_seconds * 1000.0) as f32)
    }

    /// Engine settings described by this preset.
    ///
    /// Values are clamped to the mixer's parameter ranges; a gain at the
    /// bottom of its range means silence.
    pub fn settings(&self) -> MixerSettings {
        MixerSettings::from_param_values([
            self.mix.dry_gain_db,
            self.mix.wet_gain_db,
            self.mix.ramp_ms,
        ])
    }

    /// Bus layout the preset is pinned to.
    pub fn bus_layout(&self) -> Option<BusLayout> {
        self.layout.map(|l| BusLayout::new(l.input_channels, l.output_channels))
    }

    /// Bus layout to use for `channels` input channels: the pinned layout,
    /// or one with matching input and output counts.
    pub fn bus_layout_for(&self, channels: usize) -> BusLayout {
        self.bus_layout().unwrap_or_else(|| BusLayout::matched(channels))
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
