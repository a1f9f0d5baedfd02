//! Preset files and validation for the drywet mixer.
//!
//! # Features
//!
//! - **Presets**: Load and save gain/ramp/layout settings as TOML
//! - **Validation**: Check presets against the mixer's parameter ranges
//! - **Factory Presets**: Built-in starting points
//! - **Paths**: Platform-specific preset directories (`std` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use drywet_config::{Preset, validate_preset};
//! use drywet_core::MixEngine;
//!
//! let preset = Preset::load("vocal_blend.toml").unwrap();
//! validate_preset(&preset).unwrap();
//!
//! let mut engine = MixEngine::new();
//! engine.restore(&preset.settings()).unwrap();
//! engine.prepare_to_play(48000.0, 512, 2).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
#[cfg(feature = "std")]
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
#[cfg(feature = "std")]
pub use paths::{
    ensure_user_config_dir, ensure_user_presets_dir, find_preset, list_all_presets,
    list_system_presets, list_user_presets, preset_name_from_path, system_presets_dir,
    user_config_dir, user_presets_dir,
};
pub use preset::{LayoutSection, MixSection, Preset};
pub use validation::{ValidationError, ValidationResult, validate_param, validate_preset};
