//! Error types for the plugin layer.

use drywet_core::MixError;
use thiserror::Error;

/// Errors reported to the host by [`DryWetProcessor`](crate::DryWetProcessor).
///
/// Whenever one of these is returned from `process`, the audio block has
/// been passed through unmodified.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The mix engine refused the configuration or the block.
    #[error("mix engine error: {0}")]
    Mix(#[from] MixError),

    /// Saved state could not be restored.
    #[error(transparent)]
    State(#[from] StateError),
}

impl PluginError {
    /// Whether this is a contract violation by the host (wrong block size,
    /// processing while unprepared, unsupported layout).
    pub fn is_configuration(&self) -> bool {
        matches!(self, PluginError::Mix(e) if e.is_configuration())
    }
}

/// Errors from loading a saved parameter state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The state block held no data.
    #[error("state block is empty")]
    Empty,

    /// The bytes were not a JSON object of numeric values.
    #[error("invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),
}
