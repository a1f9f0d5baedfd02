//! Parameter state save/restore.
//!
//! State format: JSON object mapping stable `ParamId` to value.
//!
//! ```json
//! {"100": 0.0, "101": -6.0, "102": 1.0}
//! ```
//!
//! Using stable IDs (not indices) ensures state survives parameter reordering
//! across versions.

use crate::error::StateError;
use crate::shared::DryWetShared;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk shape of a saved state.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StateDocument {
    values: BTreeMap<String, f64>,
}

/// Serialize every parameter value to a JSON byte block.
pub fn save_state(shared: &DryWetShared) -> Result<Vec<u8>, StateError> {
    let mut doc = StateDocument::default();
    for (i, desc) in shared.descriptors().iter().enumerate() {
        if let Some(val) = shared.get_value(i) {
            doc.values.insert(desc.id.0.to_string(), f64::from(val));
        }
    }
    Ok(serde_json::to_vec(&doc)?)
}

/// Restore parameter values from a block written by [`save_state`].
///
/// Unknown ids are skipped and values are clamped to their ranges. If the
/// block cannot be parsed nothing is applied. Returns the number of
/// parameters restored.
pub fn load_state(shared: &DryWetShared, bytes: &[u8]) -> Result<usize, StateError> {
    if bytes.is_empty() {
        tracing::warn!("ignoring empty state block");
        return Err(StateError::Empty);
    }

    let doc: StateDocument = serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!(error = %e, "invalid state block");
        StateError::from(e)
    })?;

    let mut restored = 0;
    for (key, value) in &doc.values {
        let Some(index) = key.parse::<u32>().ok().and_then(|id| shared.index_by_id(id)) else {
            tracing::debug!(key = %key, "skipping unknown parameter in state");
            continue;
        };
        shared.set_value(index, *value as f32);
        restored += 1;
    }

    tracing::debug!(restored, "state loaded");
    Ok(restored)
}
