//! Host-facing adapter for the drywet mixer.
//!
//! This crate wraps [`drywet_core::MixEngine`] in the pieces a plugin host
//! needs: static metadata, a lock-free parameter store shared between control
//! and audio threads, a processor with the prepare/process/release lifecycle,
//! and byte-block state save/restore.
//!
//! # Architecture
//!
//! | Host concept | drywet |
//! |--------------|--------|
//! | plugin descriptor | [`PLUGIN_INFO`] |
//! | parameter id | `ParamId(u32)` (100 dry, 101 wet, 102 ramp) |
//! | normalized automation | [`DryWetShared::set_normalized`] |
//! | activate / process / deactivate | [`DryWetProcessor`] |
//! | state chunk | [`save_state`] / [`load_state`] |
//!
//! # Example
//!
//! ```rust
//! use drywet_plugin::create_plugin;
//!
//! let mut plugin = create_plugin();
//! plugin.prepare(48000.0, 512, 2).unwrap();
//!
//! // Control thread
//! let control = plugin.shared().clone();
//! control.set_value(1, -6.0);
//!
//! // Audio thread: the change applies from the next block on.
//! let mut left = vec![0.5_f32; 512];
//! let mut right = vec![0.5_f32; 512];
//! plugin.process(&mut [&mut left[..], &mut right[..]]).unwrap();
//! ```

pub mod error;
pub mod info;
pub mod processor;
pub mod shared;
pub mod state;

pub use error::{PluginError, StateError};
pub use info::{PLUGIN_INFO, PluginInfo};
pub use processor::DryWetProcessor;
pub use shared::DryWetShared;
pub use state::{load_state, save_state};

use drywet_core::{Effect, Identity};

/// Create an unprepared processor whose wet path is left unprocessed.
pub fn create_plugin() -> DryWetProcessor<Identity> {
    create_plugin_with(Identity)
}

/// Create an unprepared processor running `effect` on the wet path.
pub fn create_plugin_with<E: Effect>(effect: E) -> DryWetProcessor<E> {
    tracing::debug!(
        plugin = PLUGIN_INFO.name,
        version = PLUGIN_INFO.version,
        "creating processor"
    );
    DryWetProcessor::new(effect)
}
