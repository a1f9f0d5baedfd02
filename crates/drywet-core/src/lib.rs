//! Drywet Core - parallel dry/wet mixing engine
//!
//! This crate mixes an unprocessed (dry) copy of an audio block with the same
//! block after an arbitrary effect (wet), each path carrying its own smoothed
//! gain. It is designed for real-time use: all allocation happens at prepare
//! time and the process path never locks or logs.
//!
//! # Core Abstractions
//!
//! ## Engine
//!
//! - [`MixEngine`] - prepare/process/release lifecycle and the per-block pipeline
//! - [`MixerSettings`] - snapshot of the user-facing configuration
//! - [`ProcessSpec`] - sample rate, maximum block size, channel count
//! - [`BusLayout`] / [`SupportedLayouts`] - accepted channel configurations
//! - [`ParameterInfo`] / [`MIXER_PARAMS`] - indexed parameters with stable ids
//!
//! ## Buffers
//!
//! - [`AudioBlock`] - borrowed host channel slices for one process call
//! - [`DryBuffer`] - scratch copy of the dry signal, sized at prepare time
//! - [`ChannelBuffer`] - common interface over both
//!
//! ## Gain
//!
//! - [`GainStage`] - gain with a linear ramp toward its target
//! - [`LinearSmoothedParam`] - the underlying ramp
//!
//! ## Wet Path
//!
//! - [`Effect`] - object-safe trait for the injected transform
//! - [`Identity`], [`from_fn`], [`EffectExt::chain`] - ready-made effects
//!
//! # no_std Support
//!
//! Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! drywet-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use drywet_core::{from_fn, AudioBlock, MixEngine, ProcessSpec};
//!
//! let mut engine = MixEngine::new();
//! engine.prepare(ProcessSpec::new(48000.0, 256, 1)).unwrap();
//! engine.set_wet_gain_db(-6.0).unwrap();
//!
//! let mut invert = from_fn(|block: &mut AudioBlock<'_, '_>| block.scale(-1.0));
//! let mut samples = vec![0.5_f32; 256];
//! let mut channels = [&mut samples[..]];
//! engine.process(&mut channels, &mut invert).unwrap();
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations in the process path
//! - **Reject, don't clamp**: out-of-contract blocks and parameter values are
//!   refused with a [`MixError`], leaving state untouched
//! - **Injected effect**: the mixer never owns or knows the wet transform

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod block;
pub mod buffer;
pub mod effect;
pub mod error;
pub mod gain;
pub mod layout;
pub mod math;
pub mod mixer;
pub mod param;
pub mod param_info;

// Re-export main types at crate root
pub use block::{AudioBlock, ChannelBuffer, accumulate};
pub use buffer::{DryBuffer, DryView};
pub use effect::{Chain, Effect, EffectExt, FnEffect, Identity, from_fn};
pub use error::{ErrorKind, MixError};
pub use gain::{DEFAULT_RAMP_SECONDS, GainStage};
pub use layout::{BusLayout, ProcessSpec, SupportedLayouts};
pub use math::{MINUS_INFINITY_DB, db_to_linear, linear_to_db};
pub use mixer::{
    DRY_GAIN, EngineState, MIXER_PARAMS, MixEngine, MixerSettings, RAMP_TIME, WET_GAIN,
};
pub use param::LinearSmoothedParam;
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
