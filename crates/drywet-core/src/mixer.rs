//! Dry/wet mixing engine.
//!
//! [`MixEngine`] runs the per-block pipeline:
//!
//! 1. zero output channels that have no matching input channel
//! 2. copy the block into the dry buffer
//! 3. run the caller's effect over the block (the wet path)
//! 4. apply the dry gain to the copy and the wet gain to the block
//! 5. add the dry copy back into the block
//!
//! # Lifecycle
//!
//! ```text
//! Unprepared --prepare--> Prepared --process_block--> Prepared
//!     ^                      |  ^                        |
//!     +------release---------+  +------prepare-----------+
//! ```
//!
//! `process_block` never allocates, locks or logs. Everything that may
//! allocate happens in [`prepare`](MixEngine::prepare).
//!
//! # Example
//!
//! ```rust
//! use drywet_core::{AudioBlock, Identity, MixEngine, ProcessSpec};
//!
//! let mut engine = MixEngine::new();
//! engine.prepare(ProcessSpec::new(48000.0, 512, 2)).unwrap();
//!
//! let mut left = vec![1.0_f32; 512];
//! let mut right = vec![1.0_f32; 512];
//! let mut channels = [&mut left[..], &mut right[..]];
//! let mut block = AudioBlock::new(&mut channels).unwrap();
//! engine.process_block(&mut block, &mut Identity).unwrap();
//!
//! assert_eq!(left[511], 2.0);
//! ```

use crate::block::{AudioBlock, ChannelBuffer, accumulate};
use crate::buffer::DryBuffer;
use crate::effect::Effect;
use crate::error::MixError;
use crate::gain::{DEFAULT_RAMP_SECONDS, GainStage};
use crate::layout::{BusLayout, ProcessSpec, SupportedLayouts};
use crate::math::MINUS_INFINITY_DB;
use crate::param_info::{ParamDescriptor, ParamId, ParameterInfo};

/// Stable id of the dry gain parameter.
pub const DRY_GAIN: ParamId = ParamId(100);
/// Stable id of the wet gain parameter.
pub const WET_GAIN: ParamId = ParamId(101);
/// Stable id of the ramp time parameter.
pub const RAMP_TIME: ParamId = ParamId(102);

/// The mixer's user-facing parameters, in index order.
///
/// A gain at the bottom of its range means silence.
pub const MIXER_PARAMS: [ParamDescriptor; 3] = [
    ParamDescriptor::gain_db("Dry Gain", "Dry", -60.0, 12.0, 0.0).with_id(DRY_GAIN, "dry_gain"),
    ParamDescriptor::gain_db("Wet Gain", "Wet", -60.0, 12.0, 0.0).with_id(WET_GAIN, "wet_gain"),
    ParamDescriptor::time_ms("Ramp Time", "Ramp", 0.0, 100.0, 1.0).with_id(RAMP_TIME, "ramp"),
];

/// Map a gain parameter value to the dB target handed to a gain stage.
fn param_to_db(desc: &ParamDescriptor, value: f32) -> f32 {
    let value = desc.clamp(value);
    if value <= desc.min {
        MINUS_INFINITY_DB
    } else {
        value
    }
}

/// Lifecycle state of a [`MixEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No buffers allocated; processing is rejected.
    Unprepared,
    /// Ready to process blocks up to the prepared size.
    Prepared,
}

/// Serializable snapshot of the engine's user-facing configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixerSettings {
    /// Dry path gain in dB.
    pub dry_gain_db: f32,
    /// Wet path gain in dB.
    pub wet_gain_db: f32,
    /// Gain ramp duration in seconds, shared by both paths.
    pub ramp_seconds: f64,
}

impl MixerSettings {
    /// Check every field without applying anything.
    pub fn validate(&self) -> Result<(), MixError> {
        GainStage::new().set_target_gain_db(self.dry_gain_db)?;
        GainStage::new().set_target_gain_db(self.wet_gain_db)?;
        GainStage::new().set_ramp_duration(self.ramp_seconds)?;
        Ok(())
    }
}

impl MixerSettings {
    /// Build settings from plain parameter values in [`MIXER_PARAMS`] order.
    ///
    /// Values are clamped to their ranges. A gain at the bottom of its range
    /// becomes silence.
    pub fn from_param_values(values: [f32; 3]) -> Self {
        Self {
            dry_gain_db: param_to_db(&MIXER_PARAMS[0], values[0]),
            wet_gain_db: param_to_db(&MIXER_PARAMS[1], values[1]),
            ramp_seconds: f64::from(MIXER_PARAMS[2].clamp(values[2])) / 1000.0,
        }
    }
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self {
            dry_gain_db: 0.0,
            wet_gain_db: 0.0,
            ramp_seconds: DEFAULT_RAMP_SECONDS,
        }
    }
}

/// Parallel dry/wet mixer with ramped gains.
#[derive(Debug)]
pub struct MixEngine {
    layouts: SupportedLayouts,
    layout: BusLayout,
    spec: Option<ProcessSpec>,
    dry_buffer: DryBuffer,
    dry_gain: GainStage,
    wet_gain: GainStage,
    ramp_seconds: f64,
}

impl MixEngine {
    /// Unprepared engine accepting the default mono and stereo layouts.
    pub fn new() -> Self {
        Self::with_layouts(SupportedLayouts::default())
    }

    /// Unprepared engine accepting `layouts`.
    pub fn with_layouts(layouts: SupportedLayouts) -> Self {
        Self {
            layouts,
            layout: BusLayout::STEREO,
            spec: None,
            dry_buffer: DryBuffer::new(),
            dry_gain: GainStage::new(),
            wet_gain: GainStage::new(),
            ramp_seconds: DEFAULT_RAMP_SECONDS,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        if self.spec.is_some() {
            EngineState::Prepared
        } else {
            EngineState::Unprepared
        }
    }

    /// The spec from the last successful prepare.
    pub fn spec(&self) -> Option<&ProcessSpec> {
        self.spec.as_ref()
    }

    /// Active bus layout.
    pub fn layout(&self) -> BusLayout {
        self.layout
    }

    /// Layouts this engine accepts.
    pub fn supported_layouts(&self) -> &SupportedLayouts {
        &self.layouts
    }

    /// Prepare with input channels matching `spec.num_channels`.
    pub fn prepare(&mut self, spec: ProcessSpec) -> Result<(), MixError> {
        self.prepare_with_layout(spec, BusLayout::matched(spec.num_channels))
    }

    /// Prepare for `spec` using an explicit bus layout.
    ///
    /// The layout's output channel count must equal `spec.num_channels` and
    /// the layout must be supported. On error the engine keeps its previous
    /// state.
    pub fn prepare_with_layout(
        &mut self,
        spec: ProcessSpec,
        layout: BusLayout,
    ) -> Result<(), MixError> {
        spec.validate()?;
        if layout.output_channels != spec.num_channels {
            return Err(MixError::UnsupportedLayout(layout));
        }
        let layout = self.layouts.validate(layout)?;

        self.dry_buffer
            .prepare(spec.num_channels, spec.max_block_frames)?;

        for stage in [&mut self.dry_gain, &mut self.wet_gain] {
            stage.prepare(spec.sample_rate);
            stage.set_ramp_duration(self.ramp_seconds)?;
        }

        self.layout = layout;
        self.spec = Some(spec);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block_frames = spec.max_block_frames,
            channels = spec.num_channels,
            "mix engine prepared"
        );
        Ok(())
    }

    /// Convenience wrapper over [`prepare`](Self::prepare).
    pub fn prepare_to_play(
        &mut self,
        sample_rate: f64,
        max_block_frames: usize,
        num_channels: usize,
    ) -> Result<(), MixError> {
        self.prepare(ProcessSpec::new(sample_rate, max_block_frames, num_channels))
    }

    /// Drop the dry buffer and return to [`EngineState::Unprepared`].
    ///
    /// Safe to call when already unprepared.
    pub fn release(&mut self) {
        if self.spec.take().is_none() {
            return;
        }
        self.dry_buffer.release();

        #[cfg(feature = "tracing")]
        tracing::debug!("mix engine released");
    }

    /// Check that `block` fits the prepared shape.
    fn check_block<B: ChannelBuffer + ?Sized>(&self, block: &B) -> Result<(), MixError> {
        let spec = self.spec.as_ref().ok_or(MixError::NotPrepared)?;
        if block.num_frames() > spec.max_block_frames {
            return Err(MixError::BlockTooLarge {
                frames: block.num_frames(),
                max_frames: spec.max_block_frames,
            });
        }
        if block.num_channels() > spec.num_channels {
            return Err(MixError::TooManyChannels {
                channels: block.num_channels(),
                max_channels: spec.num_channels,
            });
        }
        Ok(())
    }

    /// Mix one block in place.
    ///
    /// A block that does not fit the prepared shape is rejected before
    /// anything is written, leaving it untouched.
    pub fn process_block<E>(
        &mut self,
        block: &mut AudioBlock<'_, '_>,
        effect: &mut E,
    ) -> Result<(), MixError>
    where
        E: Effect + ?Sized,
    {
        self.check_block(&*block)?;

        for c in self.layout.input_channels..block.num_channels() {
            block.clear_channel(c);
        }

        let mut dry = self.dry_buffer.snapshot(&*block)?;

        effect.process(block);

        self.dry_gain.process(&mut dry);
        self.wet_gain.process(block);

        accumulate(block, &dry);
        Ok(())
    }

    /// Wrap host channel slices and mix them in place.
    pub fn process<E>(
        &mut self,
        channels: &mut [&mut [f32]],
        effect: &mut E,
    ) -> Result<(), MixError>
    where
        E: Effect + ?Sized,
    {
        let mut block = AudioBlock::new(channels)?;
        self.process_block(&mut block, effect)
    }

    /// Ramp the dry path toward `db`.
    pub fn set_dry_gain_db(&mut self, db: f32) -> Result<(), MixError> {
        self.dry_gain.set_target_gain_db(db)
    }

    /// Ramp the wet path toward `db`.
    pub fn set_wet_gain_db(&mut self, db: f32) -> Result<(), MixError> {
        self.wet_gain.set_target_gain_db(db)
    }

    /// Set the ramp duration of both paths.
    pub fn set_ramp_duration(&mut self, seconds: f64) -> Result<(), MixError> {
        self.dry_gain.set_ramp_duration(seconds)?;
        self.wet_gain.set_ramp_duration(seconds)?;
        self.ramp_seconds = seconds;
        Ok(())
    }

    /// Gain ramp duration in seconds.
    pub fn ramp_duration(&self) -> f64 {
        self.ramp_seconds
    }

    /// The dry path gain stage.
    pub fn dry_gain(&self) -> &GainStage {
        &self.dry_gain
    }

    /// The wet path gain stage.
    pub fn wet_gain(&self) -> &GainStage {
        &self.wet_gain
    }

    /// Snapshot of the current configuration.
    pub fn settings(&self) -> MixerSettings {
        MixerSettings {
            dry_gain_db: self.dry_gain.target_gain_db(),
            wet_gain_db: self.wet_gain.target_gain_db(),
            ramp_seconds: self.ramp_seconds,
        }
    }

    /// Apply a configuration snapshot.
    ///
    /// Validates every field first; on error nothing changes. The ramp is
    /// updated before the gains so the new targets use the restored ramp.
    pub fn restore(&mut self, settings: &MixerSettings) -> Result<(), MixError> {
        settings.validate()?;
        self.set_ramp_duration(settings.ramp_seconds)?;
        self.set_dry_gain_db(settings.dry_gain_db)?;
        self.set_wet_gain_db(settings.wet_gain_db)?;
        Ok(())
    }

    /// Abandon gain ramps in progress and jump to their targets.
    pub fn reset(&mut self) {
        self.dry_gain.reset();
        self.wet_gain.reset();
    }
}

impl ParameterInfo for MixEngine {
    fn param_count(&self) -> usize {
        MIXER_PARAMS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        MIXER_PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => MIXER_PARAMS[0].clamp(self.dry_gain.target_gain_db()),
            1 => MIXER_PARAMS[1].clamp(self.wet_gain.target_gain_db()),
            2 => (self.ramp_seconds * 1000.0) as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        // Clamped values are always accepted by the setters.
        let _ = match index {
            0 => self.set_dry_gain_db(param_to_db(&MIXER_PARAMS[0], value)),
            1 => self.set_wet_gain_db(param_to_db(&MIXER_PARAMS[1], value)),
            2 => {
                let ms = MIXER_PARAMS[2].clamp(value);
                self.set_ramp_duration(f64::from(ms) / 1000.0)
            }
            _ => Ok(()),
        };
    }
}

impl Default for MixEngine {
    fn default() -> Self {
        Self::new()
    }
}
