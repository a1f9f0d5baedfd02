//! Audio processor wrapping the mix engine and a wet-path effect.
//!
//! Handles the real-time callback: picks up parameter changes from the shared
//! store at the block boundary, honours bypass, and runs the block through
//! [`MixEngine`].

use crate::error::PluginError;
use crate::info::PLUGIN_INFO;
use crate::shared::DryWetShared;
use drywet_core::{BusLayout, Effect, MixEngine, ProcessSpec};

/// Host-facing processor owning a [`MixEngine`] and the effect feeding its
/// wet path.
///
/// Parameter values live in a [`DryWetShared`] that control threads write
/// to. The processor copies them into the engine once per block, before
/// processing, so a change never lands mid-block.
pub struct DryWetProcessor<E> {
    shared: DryWetShared,
    engine: MixEngine,
    effect: E,
    applied_generation: Option<u64>,
}

impl<E: Effect> DryWetProcessor<E> {
    /// Processor with fresh shared state.
    pub fn new(effect: E) -> Self {
        Self::with_shared(DryWetShared::default(), effect)
    }

    /// Processor reading parameters from an existing shared store.
    pub fn with_shared(shared: DryWetShared, effect: E) -> Self {
        Self {
            shared,
            engine: MixEngine::new(),
            effect,
            applied_generation: None,
        }
    }

    /// The shared parameter store. Clone it to control the processor from
    /// another thread.
    pub fn shared(&self) -> &DryWetShared {
        &self.shared
    }

    /// The mix engine.
    pub fn engine(&self) -> &MixEngine {
        &self.engine
    }

    /// The wet-path effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Mutable access to the wet-path effect.
    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Allocate for the host's configuration.
    ///
    /// Current parameter values are applied first, so the engine starts at
    /// them without ramping.
    pub fn prepare(
        &mut self,
        sample_rate: f64,
        max_block_frames: usize,
        num_channels: usize,
    ) -> Result<(), PluginError> {
        self.prepare_with_layout(sample_rate, max_block_frames, BusLayout::matched(num_channels))
    }

    /// Allocate for an explicit bus layout. Blocks then carry
    /// `layout.output_channels` channels.
    ///
    /// Fails, leaving the processor as it was, if the layout is not one the
    /// engine supports.
    pub fn prepare_with_layout(
        &mut self,
        sample_rate: f64,
        max_block_frames: usize,
        layout: BusLayout,
    ) -> Result<(), PluginError> {
        let spec = ProcessSpec::new(sample_rate, max_block_frames, layout.output_channels);
        self.sync_params();
        if let Err(e) = self.engine.prepare_with_layout(spec, layout) {
            tracing::warn!(
                error = %e,
                sample_rate,
                max_block_frames,
                %layout,
                "prepare rejected"
            );
            return Err(e.into());
        }
        self.effect.prepare(&spec);

        tracing::info!(
            plugin = PLUGIN_INFO.name,
            sample_rate,
            max_block_frames,
            %layout,
            latency = self.effect.latency_samples(),
            "processor prepared"
        );
        Ok(())
    }

    /// Whether [`prepare`](Self::prepare) succeeded since the last release.
    pub fn is_prepared(&self) -> bool {
        self.engine.spec().is_some()
    }

    /// Process one block in place.
    ///
    /// When bypassed the block passes through unmodified. On error the block
    /// is also left unmodified.
    pub fn process(&mut self, channels: &mut [&mut [f32]]) -> Result<(), PluginError> {
        self.sync_params();
        if self.shared.is_bypassed() {
            return Ok(());
        }
        self.engine.process(channels, &mut self.effect)?;
        Ok(())
    }

    /// Free processing buffers.
    pub fn release(&mut self) {
        if self.is_prepared() {
            tracing::debug!(plugin = PLUGIN_INFO.name, "processor released");
        }
        self.engine.release();
    }

    /// Clear effect state and finish gain ramps in progress.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.effect.reset();
    }

    /// Latency reported by the wet-path effect. The mixer adds none.
    pub fn latency_samples(&self) -> usize {
        self.effect.latency_samples()
    }

    /// Tail length in seconds.
    pub fn tail_seconds(&self) -> f64 {
        PLUGIN_INFO.tail_seconds
    }

    /// Copy shared values into the engine if any changed since last time.
    ///
    /// The ramp is applied before the gains, so a ramp change and a gain
    /// change arriving together take effect as one.
    fn sync_params(&mut self) {
        let generation = self.shared.generation();
        if self.applied_generation == Some(generation) {
            return;
        }
        // Shared values are clamped to their ranges, which the engine accepts.
        if self.engine.restore(&self.shared.settings()).is_ok() {
            self.applied_generation = Some(generation);
        }
    }
}
