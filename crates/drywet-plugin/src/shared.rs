//! Thread-safe shared state for the drywet processor.
//!
//! `DryWetShared` lives for the lifetime of the plugin instance and is
//! accessible from both control threads (automation, state, presets) and the
//! audio thread. Parameter values are stored as atomic `u32` (f32 bit-cast)
//! for lock-free access. A generation counter tells the audio thread whether
//! anything changed since the last block, so it applies changes only at
//! block boundaries.

use drywet_core::{MIXER_PARAMS, MixerSettings, ParamDescriptor, ParameterInfo};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Inner storage for plugin shared state.
///
/// Holds all data behind an `Arc` so that `DryWetShared` can be cheaply
/// cloned into control threads.
struct DryWetSharedData {
    /// Parameter descriptors, indexed by parameter position.
    descriptors: Vec<ParamDescriptor>,
    /// Current parameter values as f32 bit-cast to u32 for atomic access.
    values: Vec<AtomicU32>,
    /// Whether processing is bypassed.
    bypassed: AtomicBool,
    /// Bumped after every value write.
    generation: AtomicU64,
    /// Called after a value changes so the host can schedule processing.
    host_notify: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Shared state accessible from all plugin threads.
///
/// Holds the mixer's parameter descriptors (immutable after construction)
/// and the current parameter values as atomics. The processor reads values
/// here; control threads write them.
#[derive(Clone)]
pub struct DryWetShared {
    inner: Arc<DryWetSharedData>,
}

impl DryWetShared {
    /// Create shared state with every parameter at its default.
    ///
    /// `host_notify` is called after every value change. Pass `None` for
    /// standalone/test use.
    pub fn new(host_notify: Option<Box<dyn Fn() + Send + Sync>>) -> Self {
        let descriptors = MIXER_PARAMS.to_vec();
        let values = descriptors
            .iter()
            .map(|d| AtomicU32::new(d.default.to_bits()))
            .collect();

        Self {
            inner: Arc::new(DryWetSharedData {
                descriptors,
                values,
                bypassed: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                host_notify,
            }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        self.inner.descriptors.len()
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&ParamDescriptor> {
        self.inner.descriptors.get(index)
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.inner.descriptors
    }

    /// Find parameter index by stable `ParamId`.
    pub fn index_by_id(&self, id: u32) -> Option<usize> {
        self.inner.descriptors.iter().position(|d| d.id.0 == id)
    }

    /// Read the current value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds;
    /// `NaN` becomes the default.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self
            .inner
            .values
            .get(index)
            .zip(self.inner.descriptors.get(index))
        {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
            self.inner.generation.fetch_add(1, Ordering::AcqRel);
            self.notify_host();
        }
    }

    /// Normalized (0..1) value of a parameter, as hosts automate it.
    pub fn get_normalized(&self, index: usize) -> Option<f32> {
        let desc = self.descriptor(index)?;
        self.get_value(index).map(|v| desc.normalize(v))
    }

    /// Write a parameter from a normalized (0..1) host value.
    pub fn set_normalized(&self, index: usize, normalized: f32) {
        if let Some(desc) = self.descriptor(index) {
            let value = desc.denormalize(normalized);
            self.set_value(index, value);
        }
    }

    /// Set all three mixer parameters from a settings snapshot.
    ///
    /// Values outside the parameter ranges are clamped.
    pub fn load_settings(&self, settings: &MixerSettings) {
        self.set_value(0, settings.dry_gain_db);
        self.set_value(1, settings.wet_gain_db);
        self.set_value(2, (settings.ramp_seconds * 1000.0) as f32);
    }

    /// Whether processing is bypassed.
    pub fn is_bypassed(&self) -> bool {
        self.inner.bypassed.load(Ordering::Acquire)
    }

    /// Set the bypass state.
    pub fn set_bypassed(&self, bypassed: bool) {
        self.inner.bypassed.store(bypassed, Ordering::Release);
    }

    /// Counter bumped by every value write.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Invoke the host notification callback, if any.
    pub fn notify_host(&self) {
        if let Some(cb) = &self.inner.host_notify {
            cb();
        }
    }

    /// Current values as engine settings.
    ///
    /// A gain at the bottom of its range maps to silence.
    pub fn settings(&self) -> MixerSettings {
        let value = |i: usize| self.get_value(i).unwrap_or_default();
        MixerSettings::from_param_values([value(0), value(1), value(2)])
    }

    /// Push all current values into a parameter target, in index order.
    pub fn apply_to(&self, target: &mut dyn ParameterInfo) {
        for (i, atomic) in self.inner.values.iter().enumerate() {
            let val = f32::from_bits(atomic.load(Ordering::Acquire));
            target.set_param(i, val);
        }
    }
}

impl Default for DryWetShared {
    fn default() -> Self {
        Self::new(None)
    }
}

impl core::fmt::Debug for DryWetShared {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let values: Vec<f32> = (0..self.param_count())
            .filter_map(|i| self.get_value(i))
            .collect();
        f.debug_struct("DryWetShared")
            .field("values", &values)
            .field("bypassed", &self.is_bypassed())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drywet_core::MixEngine;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn shared_new_creates_all_params() {
        let shared = DryWetShared::default();
        assert_eq!(shared.param_count(), 3);
        assert_eq!(shared.descriptor(0).unwrap().name, "Dry Gain");
        assert_eq!(shared.descriptor(2).unwrap().name, "Ramp Time");
    }

    #[test]
    fn shared_defaults_match_descriptors() {
        let shared = DryWetShared::default();
        for (i, desc) in shared.descriptors().iter().enumerate() {
            let val = shared.get_value(i).unwrap();
            assert_eq!(
                val, desc.default,
                "param {i} ({}) default mismatch: got {val}, expected {}",
                desc.name, desc.default
            );
        }
    }

    #[test]
    fn shared_set_value_clamps() {
        let shared = DryWetShared::default();
        let desc = *shared.descriptor(0).unwrap();

        shared.set_value(0, desc.max + 100.0);
        assert_eq!(shared.get_value(0).unwrap(), desc.max);

        shared.set_value(0, desc.min - 100.0);
        assert_eq!(shared.get_value(0).unwrap(), desc.min);

        shared.set_value(0, f32::NAN);
        assert_eq!(shared.get_value(0).unwrap(), desc.default);
    }

    #[test]
    fn shared_index_by_id_finds_params() {
        let shared = DryWetShared::default();
        assert_eq!(shared.index_by_id(100), Some(0));
        assert_eq!(shared.index_by_id(101), Some(1));
        assert_eq!(shared.index_by_id(102), Some(2));
        assert_eq!(shared.index_by_id(999), None);
    }

    #[test]
    fn shared_out_of_range_safe() {
        let shared = DryWetShared::default();
        assert_eq!(shared.get_value(999), None);
        assert_eq!(shared.descriptor(999), None);
        let before = shared.generation();
        shared.set_value(999, 1.0);
        assert_eq!(shared.generation(), before);
    }

    #[test]
    fn normalized_roundtrip() {
        let shared = DryWetShared::default();
        shared.set_normalized(2, 0.5);
        assert_eq!(shared.get_value(2).unwrap(), 50.0);
        assert_eq!(shared.get_normalized(2).unwrap(), 0.5);

        shared.set_normalized(1, 1.0);
        assert_eq!(shared.get_value(1).unwrap(), 12.0);
    }

    #[test]
    fn generation_bumps_and_notifies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shared = DryWetShared::new(Some(Box::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })));

        let g0 = shared.generation();
        shared.set_value(0, -3.0);
        shared.set_value(1, -6.0);
        assert_eq!(shared.generation(), g0 + 2);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn shared_apply_to_engine() {
        let shared = DryWetShared::default();
        shared.set_value(0, -12.0);
        shared.set_value(2, 10.0);

        let mut engine = MixEngine::new();
        shared.apply_to(&mut engine);

        assert_eq!(engine.settings().dry_gain_db, -12.0);
        assert!((engine.ramp_duration() - 0.010).abs() < 1e-9);
    }

    #[test]
    fn settings_snapshot() {
        let shared = DryWetShared::default();
        shared.set_value(1, -60.0);
        shared.set_value(2, 20.0);
        let settings = shared.settings();
        assert_eq!(settings.dry_gain_db, 0.0);
        assert_eq!(settings.wet_gain_db, drywet_core::MINUS_INFINITY_DB);
        assert!((settings.ramp_seconds - 0.020).abs() < 1e-9);
    }

    #[test]
    fn load_settings_clamps_to_ranges() {
        let shared = DryWetShared::default();
        shared.load_settings(&MixerSettings {
            dry_gain_db: -100.0,
            wet_gain_db: 3.0,
            ramp_seconds: 0.25,
        });
        assert_eq!(shared.get_value(0), Some(-60.0));
        assert_eq!(shared.get_value(1), Some(3.0));
        assert_eq!(shared.get_value(2), Some(100.0));
    }

    #[test]
    fn clones_share_values() {
        let shared = DryWetShared::default();
        let control = shared.clone();
        control.set_value(1, -24.0);
        control.set_bypassed(true);
        assert_eq!(shared.get_value(1), Some(-24.0));
        assert!(shared.is_bypassed());
    }
}
