//! Linear parameter ramps for zipper-free changes.
//!
//! Gain changes applied as a step produce an audible click. [`LinearSmoothedParam`]
//! spreads each change evenly over a fixed number of samples, so the value
//! moves monotonically from where it is now to the new target and lands on
//! the target exactly when the ramp ends.
//!
//! ## Usage
//!
//! ```rust
//! use drywet_core::LinearSmoothedParam;
//!
//! let mut gain = LinearSmoothedParam::new(1.0);
//! gain.set_sample_rate(48000.0);
//! gain.set_ramp_seconds(0.001); // 48 samples
//!
//! gain.set_target(0.5);
//! for _ in 0..48 {
//!     let _g = gain.advance();
//! }
//! assert_eq!(gain.get(), 0.5);
//! ```

/// Number of whole samples covered by `seconds` at `sample_rate`.
///
/// Rounds to the nearest sample so that e.g. 1 ms at 48 kHz is exactly 48.
#[inline]
pub fn ramp_length_samples(seconds: f64, sample_rate: f64) -> u32 {
    if seconds <= 0.0 || sample_rate <= 0.0 {
        return 0;
    }
    let samples = libm::round(seconds * sample_rate);
    if samples >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        samples as u32
    }
}

/// A parameter with linear smoothing (constant rate of change).
///
/// Setting a new target while a ramp is in flight restarts the ramp from the
/// current (partial) value, so the output never jumps.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    /// Current value
    current: f32,
    /// Target value
    target: f32,
    /// Value the current ramp started from
    start: f32,
    /// Increment per sample (can be positive or negative)
    increment: f32,
    /// Length of the current ramp in samples
    ramp_total: u32,
    /// Samples remaining until target reached
    samples_remaining: u32,
    /// Ramp length in samples for the next target change
    ramp_samples: u32,
    /// Sample rate in Hz
    sample_rate: f64,
    /// Ramp length in seconds
    ramp_seconds: f64,
}

impl LinearSmoothedParam {
    /// Create a new parameter at `initial` with ramping disabled.
    ///
    /// Call [`set_sample_rate`](Self::set_sample_rate) and
    /// [`set_ramp_seconds`](Self::set_ramp_seconds) to enable ramps.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            start: initial,
            increment: 0.0,
            ramp_total: 0,
            samples_remaining: 0,
            ramp_samples: 0,
            sample_rate: 0.0,
            ramp_seconds: 0.0,
        }
    }

    /// Create with full configuration.
    pub fn with_config(initial: f32, sample_rate: f64, ramp_seconds: f64) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.ramp_seconds = ramp_seconds;
        param.ramp_samples = ramp_length_samples(ramp_seconds, sample_rate);
        param
    }

    /// Set the target value.
    ///
    /// Starts a ramp from the current value. With a zero-length ramp the
    /// value changes immediately.
    ///
    /// Ramp values are computed as `start + increment * k` and clamped at the
    /// target, so rounding never carries the value past the target.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }

        self.target = target;

        if self.ramp_samples == 0 {
            self.snap_to_target();
        } else {
            self.start = self.current;
            self.increment = (target - self.current) / self.ramp_samples as f32;
            self.ramp_total = self.ramp_samples;
            self.samples_remaining = self.ramp_samples;
        }
    }

    /// Set value immediately.
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.snap_to_target();
    }

    /// Update sample rate. Affects ramps started after this call.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.ramp_samples = ramp_length_samples(self.ramp_seconds, sample_rate);
    }

    /// Set ramp length in seconds. Affects ramps started after this call.
    pub fn set_ramp_seconds(&mut self, seconds: f64) {
        self.ramp_seconds = seconds;
        self.ramp_samples = ramp_length_samples(seconds, self.sample_rate);
    }

    /// Ramp length in seconds.
    #[inline]
    pub fn ramp_seconds(&self) -> f64 {
        self.ramp_seconds
    }

    /// Ramp length in samples at the current sample rate.
    #[inline]
    pub fn ramp_samples(&self) -> u32 {
        self.ramp_samples
    }

    /// Get next smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.samples_remaining -= 1;
            self.current = if self.samples_remaining == 0 {
                self.target
            } else {
                self.ramp_value()
            };
        }
        self.current
    }

    /// Advance by `samples` without producing intermediate values.
    pub fn skip(&mut self, samples: usize) {
        if samples >= self.samples_remaining as usize {
            self.snap_to_target();
        } else {
            self.samples_remaining -= samples as u32;
            self.current = self.ramp_value();
        }
    }

    /// Value at the current ramp position, never past the target.
    #[inline]
    fn ramp_value(&self) -> f32 {
        let k = (self.ramp_total - self.samples_remaining) as f32;
        let value = self.start + self.increment * k;
        if self.increment >= 0.0 {
            value.min(self.target)
        } else {
            value.max(self.target)
        }
    }

    /// Get current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Samples left in the current ramp.
    #[inline]
    pub fn samples_remaining(&self) -> u32 {
        self.samples_remaining
    }

    /// Check if transition is complete.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }

    /// Snap to target immediately.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.start = self.target;
        self.increment = 0.0;
        self.ramp_total = 0;
        self.samples_remaining = 0;
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
