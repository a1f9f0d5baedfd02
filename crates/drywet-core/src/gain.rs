//! Ramped gain stage.
//!
//! A [`GainStage`] multiplies a block by a gain that moves linearly toward its
//! target over a fixed ramp, so gain changes never produce a step in the
//! output. The mixer runs two of them: one on the dry copy, one on the wet
//! path.
//!
//! # Usage
//!
//! ```rust
//! use drywet_core::{AudioBlock, GainStage};
//!
//! let mut stage = GainStage::new();
//! stage.prepare(48000.0);
//! stage.set_ramp_duration(0.001).unwrap();
//! stage.set_target_gain_db(-6.0).unwrap();
//!
//! let mut samples = [1.0_f32; 128];
//! let mut channels = [&mut samples[..]];
//! let mut block = AudioBlock::new(&mut channels).unwrap();
//! stage.process(&mut block);
//!
//! assert!(!stage.is_smoothing());
//! assert!((samples[127] - 0.501).abs() < 1e-3);
//! ```
//!
//! # Design
//!
//! The ramp interpolates linear gain, not dB. The target is kept in dB as well
//! so that settings read back exactly what was set.

use crate::block::ChannelBuffer;
use crate::error::MixError;
use crate::math::{MINUS_INFINITY_DB, db_to_gain, linear_to_db};
use crate::param::LinearSmoothedParam;

/// Ramp length the mixer configures on both stages at prepare time (1 ms).
pub const DEFAULT_RAMP_SECONDS: f64 = 0.001;

/// One smoothed gain processor.
#[derive(Debug, Clone)]
pub struct GainStage {
    gain: LinearSmoothedParam,
    target_db: f32,
}

impl GainStage {
    /// Unity gain, no ramp until [`prepare`](Self::prepare) and
    /// [`set_ramp_duration`](Self::set_ramp_duration) are called.
    pub fn new() -> Self {
        Self {
            gain: LinearSmoothedParam::new(1.0),
            target_db: 0.0,
        }
    }

    /// Configure for a sample rate. The gain snaps to its target.
    pub fn prepare(&mut self, sample_rate: f64) {
        self.gain.set_sample_rate(sample_rate);
        self.gain.snap_to_target();
    }

    /// Set the ramp used by subsequent target changes.
    ///
    /// Zero makes changes immediate. A negative or non-finite duration is
    /// rejected and the previous one kept.
    pub fn set_ramp_duration(&mut self, seconds: f64) -> Result<(), MixError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(MixError::InvalidRampDuration(seconds));
        }
        self.gain.set_ramp_seconds(seconds);
        Ok(())
    }

    /// Ramp duration in seconds.
    pub fn ramp_duration(&self) -> f64 {
        self.gain.ramp_seconds()
    }

    /// Ramp duration in frames at the prepared sample rate.
    pub fn ramp_frames(&self) -> u32 {
        self.gain.ramp_samples()
    }

    /// Start ramping toward `db` decibels.
    ///
    /// Values at or below [`MINUS_INFINITY_DB`] mean silence. This includes
    /// `f32::NEG_INFINITY`, the one non-finite input accepted; NaN and
    /// `+inf` are rejected with [`MixError::InvalidGain`]. A ramp in progress
    /// restarts from the gain reached so far.
    pub fn set_target_gain_db(&mut self, db: f32) -> Result<(), MixError> {
        if db.is_nan() || db == f32::INFINITY {
            return Err(MixError::InvalidGain(db));
        }
        let linear = db_to_gain(db);
        if !linear.is_finite() {
            return Err(MixError::InvalidGain(db));
        }
        self.target_db = db.max(MINUS_INFINITY_DB);
        self.gain.set_target(linear);
        Ok(())
    }

    /// Start ramping toward a linear gain.
    pub fn set_target_gain_linear(&mut self, gain: f32) -> Result<(), MixError> {
        if !gain.is_finite() || gain < 0.0 {
            return Err(MixError::InvalidGain(gain));
        }
        self.target_db = if gain == 0.0 {
            MINUS_INFINITY_DB
        } else {
            linear_to_db(gain).max(MINUS_INFINITY_DB)
        };
        self.gain.set_target(gain);
        Ok(())
    }

    /// Target gain, linear.
    pub fn target_gain(&self) -> f32 {
        self.gain.target()
    }

    /// Target gain in dB as last set.
    pub fn target_gain_db(&self) -> f32 {
        self.target_db
    }

    /// Gain applied to the most recent frame.
    pub fn current_gain(&self) -> f32 {
        self.gain.get()
    }

    /// Whether a ramp is still in progress.
    pub fn is_smoothing(&self) -> bool {
        !self.gain.is_settled()
    }

    /// Jump to the target gain, abandoning any ramp.
    pub fn reset(&mut self) {
        self.gain.snap_to_target();
    }

    /// Apply the gain to every channel of `block`, advancing the ramp by the
    /// block's frame count.
    ///
    /// All channels of one frame receive the same gain.
    pub fn process<B>(&mut self, block: &mut B)
    where
        B: ChannelBuffer + ?Sized,
    {
        let frames = block.num_frames();
        let channels = block.num_channels();

        if self.gain.is_settled() {
            let g = self.gain.get();
            for c in 0..channels {
                for sample in block.channel_mut(c).iter_mut() {
                    *sample *= g;
                }
            }
            return;
        }

        if channels == 0 {
            self.gain.skip(frames);
            return;
        }

        for n in 0..frames {
            let g = self.gain.advance();
            for c in 0..channels {
                block.channel_mut(c)[n] *= g;
            }
        }
    }
}

impl Default for GainStage {
    fn default() -> Self {
        Self::new()
    }
}
