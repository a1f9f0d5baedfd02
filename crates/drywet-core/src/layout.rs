//! Bus layouts and processing setup.
//!
//! The host negotiates how many channels flow in and out of the mixer. Instead
//! of scattering that decision across conditionals, the accepted combinations
//! are listed once in a [`SupportedLayouts`] set and checked when the engine is
//! prepared.

use crate::error::MixError;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Input/output channel counts of the main bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusLayout {
    /// Channels delivered by the host.
    pub input_channels: usize,
    /// Channels the host expects back.
    pub output_channels: usize,
}

impl BusLayout {
    /// One channel in, one out.
    pub const MONO: Self = Self::new(1, 1);
    /// Two channels in, two out.
    pub const STEREO: Self = Self::new(2, 2);

    /// Create a layout.
    pub const fn new(input_channels: usize, output_channels: usize) -> Self {
        Self {
            input_channels,
            output_channels,
        }
    }

    /// Layout whose input matches its output.
    pub const fn matched(channels: usize) -> Self {
        Self::new(channels, channels)
    }
}

impl core::fmt::Display for BusLayout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} in / {} out", self.input_channels, self.output_channels)
    }
}

/// Set of bus layouts the engine accepts.
///
/// The default set is mono and stereo with input matching output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLayouts {
    layouts: Vec<BusLayout>,
}

impl SupportedLayouts {
    /// Accept exactly the given layouts.
    pub fn new(layouts: impl IntoIterator<Item = BusLayout>) -> Self {
        Self {
            layouts: layouts.into_iter().collect(),
        }
    }

    /// Add another accepted layout.
    pub fn with(mut self, layout: BusLayout) -> Self {
        if !self.layouts.contains(&layout) {
            self.layouts.push(layout);
        }
        self
    }

    /// Whether `layout` is accepted.
    pub fn supports(&self, layout: &BusLayout) -> bool {
        self.layouts.contains(layout)
    }

    /// Return `layout` if accepted, an error otherwise.
    pub fn validate(&self, layout: BusLayout) -> Result<BusLayout, MixError> {
        if self.supports(&layout) {
            Ok(layout)
        } else {
            Err(MixError::UnsupportedLayout(layout))
        }
    }

    /// Iterate over the accepted layouts.
    pub fn iter(&self) -> impl Iterator<Item = &BusLayout> {
        self.layouts.iter()
    }
}

impl Default for SupportedLayouts {
    fn default() -> Self {
        Self::new([BusLayout::MONO, BusLayout::STEREO])
    }
}

/// Processing configuration handed over by the host at prepare time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block, in frames, the host will pass to a single process call.
    pub max_block_frames: usize,
    /// Number of output channels.
    pub num_channels: usize,
}

impl ProcessSpec {
    /// Create a spec.
    pub const fn new(sample_rate: f64, max_block_frames: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_frames,
            num_channels,
        }
    }

    /// Reject sample rates and block sizes the engine cannot work with.
    pub fn validate(&self) -> Result<(), MixError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(MixError::InvalidSampleRate(self.sample_rate));
        }
        if self.max_block_frames == 0 {
            return Err(MixError::InvalidBlockSize(self.max_block_frames));
        }
        Ok(())
    }
}
