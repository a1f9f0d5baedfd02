//! Error type for mixer configuration and parameter setters.

use crate::layout::BusLayout;

/// Broad class of a [`MixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The engine was used outside its prepared contract (not prepared,
    /// block larger than negotiated, unsupported layout).
    Configuration,
    /// A setter received a value it cannot represent. The previous value
    /// stays in effect.
    Parameter,
}

/// Errors reported by the mixing engine and its components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MixError {
    /// `process_block` was called before `prepare` (or after `release`).
    NotPrepared,
    /// The block holds more frames than the prepared maximum.
    BlockTooLarge {
        /// Frames in the offending block.
        frames: usize,
        /// Maximum negotiated at prepare time.
        max_frames: usize,
    },
    /// The block holds more channels than were prepared.
    TooManyChannels {
        /// Channels in the offending block.
        channels: usize,
        /// Channel count negotiated at prepare time.
        max_channels: usize,
    },
    /// Channels of one block have different lengths.
    RaggedBlock {
        /// Index of the first channel whose length differs.
        channel: usize,
        /// Length of that channel.
        frames: usize,
        /// Length of channel 0.
        expected: usize,
    },
    /// The requested bus layout is not in the supported set.
    UnsupportedLayout(BusLayout),
    /// Sample rate is zero, negative or not finite.
    InvalidSampleRate(f64),
    /// Maximum block size of zero frames.
    InvalidBlockSize(usize),
    /// Ramp duration is negative or not finite.
    InvalidRampDuration(f64),
    /// Gain target is not finite or does not map to a finite linear gain.
    InvalidGain(f32),
}

impl MixError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRampDuration(_) | Self::InvalidGain(_) => ErrorKind::Parameter,
            _ => ErrorKind::Configuration,
        }
    }

    /// Returns `true` for [`ErrorKind::Configuration`] errors.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

impl core::fmt::Display for MixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotPrepared => write!(f, "engine used before prepare"),
            Self::BlockTooLarge { frames, max_frames } => {
                write!(f, "block of {frames} frames exceeds prepared maximum of {max_frames}")
            }
            Self::TooManyChannels {
                channels,
                max_channels,
            } => write!(f, "block has {channels} channels, prepared for {max_channels}"),
            Self::RaggedBlock {
                channel,
                frames,
                expected,
            } => write!(f, "channel {channel} has {frames} frames, expected {expected}"),
            Self::UnsupportedLayout(layout) => write!(f, "unsupported bus layout {layout}"),
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate {sr}"),
            Self::InvalidBlockSize(n) => write!(f, "invalid maximum block size {n}"),
            Self::InvalidRampDuration(s) => write!(f, "invalid ramp duration {s} s"),
            Self::InvalidGain(g) => write!(f, "invalid gain {g}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MixError {}
