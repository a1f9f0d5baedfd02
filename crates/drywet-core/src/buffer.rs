//! Dry-signal scratch storage.
//!
//! [`DryBuffer`] owns one contiguous allocation sized at prepare time to
//! `channels × max_frames`. Each process call takes a [`DryView`] sized to the
//! block actually delivered, which may be shorter than the prepared maximum:
//! some hosts change their block size from one callback to the next.
//!
//! Storage is channel-major: channel `c` occupies
//! `data[c * max_frames .. (c + 1) * max_frames]`. Sample contents are
//! undefined after a resize.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::block::ChannelBuffer;
use crate::error::MixError;

/// Owned scratch buffer holding a copy of the unprocessed signal.
#[derive(Debug, Default)]
pub struct DryBuffer {
    data: Vec<f32>,
    channels: usize,
    max_frames: usize,
    prepared: bool,
}

impl DryBuffer {
    /// Creates an unprepared, empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the buffer for `channels × max_frames` samples.
    ///
    /// Must be called before [`snapshot`](Self::snapshot) and whenever the
    /// host's block size or channel count changes. Never call it from the
    /// audio thread: it may allocate.
    ///
    /// Fails with [`MixError::InvalidBlockSize`], leaving the buffer as it
    /// was, if the total sample count overflows or cannot be allocated.
    pub fn prepare(&mut self, channels: usize, max_frames: usize) -> Result<(), MixError> {
        let len = channels
            .checked_mul(max_frames)
            .ok_or(MixError::InvalidBlockSize(max_frames))?;
        self.data
            .try_reserve_exact(len.saturating_sub(self.data.len()))
            .map_err(|_| MixError::InvalidBlockSize(max_frames))?;
        self.data.resize(len, 0.0);
        self.channels = channels;
        self.max_frames = max_frames;
        self.prepared = true;
        Ok(())
    }

    /// Free the allocation. [`snapshot`](Self::snapshot) fails until the next
    /// [`prepare`](Self::prepare).
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.channels = 0;
        self.max_frames = 0;
        self.prepared = false;
    }

    /// Whether [`prepare`](Self::prepare) has been called since the last release.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Channel count negotiated at prepare time.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Maximum frames per channel negotiated at prepare time.
    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Samples currently allocated.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Copy `main` into the scratch storage and return a view sized to it.
    ///
    /// Fails without touching anything if `main` is larger than the prepared
    /// shape in either dimension.
    pub fn snapshot<B>(&mut self, main: &B) -> Result<DryView<'_>, MixError>
    where
        B: ChannelBuffer + ?Sized,
    {
        if !self.prepared {
            return Err(MixError::NotPrepared);
        }
        let frames = main.num_frames();
        let channels = main.num_channels();
        if frames > self.max_frames {
            return Err(MixError::BlockTooLarge {
                frames,
                max_frames: self.max_frames,
            });
        }
        if channels > self.channels {
            return Err(MixError::TooManyChannels {
                channels,
                max_channels: self.channels,
            });
        }

        let stride = self.max_frames;
        for c in 0..channels {
            let start = c * stride;
            self.data[start..start + frames].copy_from_slice(main.channel(c));
        }

        Ok(DryView {
            data: &mut self.data,
            stride,
            channels,
            frames,
        })
    }
}

/// Channel-aligned window into a [`DryBuffer`], sized to the current block.
pub struct DryView<'a> {
    data: &'a mut [f32],
    stride: usize,
    channels: usize,
    frames: usize,
}

impl ChannelBuffer for DryView<'_> {
    #[inline]
    fn num_channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn num_frames(&self) -> usize {
        self.frames
    }

    #[inline]
    fn channel(&self, index: usize) -> &[f32] {
        assert!(index < self.channels, "channel {index} out of range");
        let start = index * self.stride;
        &self.data[start..start + self.frames]
    }

    #[inline]
    fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        assert!(index < self.channels, "channel {index} out of range");
        let start = index * self.stride;
        &mut self.data[start..start + self.frames]
    }
}
