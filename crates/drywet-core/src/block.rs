//! Borrowed multi-channel sample views.
//!
//! [`AudioBlock`] wraps the per-channel slices a host hands over for one
//! process call. [`ChannelBuffer`] is the common interface shared with the
//! engine's own scratch views so that gain stages and summing work on either.

use crate::error::MixError;

/// Per-channel access to a block of `f32` samples with a uniform frame count.
pub trait ChannelBuffer {
    /// Number of channels.
    fn num_channels(&self) -> usize;

    /// Frames (samples per channel).
    fn num_frames(&self) -> usize;

    /// Samples of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    fn channel(&self, index: usize) -> &[f32];

    /// Mutable samples of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    fn channel_mut(&mut self, index: usize) -> &mut [f32];
}

/// A view over host-owned channel slices, valid for one process call.
///
/// All channels have the same length; [`AudioBlock::new`] rejects ragged input.
///
/// ```rust
/// use drywet_core::{AudioBlock, ChannelBuffer};
///
/// let mut left = [0.5_f32; 64];
/// let mut right = [0.25_f32; 64];
/// let mut channels = [&mut left[..], &mut right[..]];
/// let block = AudioBlock::new(&mut channels).unwrap();
/// assert_eq!(block.num_channels(), 2);
/// assert_eq!(block.num_frames(), 64);
/// ```
pub struct AudioBlock<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    frames: usize,
}

impl<'a, 'b> AudioBlock<'a, 'b> {
    /// Wrap a set of equally long channel slices.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> Result<Self, MixError> {
        let expected = channels.first().map_or(0, |ch| ch.len());
        if let Some((channel, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != expected)
        {
            return Err(MixError::RaggedBlock {
                channel,
                frames: ch.len(),
                expected,
            });
        }
        Ok(Self {
            channels,
            frames: expected,
        })
    }

    /// Zero one channel.
    pub fn clear_channel(&mut self, index: usize) {
        self.channels[index].fill(0.0);
    }

    /// Zero every channel.
    pub fn clear(&mut self) {
        for ch in self.channels.iter_mut() {
            ch.fill(0.0);
        }
    }

    /// Multiply every sample by `gain`.
    pub fn scale(&mut self, gain: f32) {
        for ch in self.channels.iter_mut() {
            for sample in ch.iter_mut() {
                *sample *= gain;
            }
        }
    }

    /// Iterate mutably over the channels.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(|ch| &mut **ch)
    }
}

impl ChannelBuffer for AudioBlock<'_, '_> {
    #[inline]
    fn num_channels(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    fn num_frames(&self) -> usize {
        self.frames
    }

    #[inline]
    fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index][..]
    }

    #[inline]
    fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index][..]
    }
}

/// Adds `src` into `dst` sample by sample (`dst[c][n] += src[c][n]`).
///
/// Only the overlapping channels and frames are touched.
pub fn accumulate<D, S>(dst: &mut D, src: &S)
where
    D: ChannelBuffer + ?Sized,
    S: ChannelBuffer + ?Sized,
{
    let channels = dst.num_channels().min(src.num_channels());
    for c in 0..channels {
        for (out, dry) in dst.channel_mut(c).iter_mut().zip(src.channel(c)) {
            *out += *dry;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_channels() {
        let mut a = [0.0_f32; 8];
        let mut b = [0.0_f32; 7];
        let mut channels = [&mut a[..], &mut b[..]];
        let err = AudioBlock::new(&mut channels).err();
        assert_eq!(
            err,
            Some(MixError::RaggedBlock {
                channel: 1,
                frames: 7,
                expected: 8
            })
        );
    }

    #[test]
    fn empty_block() {
        let mut channels: [&mut [f32]; 0] = [];
        let block = AudioBlock::new(&mut channels).unwrap();
        assert_eq!(block.num_channels(), 0);
        assert_eq!(block.num_frames(), 0);
    }

    #[test]
    fn clear_and_scale() {
        let mut a = [1.0_f32; 4];
        let mut b = [2.0_f32; 4];
        {
            let mut channels = [&mut a[..], &mut b[..]];
            let mut block = AudioBlock::new(&mut channels).unwrap();
            block.scale(0.5);
            block.clear_channel(1);
        }
        assert_eq!(a, [0.5; 4]);
        assert_eq!(b, [0.0; 4]);
    }

    #[test]
    fn accumulate_sums_overlap() {
        let mut a = [1.0_f32; 4];
        let mut b = [2.0_f32; 4];
        let mut c = [3.0_f32; 4];
        {
            let mut dst_channels = [&mut a[..], &mut b[..]];
            let mut dst = AudioBlock::new(&mut dst_channels).unwrap();
            let mut src_channels = [&mut c[..]];
            let src = AudioBlock::new(&mut src_channels).unwrap();
            accumulate(&mut dst, &src);
        }
        assert_eq!(a, [4.0; 4]);
        assert_eq!(b, [2.0; 4]);
    }

    #[test]
    fn accumulate_keeps_tiny_values() {
        let input = [1e-21_f32, -4e-21, 1e-40, 0.5];
        let mut out = input;
        let mut dry = input;
        {
            let mut dst_channels = [&mut out[..]];
            let mut dst = AudioBlock::new(&mut dst_channels).unwrap();
            let mut src_channels = [&mut dry[..]];
            let src = AudioBlock::new(&mut src_channels).unwrap();
            accumulate(&mut dst, &src);
        }
        for (&o, &x) in out.iter().zip(&input) {
            assert_eq!(o, 2.0 * x);
        }
        assert_ne!(out[2], 0.0);
    }
}
