//! WAV reading and writing with per-channel sample buffers.

use anyhow::Context;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Decoded audio, one `Vec` per channel.
#[derive(Debug, Clone)]
pub struct Audio {
    /// Per-channel samples, all the same length.
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Audio {
    /// Frames per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / f64::from(self.sample_rate)
    }
}

/// Read a WAV file and split its interleaved samples into channels.
///
/// Integer samples are scaled to `-1.0..1.0`.
pub fn read_wav(path: &Path) -> anyhow::Result<Audio> {
    let reader =
        WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let num_channels = usize::from(spec.channels);

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / num_channels.max(1);
    let mut channels = vec![Vec::with_capacity(frames); num_channels];
    for frame in interleaved.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(Audio {
        channels,
        sample_rate: spec.sample_rate,
    })
}

/// Interleave `audio` and write it as a WAV file.
///
/// 32-bit output is IEEE float; 16 and 24 bit are PCM with clipping.
pub fn write_wav(path: &Path, audio: &Audio, bits_per_sample: u16) -> anyhow::Result<()> {
    anyhow::ensure!(
        matches!(bits_per_sample, 16 | 24 | 32),
        "unsupported bit depth {bits_per_sample} (expected 16, 24 or 32)"
    );
    let channels = u16::try_from(audio.channels.len()).context("too many channels")?;

    let spec = WavSpec {
        channels,
        sample_rate: audio.sample_rate,
        bits_per_sample,
        sample_format: if bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let max_val = (1i64 << (bits_per_sample - 1)) as f32;
    for n in 0..audio.num_frames() {
        for channel in &audio.channels {
            let sample = channel[n];
            if bits_per_sample == 32 {
                writer.write_sample(sample)?;
            } else {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}
