//! Offline rendering through the dry/wet processor.

use crate::effects::EffectKind;
use crate::wav::{Audio, read_wav, write_wav};
use anyhow::Context;
use clap::Args;
use drywet_config::{Preset, find_preset, get_factory_preset, validate_preset};
use drywet_core::{BusLayout, linear_to_db};
use drywet_plugin::create_plugin_with;
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset name, user preset name, or path to a TOML preset
    #[arg(short, long)]
    preset: Option<String>,

    /// Dry path gain in dB (overrides the preset)
    #[arg(long, allow_negative_numbers = true)]
    dry_db: Option<f32>,

    /// Wet path gain in dB (overrides the preset)
    #[arg(long, allow_negative_numbers = true)]
    wet_db: Option<f32>,

    /// Gain ramp in milliseconds (overrides the preset)
    #[arg(long)]
    ramp_ms: Option<f32>,

    /// Effect on the wet path
    #[arg(short, long, value_enum, default_value_t = EffectKind::Identity)]
    effect: EffectKind,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

/// Look a preset up as factory name, then user preset or file path.
fn resolve_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    let path = find_preset(name).with_context(|| format!("preset not found: {name}"))?;
    Ok(Preset::load(&path)?)
}

/// Preset named on the command line with gain and ramp overrides applied.
fn build_preset(args: &ProcessArgs) -> anyhow::Result<Preset> {
    let mut preset = match &args.preset {
        Some(name) => resolve_preset(name)?,
        None => Preset::new("command line"),
    };
    if let Some(db) = args.dry_db {
        preset.mix.dry_gain_db = db;
    }
    if let Some(db) = args.wet_db {
        preset.mix.wet_gain_db = db;
    }
    if let Some(ms) = args.ramp_ms {
        preset.mix.ramp_ms = ms;
    }
    validate_preset(&preset)?;
    Ok(preset)
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be at least 1");
    let preset = build_preset(&args)?;

    println!("Reading {}...", args.input.display());
    let mut audio = read_wav(&args.input)?;
    let num_channels = audio.channels.len();
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        audio.num_frames(),
        num_channels,
        audio.sample_rate,
        audio.duration_secs()
    );

    let layout = fit_layout(&preset, &mut audio)?;

    let mut plugin = create_plugin_with(args.effect.create());
    plugin.shared().load_settings(&preset.settings());
    plugin
        .prepare_with_layout(f64::from(audio.sample_rate), args.block_size, layout)
        .with_context(|| format!("cannot render {num_channels} channel(s) as {layout}"))?;

    println!(
        "Mixing with '{}': dry {:.1} dB, wet {:.1} dB, ramp {:.1} ms, effect {:?}",
        preset.name,
        preset.mix.dry_gain_db,
        preset.mix.wet_gain_db,
        preset.mix.ramp_ms,
        args.effect
    );

    let (input_rms, input_peak) = levels(&audio);
    render(&mut audio, args.block_size, |block| plugin.process(block))?;
    plugin.release();
    let (output_rms, output_peak) = levels(&audio);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output_rms),
        linear_to_db(output_peak)
    );

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, args.bit_depth)?;
    println!("Done!");

    Ok(())
}

/// Bus layout for `audio` under `preset`.
///
/// A preset pinned to a layout only accepts files with its input channel
/// count. Output channels beyond the input are added as silence.
fn fit_layout(preset: &Preset, audio: &mut Audio) -> anyhow::Result<BusLayout> {
    let channels = audio.channels.len();
    let layout = preset.bus_layout_for(channels);
    anyhow::ensure!(
        layout.input_channels == channels,
        "preset '{}' expects {} input channel(s), file has {channels}",
        preset.name,
        layout.input_channels
    );
    let frames = audio.num_frames();
    audio.channels.resize(layout.output_channels.max(channels), vec![0.0; frames]);
    Ok(layout)
}

/// Run `process` over `audio` in place, `block_size` frames at a time.
///
/// The final block may be shorter.
fn render<F, E>(audio: &mut Audio, block_size: usize, mut process: F) -> anyhow::Result<()>
where
    F: FnMut(&mut [&mut [f32]]) -> Result<(), E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let frames = audio.num_frames();
    let mut start = 0;
    while start < frames {
        let end = (start + block_size).min(frames);
        let mut block: Vec<&mut [f32]> = audio
            .channels
            .iter_mut()
            .map(|ch| &mut ch[start..end])
            .collect();
        process(&mut block[..])
            .with_context(|| format!("processing failed at frame {start}"))?;
        start = end;
    }
    tracing::debug!(frames, block_size, "render finished");
    Ok(())
}

/// RMS and peak over all channels.
fn levels(audio: &Audio) -> (f32, f32) {
    let count = audio.channels.iter().map(Vec::len).sum::<usize>();
    if count == 0 {
        return (0.0, 0.0);
    }
    let samples = audio.channels.iter().flatten();
    let sum: f32 = samples.clone().map(|s| s * s).sum();
    let peak = samples.map(|s| s.abs()).fold(0.0, f32::max);
    ((sum / count as f32).sqrt(), peak)
}
