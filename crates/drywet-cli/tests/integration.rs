//! Integration tests for the `drywet` binary.
//!
//! Each test writes WAV input with hound, runs the binary, and inspects the
//! rendered output.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn drywet_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_drywet"))
}

fn write_float_wav(path: &Path, channels: u16, samples: &[f32]) {
    let spec = WavSpec {
        channels,
        sample_rate: 48000,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

fn read_float_wav(path: &Path) -> (WavSpec, Vec<f32>) {
    let reader = WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.into_samples::<f32>().map(Result::unwrap).collect();
    (spec, samples)
}

#[test]
fn process_identity_doubles_stereo_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");

    // Interleaved L/R: left 0.25, right -0.125
    let samples: Vec<f32> = (0..2000).map(|i| if i % 2 == 0 { 0.25 } else { -0.125 }).collect();
    write_float_wav(&input, 2, &samples);

    let status = drywet_bin()
        .args(["process", input.to_str().unwrap(), output.to_str().unwrap()])
        .args(["--block-size", "300"])
        .status()
        .unwrap();
    assert!(status.success());

    let (spec, rendered) = read_float_wav(&output);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(rendered.len(), samples.len());
    for (i, (&out, &inp)) in rendered.iter().zip(&samples).enumerate() {
        assert_eq!(out, 2.0 * inp, "sample {i}");
    }
}

#[test]
fn process_invert_at_unity_cancels() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_float_wav(&input, 1, &vec![0.5; 512]);

    let status = drywet_bin()
        .args(["process", input.to_str().unwrap(), output.to_str().unwrap()])
        .args(["--effect", "invert"])
        .status()
        .unwrap();
    assert!(status.success());

    let (_, rendered) = read_float_wav(&output);
    assert!(rendered.iter().all(|&s| s == 0.0));
}

#[test]
fn process_dry_only_preset_ignores_mute() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_float_wav(&input, 1, &vec![0.3; 256]);

    let status = drywet_bin()
        .args(["process", input.to_str().unwrap(), output.to_str().unwrap()])
        .args(["--preset", "dry_only", "--effect", "mute"])
        .status()
        .unwrap();
    assert!(status.success());

    let (_, rendered) = read_float_wav(&output);
    assert!(rendered.iter().all(|&s| s == 0.3));
}

#[test]
fn process_writes_pcm_when_asked() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_float_wav(&input, 1, &vec![0.1; 64]);

    let status = drywet_bin()
        .args(["process", input.to_str().unwrap(), output.to_str().unwrap()])
        .args(["--bit-depth", "16", "--wet-db", "-60"])
        .status()
        .unwrap();
    assert!(status.success());

    let reader = WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.spec().sample_format, SampleFormat::Int);
}

#[test]
fn process_rejects_out_of_range_gain() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_float_wav(&input, 1, &[0.0; 16]);

    let result = drywet_bin()
        .args(["process", input.to_str().unwrap(), output.to_str().unwrap()])
        .args(["--dry-db", "30"])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn process_honours_preset_layout() {
    let dir = TempDir::new().unwrap();
    let preset = dir.path().join("stereo_only.toml");
    std::fs::write(
        &preset,
        r#"
name = "Stereo Only"

[mix]
wet_gain_db = -60.0

[layout]
input_channels = 2
output_channels = 2
"#,
    )
    .unwrap();

    let mono = dir.path().join("mono.wav");
    let refused = dir.path().join("refused.wav");
    write_float_wav(&mono, 1, &[0.5; 64]);
    let result = drywet_bin()
        .args(["process", mono.to_str().unwrap(), refused.to_str().unwrap()])
        .args(["--preset", preset.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(!refused.exists());

    let stereo = dir.path().join("stereo.wav");
    let output = dir.path().join("out.wav");
    write_float_wav(&stereo, 2, &[0.5; 128]);
    let status = drywet_bin()
        .args(["process", stereo.to_str().unwrap(), output.to_str().unwrap()])
        .args(["--preset", preset.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let (spec, rendered) = read_float_wav(&output);
    assert_eq!(spec.channels, 2);
    assert!(rendered.iter().all(|&s| s == 0.5));
}

#[test]
fn process_rejects_unsupported_channel_count() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_float_wav(&input, 4, &[0.0; 64]);

    let result = drywet_bin()
        .args(["process", input.to_str().unwrap(), output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!result.status.success());
}

#[test]
fn presets_lists_factory_presets() {
    let output = drywet_bin().arg("presets").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["Unity", "Dry Only", "Wet Only", "Parallel Blend"] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn presets_export_writes_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unity.toml");

    let status = drywet_bin()
        .args(["presets", "--export", "unity", path.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("name = \"Unity\""));
    assert!(content.contains("[mix]"));
}
