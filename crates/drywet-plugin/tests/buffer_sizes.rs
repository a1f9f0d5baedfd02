//! Buffer size robustness tests for the drywet processor.
//!
//! Verifies that the processor handles every block size from 1 to 4096
//! frames without panics, NaN or infinity, that re-preparing for a new size
//! keeps the signal intact, and that parameter changes land on block
//! boundaries, including when written from another thread.

use drywet_core::{AudioBlock, Identity, db_to_linear, from_fn};
use drywet_plugin::{PluginError, create_plugin, create_plugin_with};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

const BUFFER_SIZES: &[usize] = &[1, 2, 7, 32, 64, 128, 256, 512, 1024, 2048, 4096];
const SAMPLE_RATE: f64 = 48000.0;

fn is_finite_buffer(buf: &[f32]) -> bool {
    buf.iter().all(|s| s.is_finite())
}

fn test_signal(size: usize) -> Vec<f32> {
    (0..size).map(|i| (i as f32 * 0.1).sin() * 0.5).collect()
}

#[test]
fn all_buffer_sizes_stereo() {
    for &size in BUFFER_SIZES {
        let mut plugin = create_plugin();
        plugin.prepare(SAMPLE_RATE, size, 2).unwrap();

        let input = test_signal(size);
        let mut left = input.clone();
        let mut right = input.clone();
        plugin.process(&mut [&mut left[..], &mut right[..]]).unwrap();

        assert!(
            is_finite_buffer(&left) && is_finite_buffer(&right),
            "non-finite output at buffer size {size}"
        );
        for (n, &x) in input.iter().enumerate() {
            assert_eq!(left[n], 2.0 * x, "size {size} frame {n}");
        }
    }
}

#[test]
fn growing_block_size_by_reprepare() {
    let mut plugin = create_plugin();
    for &size in BUFFER_SIZES {
        plugin.prepare(SAMPLE_RATE, size, 1).unwrap();
        let mut samples = test_signal(size);
        plugin.process(&mut [&mut samples[..]]).unwrap();
        assert!(is_finite_buffer(&samples), "buffer size {size}");
    }
}

#[test]
fn buffer_size_1_repeated() {
    let mut plugin = create_plugin_with(from_fn(|b: &mut AudioBlock<'_, '_>| b.scale(0.5)));
    plugin.prepare(SAMPLE_RATE, 1, 2).unwrap();
    plugin.shared().set_value(0, -12.0);

    for i in 0..1000 {
        let x = (i as f32 * 0.05).sin() * 0.5;
        let mut left = [x];
        let mut right = [x];
        plugin.process(&mut [&mut left[..], &mut right[..]]).unwrap();
        assert!(
            left[0].is_finite() && right[0].is_finite(),
            "non-finite output at single-sample iteration {i}"
        );
    }
    assert!(!plugin.engine().dry_gain().is_smoothing());
}

#[test]
fn block_larger_than_prepared_is_refused() {
    let mut plugin = create_plugin();
    plugin.prepare(SAMPLE_RATE, 256, 2).unwrap();

    let mut left = test_signal(512);
    let mut right = test_signal(512);
    let err = plugin
        .process(&mut [&mut left[..], &mut right[..]])
        .unwrap_err();
    assert!(matches!(err, PluginError::Mix(_)));
    assert_eq!(left, test_signal(512));
}

#[test]
fn parameter_change_applies_at_next_block() {
    let mut plugin = create_plugin_with(Identity);
    plugin.prepare(SAMPLE_RATE, 64, 1).unwrap();
    let control = plugin.shared().clone();

    let mut first = vec![1.0_f32; 64];
    plugin.process(&mut [&mut first[..]]).unwrap();
    assert!(first.iter().all(|&s| s == 2.0));

    control.set_value(2, 0.0);
    control.set_value(1, -60.0);

    let mut second = vec![1.0_f32; 64];
    plugin.process(&mut [&mut second[..]]).unwrap();
    assert!(second.iter().all(|&s| s == 1.0), "wet muted from frame 0");
}

#[test]
fn concurrent_writes_land_between_blocks() {
    const FRAMES: usize = 64;
    const MAX_BLOCKS: usize = 200_000;

    let mut plugin = create_plugin_with(Identity);
    let control = plugin.shared().clone();
    control.set_value(2, 0.0);
    plugin.prepare(SAMPLE_RATE, FRAMES, 1).unwrap();

    let loud = 2.0_f32;
    let quiet = 1.0 + db_to_linear(-6.0);
    let done = AtomicBool::new(false);

    let (levels, bad_block) = thread::scope(|s| {
        s.spawn(|| {
            let mut wet_db = 0.0;
            while !done.load(Ordering::Acquire) {
                wet_db = if wet_db == 0.0 { -6.0 } else { 0.0 };
                control.set_value(1, wet_db);
                thread::yield_now();
            }
        });

        let mut levels = Vec::new();
        let mut bad_block = None;
        for block in 0..MAX_BLOCKS {
            let mut samples = vec![1.0_f32; FRAMES];
            if plugin.process(&mut [&mut samples[..]]).is_err()
                || samples.iter().any(|&x| x != samples[0])
            {
                bad_block = Some(block);
                break;
            }
            if !levels.contains(&samples[0]) {
                levels.push(samples[0]);
            }
            if levels.len() > 2 || (levels.contains(&loud) && levels.contains(&quiet)) {
                break;
            }
        }
        done.store(true, Ordering::Release);
        (levels, bad_block)
    });

    assert_eq!(bad_block, None, "gain changed inside a block");
    assert_eq!(levels.len(), 2, "levels seen: {levels:?}");
    assert!(levels.contains(&loud) && levels.contains(&quiet));
}

#[test]
fn bypass_toggles_between_blocks() {
    let mut plugin = create_plugin();
    plugin.prepare(SAMPLE_RATE, 32, 2).unwrap();
    let control = plugin.shared().clone();

    control.set_bypassed(true);
    let mut left = vec![0.25_f32; 32];
    let mut right = vec![0.25_f32; 32];
    plugin.process(&mut [&mut left[..], &mut right[..]]).unwrap();
    assert!(left.iter().chain(right.iter()).all(|&s| s == 0.25));

    control.set_bypassed(false);
    plugin.process(&mut [&mut left[..], &mut right[..]]).unwrap();
    assert!(left.iter().chain(right.iter()).all(|&s| s == 0.5));
}
