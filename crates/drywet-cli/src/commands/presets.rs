//! Preset listing and export.

use anyhow::Context;
use clap::Args;
use drywet_config::{Preset, factory_presets, get_factory_preset, list_user_presets};
use std::path::Path;

#[derive(Args)]
pub struct PresetsArgs {
    /// Write the named factory preset to PATH instead of listing
    #[arg(long, num_args = 2, value_names = ["NAME", "PATH"])]
    export: Option<Vec<String>>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.export.as_deref() {
        Some([name, path]) => export_preset(name, Path::new(path)),
        Some(_) => anyhow::bail!("--export takes a preset name and a path"),
        None => {
            list_presets();
            Ok(())
        }
    }
}

fn list_presets() {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        println!("  {}", describe(&preset));
    }
    println!();

    println!("User Presets:");
    println!("=============");
    let user_presets = list_user_presets();
    if user_presets.is_empty() {
        println!("  (none)");
    }
    for path in user_presets {
        match Preset::load(&path) {
            Ok(preset) => println!("  {}", describe(&preset)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable preset");
            }
        }
    }
}

fn describe(preset: &Preset) -> String {
    format!(
        "{:16} dry {:+6.1} dB  wet {:+6.1} dB  ramp {:5.1} ms  {}",
        preset.name,
        preset.mix.dry_gain_db,
        preset.mix.wet_gain_db,
        preset.mix.ramp_ms,
        preset.description.as_deref().unwrap_or("")
    )
}

fn export_preset(name: &str, path: &Path) -> anyhow::Result<()> {
    let preset =
        get_factory_preset(name).with_context(|| format!("no factory preset named '{name}'"))?;
    preset.save(path)?;
    println!("Exported '{}' to {}", preset.name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn export_writes_a_loadable_preset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blend.toml");
        export_preset("parallel_blend", &path).unwrap();

        let loaded = Preset::load(&path).unwrap();
        assert_eq!(Some(loaded), get_factory_preset("parallel_blend"));
    }

    #[test]
    fn export_unknown_name_fails() {
        let dir = TempDir::new().unwrap();
        assert!(export_preset("nope", &dir.path().join("x.toml")).is_err());
    }

    #[test]
    fn describe_includes_gains() {
        let line = describe(&Preset::new("Test").with_gains(-3.0, 1.5));
        assert!(line.contains("-3.0"));
        assert!(line.contains("+1.5"));
    }
}
