//! Platform-specific paths for presets and configuration.
//!
//! - **User presets**: `~/.config/drywet/presets/` (Linux),
//!   `~/Library/Application Support/drywet/presets/` (macOS),
//!   `%APPDATA%\drywet\presets\` (Windows)
//! - **System presets**: `/usr/share/drywet/presets/` (Linux),
//!   `/Library/Application Support/drywet/presets/` (macOS)
//!
//! ```rust,no_run
//! use drywet_config::paths;
//!
//! if let Some(path) = paths::find_preset("vocal_blend") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "drywet";

const PRESETS_SUBDIR: &str = "presets";

/// User-specific presets directory.
///
/// Falls back to `./drywet/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// User-specific configuration directory.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// System-wide, usually read-only, presets directory.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by path or name.
///
/// An existing file path wins. Otherwise `name` (with `.toml` appended if
/// missing) is looked up in the user presets directory, then the system one.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    [user_presets_dir(), system_presets_dir()]
        .into_iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    ensure_dir(user_presets_dir())
}

/// Create the user config directory if needed and return it.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    ensure_dir(user_config_dir())
}

/// Preset files in the user presets directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Preset files in the system presets directory.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// User presets followed by system presets. Duplicates are kept.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_user_presets();
    presets.extend(list_system_presets());
    presets
}

/// `.toml` files in `dir`, sorted. Empty if the directory is missing or
/// unreadable.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// File stem of a preset path.
///
/// ```rust
/// use drywet_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/vocal_blend.toml"));
/// assert_eq!(name, Some("vocal_blend".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dirs_use_app_name() {
        assert!(user_config_dir().to_string_lossy().contains(APP_NAME));
        assert!(user_presets_dir().ends_with(PRESETS_SUBDIR));
        assert!(system_presets_dir().to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        assert_eq!(find_preset(preset_path.to_str().unwrap()), Some(preset_path));
    }

    #[test]
    fn test_find_preset_not_found() {
        assert!(find_preset("nonexistent_drywet_preset_12345").is_none());
    }

    #[test]
    fn test_list_presets_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("dir.toml")).unwrap();

        let presets = list_presets_in_dir(temp_dir.path());
        let names: Vec<_> = presets.iter().filter_map(|p| preset_name_from_path(p)).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_list_presets_missing_dir() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/drywet/12345")).is_empty());
    }

    #[test]
    fn test_preset_name_from_path() {
        assert_eq!(
            preset_name_from_path(Path::new("simple.toml")),
            Some("simple".to_string())
        );
        assert_eq!(preset_name_from_path(Path::new("")), None);
    }
}
