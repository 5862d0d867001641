//! Settings file discovery.
//!
//! Lookup order: `--config`, then `$LUDOTECA_CONFIG` (both handled by clap),
//! then the platform default:
//! - Linux: `~/.config/ludoteca/settings.json`
//! - Windows: `%APPDATA%/ludoteca/settings.json`

use std::path::{Path, PathBuf};

use anyhow::Context;
use ludoteca_settings::Settings;
use tracing::{debug, warn};

pub const ENV_CONFIG: &str = "LUDOTECA_CONFIG";

/// Loads the settings.
///
/// An explicit path must exist. The default path is optional; when it is
/// missing or unreadable the defaults are used.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    if let Some(path) = explicit {
        return Settings::load(path)
            .with_context(|| format!("cannot read settings file {}", path.display()));
    }

    let path = config_path();
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    match Settings::load(&path) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            warn!(error = %e, "failed to load settings, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Returns the platform-specific settings file path.
pub fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("ludoteca").join("settings.json")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("ludoteca")
            .join("settings.json")
    }
}
