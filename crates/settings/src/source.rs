//! Reading settings from disk.
//!
//! Settings files are JSON, or TOML when the file name ends in `.toml`. Both
//! formats describe the same document; TOML tables map to JSON objects.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::settings::Settings;

/// Errors from reading or parsing a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Syntax of a settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Picks the format from the file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

impl Settings {
    /// Parses a settings document, failing on syntax errors.
    ///
    /// Values inside a well-formed document are still resolved leniently.
    pub fn parse(text: &str, format: Format) -> Result<Self, SettingsError> {
        let value: Value = match format {
            Format::Json => serde_json::from_str(text)?,
            Format::Toml => toml::from_str(text)?,
        };
        Ok(Self::from_value(&value))
    }

    /// Loads settings from a file.
    ///
    /// A missing or unreadable file is an error. A file that is not valid for
    /// its format resolves to the defaults with a warning.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        match Self::parse(&text, Format::from_path(path)) {
            Ok(settings) => {
                debug!(path = %path.display(), "settings loaded");
                Ok(settings)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unusable settings file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
