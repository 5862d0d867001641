//! Theme resolution.

use std::collections::BTreeMap;

use crate::settings::ThemeSettings;

/// The palette and gradients in effect for a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTheme {
    pub variant: String,
    pub palette: BTreeMap<String, String>,
    pub gradients: BTreeMap<String, String>,
}

impl ThemeSettings {
    /// Resolves the theme for `requested`, or for the configured variant.
    ///
    /// Unknown variants fall back to the configured one. The top-level
    /// palette and gradients override the preset values key by key.
    pub fn resolve(&self, requested: Option<&str>) -> ActiveTheme {
        let variant = requested
            .map(str::trim)
            .filter(|v| self.presets.contains_key(*v))
            .unwrap_or(self.variant.as_str());

        let mut palette = BTreeMap::new();
        let mut gradients = BTreeMap::new();
        if let Some(preset) = self.presets.get(variant) {
            palette.extend(preset.palette.clone());
            gradients.extend(preset.gradients.clone());
        }
        palette.extend(self.palette.clone());
        gradients.extend(self.gradients.clone());

        ActiveTheme {
            variant: variant.to_string(),
            palette,
            gradients,
        }
    }

    /// Names of the configured presets, sorted.
    pub fn available(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }
}
