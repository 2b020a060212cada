use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::{Anchor, Opacity},
    error::{WatermarkError, WatermarkResult},
};

/// Placement and transparency applied to every target of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WatermarkSettings {
    pub anchor: Anchor,
    pub opacity: Opacity,
}

/// On-disk settings; every field is optional and falls back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub anchor: Option<Anchor>,
    #[serde(default)]
    pub opacity: Option<Opacity>,
}

impl WatermarkSettings {
    /// Parse a JSON settings document such as `{"anchor": "center", "opacity": 0.5}`.
    pub fn from_json_str(s: &str) -> WatermarkResult<Self> {
        let file: SettingsFile =
            serde_json::from_str(s).map_err(|e| WatermarkError::config(e.to_string()))?;
        Ok(Self::default().merged(file))
    }

    pub fn from_json_file(path: &Path) -> WatermarkResult<Self> {
        let f = File::open(path).map_err(|e| {
            WatermarkError::config(format!("open settings '{}': {e}", path.display()))
        })?;
        let file: SettingsFile = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            WatermarkError::config(format!("parse settings '{}': {e}", path.display()))
        })?;
        Ok(Self::default().merged(file))
    }

    /// Fields set in `overrides` win over `self`.
    pub fn merged(self, overrides: SettingsFile) -> Self {
        Self {
            anchor: overrides.anchor.unwrap_or(self.anchor),
            opacity: overrides.opacity.unwrap_or(self.opacity),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
