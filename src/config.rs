//! Demo configuration persistence.
//!
//! Stores demo settings (canvas size, asset paths, screenshot output) as
//! JSON at `~/.local/share/sprite-sim/config.json`. Loaded once on startup;
//! saved on change so the file is always current. CLI flags override
//! whatever was loaded.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file path.
fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sprite-sim")
        .join("config.json")
}

/// Persisted demo settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_width")]
    pub canvas_width: u32,
    #[serde(default = "default_height")]
    pub canvas_height: u32,
    /// Button sprite sheet (four states stacked vertically).
    #[serde(default)]
    pub sprite_sheet: Option<PathBuf>,
    /// TTF font for rendered-text textures.
    #[serde(default)]
    pub font_file: Option<PathBuf>,
    #[serde(default = "default_screenshot")]
    pub screenshot: PathBuf,
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_screenshot() -> PathBuf { PathBuf::from("screenshot.png") }

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_width(),
            canvas_height: default_height(),
            sprite_sheet: None,
            font_file: None,
            screenshot: default_screenshot(),
            path: default_path(),
        }
    }
}

impl DemoConfig {
    /// Load from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = default_path();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        config.path = path;
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(&self.path, json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_lesson_canvas() {
        let config = DemoConfig::default();
        assert_eq!(config.canvas_width, 640);
        assert_eq!(config.canvas_height, 480);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: DemoConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.canvas_width, 640);
        assert!(config.sprite_sheet.is_none());
    }
}
