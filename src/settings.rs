//! Runtime preferences
//!
//! Loaded from a JSON file next to the binary. Every field has a default,
//! so a missing or partial file never blocks startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Host-facing preferences; the simulation itself is tuned in [`crate::consts`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width, px
    pub window_width: u32,
    /// Viewport height, px
    pub window_height: u32,
    /// Dead-zone margin: how close to a viewport edge the player may get
    /// before the camera scrolls
    pub scroll_margin: u32,
    /// Level file consumed by the demo binary
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1000,
            window_height: 800,
            scroll_margin: 200,
            level: "assets/levels/level_1.txt".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!(
                        "ignoring malformed settings file {}: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current settings out as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"scroll_margin": 150}"#).unwrap();
        assert_eq!(settings.scroll_margin, 150);
        assert_eq!(settings.window_width, 1000);
        assert_eq!(settings.window_height, 800);
    }

    #[test]
    fn test_roundtrip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, settings.level);
        assert_eq!(back.window_width, settings.window_width);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(settings.window_width, 1000);
    }
}
