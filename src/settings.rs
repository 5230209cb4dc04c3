//! Demo settings with persistence
//!
//! Settings are saved to `~/.config/strider/controller.toml` unless a path is
//! given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strider_game::ControllerConfig;
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub demo: DemoSettings,
    pub controller: ControllerConfig,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("strider"))
    }

    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("controller.toml"))
    }

    /// The explicit `path`, or the default location
    fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
        match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load settings from `path` (or the default location), falling back to
    /// defaults when missing or invalid
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = Self::resolve_path(path) else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse and validate a settings document
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.controller.validate()?;
        Ok(settings)
    }

    /// Save settings to `path` (or the default location), the same file
    /// [`Settings::load`] reads
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let Some(path) = Self::resolve_path(path) else {
            anyhow::bail!("Could not determine config directory");
        };

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless demo run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Frames to simulate
    pub frames: u32,
    /// Simulated render frame time in seconds
    pub frame_time: f32,
    /// Log the character state every this many frames
    pub log_every: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frames: 240,
            frame_time: 1.0 / 60.0,
            log_every: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_settings() {
        let settings = Settings::parse(
            r#"
            [demo]
            frames = 10

            [controller.movement]
            walk_speed = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.demo.frames, 10);
        assert_eq!(settings.demo.log_every, 30);
        assert_eq!(settings.controller.movement.walk_speed, 2.0);
        assert_eq!(settings.controller.movement.sprint_speed, 7.0);
    }

    #[test]
    fn test_parse_rejects_invalid_controller() {
        let result = Settings::parse(
            r#"
            [controller.animation]
            damp_time = 0.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_save_then_load_same_path() {
        let dir = std::env::temp_dir().join(format!("strider-settings-{}", std::process::id()));
        let path = dir.join("nested").join("controller.toml");

        let mut settings = Settings::default();
        settings.demo.frames = 17;
        settings.controller.camera.max_pitch = 20.0;
        settings.save(Some(&path)).unwrap();

        let loaded = Settings::load(Some(&path));
        assert_eq!(loaded.demo.frames, 17);
        assert_eq!(loaded.controller.camera.max_pitch, 20.0);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/strider/controller.toml")));
        assert_eq!(settings.demo.frames, 240);
    }
}
