//! Configuration for the hsla preview.
//!
//! Settings are stored as TOML in the platform config directory. Every field
//! has a default, so a missing file or a partial file is fine.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use hsla_core::Hsla;
use serde::{Deserialize, Serialize};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
            ConfigError::Serialize(e) => write!(f, "could not serialize config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between two updates.
    pub tick_interval_ms: u64,
    /// Degrees added to the hue on every tick.
    pub hue_step: f64,
    /// Added to saturation on every tick.
    pub saturation_step: f64,
    /// Added to lightness on every tick.
    pub lightness_step: f64,
    /// Start animating as soon as the preview opens.
    pub autostart: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 60,
            hue_step: 3.0,
            saturation_step: 0.0,
            lightness_step: 0.0,
            autostart: true,
        }
    }
}

impl AnimationConfig {
    /// The tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Apply one tick worth of change to `color`.
    pub fn step(&self, color: Hsla) -> Hsla {
        color
            .rotate_hue(self.hue_step)
            .saturate(self.saturation_step)
            .lighten(self.lightness_step)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color shown when the preview starts.
    pub color: Hsla,
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: Hsla::opaque(0.0, 1.0, 0.5),
            animation: AnimationConfig::default(),
        }
    }
}

/// Project directories for the application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "hsla", "hsla")
}

/// Default location of the config file, if the platform has one.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// platform has no config directory or the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = toml::from_str(&contents)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.animation.tick_interval(), Duration::from_millis(60));
        assert_eq!(config.color, Hsla::opaque(0.0, 1.0, 0.5));
        assert!(config.animation.autostart);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            color = "hsla(200, 50%, 40%, 1)"

            [animation]
            hue_step = -2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.color, Hsla::opaque(200.0, 0.5, 0.4));
        assert_eq!(config.animation.hue_step, -2.5);
        assert_eq!(config.animation.tick_interval_ms, 60);
        assert!(config.animation.autostart);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "color = \"blue\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            color: Hsla::new(120.0, 0.5, 0.25, 1.0),
            animation: AnimationConfig {
                tick_interval_ms: 30,
                hue_step: 10.0,
                autostart: false,
                ..Default::default()
            },
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_saved_color_reloads_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        // 0.7904 prints as 79.03999999999999%, which a neighbouring value shares.
        let config = Config {
            color: Hsla::new(123.456789, 0.7904, 0.49543508709194095, 0.3),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().color, config.color);
    }

    #[test]
    fn test_step() {
        let animation = AnimationConfig {
            hue_step: 90.0,
            saturation_step: -0.5,
            lightness_step: 0.25,
            ..Default::default()
        };
        let next = animation.step(Hsla::opaque(300.0, 1.0, 0.5));
        assert_eq!(next, Hsla::opaque(30.0, 0.5, 0.75));
    }
}
