//! Configuration file support for Pillarplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pillarplan/config.toml`.

use crate::types::Preferences;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub preferences: Preferences,

    #[serde(default)]
    pub library: LibraryConfig,
}

/// Content library configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct LibraryConfig {
    /// Path to a JSON library file; absent means the built-in starter content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("pillarplan").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mode, Pillar};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.preferences.week_length.is_none());
        assert!(config.library.path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[preferences]
week_length = 8
max_duration_min = 30
default_mode = "short"
pillars = ["strength", "mobility"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.preferences.week_length, Some(8));
        assert_eq!(config.preferences.max_duration_min, Some(30));
        assert_eq!(config.preferences.default_mode, Some(Mode::Short));
        assert_eq!(
            config.preferences.pillars,
            Some(vec![Pillar::Strength, Pillar::Mobility])
        );
        assert!(config.preferences.days_per_week.is_none()); // default
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.preferences.days_per_week = Some(4);
        config.library.path = Some(PathBuf::from("/tmp/library.json"));
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.preferences.days_per_week, Some(4));
        assert_eq!(
            parsed.library.path,
            Some(PathBuf::from("/tmp/library.json"))
        );
    }
}
