//! Configuration management for awsorg
//!
//! The config file is optional. Every setting in it can be overridden by a
//! CLI flag or environment variable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// AWS profile used when `--profile` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    /// Maximum cache age, e.g. `12h` or `2d`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<String>,

    /// AWS region for the Organizations endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Friendly display names keyed by profile
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profile_names: BTreeMap<String, String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;

        Ok(config_dir.join("awsorg").join("config.yaml"))
    }

    /// Load configuration from a custom path, or the default one.
    ///
    /// A missing file is not an error; it yields the default configuration.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path()?,
        };

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Friendly name configured for a profile, if any
    pub fn display_name_for(&self, profile: &str) -> Option<&str> {
        self.profile_names.get(profile).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.default_profile.is_none());
        assert!(config.cache_age.is_none());
        assert!(config.region.is_none());
        assert!(config.profile_names.is_empty());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yaml");

        let config = Config::load_at(path.to_str()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            "default_profile: prod\ncache_age: 12h\nregion: eu-west-1\nprofile_names:\n  prod: Production\n  dev: Development\n",
        )
        .unwrap();

        let config = Config::load_at(path.to_str()).unwrap();

        assert_eq!(config.default_profile.as_deref(), Some("prod"));
        assert_eq!(config.cache_age.as_deref(), Some("12h"));
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.display_name_for("prod"), Some("Production"));
        assert_eq!(config.display_name_for("staging"), None);
    }

    #[test]
    fn test_partial_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "default_profile: dev\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("dev"));
        assert!(config.profile_names.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "profile_names: [unterminated").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(ConfigError::ParseError(_))) => (),
            other => panic!("Expected ConfigError::ParseError, got {:?}", other),
        }
    }
}
