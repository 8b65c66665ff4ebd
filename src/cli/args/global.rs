//! Global CLI options shared across all commands
//!
//! This module provides a centralized struct for global CLI options so that
//! command handlers take one argument instead of a long parameter list.

use crate::cli::{CacheAge, Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file defaults are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// AWS profile, also the cache key
    pub profile: Option<String>,

    /// Friendly name for the profile
    pub profile_name: Option<String>,

    /// Maximum cache age before a rebuild
    pub cache_age: Option<CacheAge>,

    /// AWS region override
    pub region: Option<String>,

    /// Custom config file path (defaults to ~/.config/awsorg/config.yaml)
    pub config: Option<String>,

    /// Custom cache directory (defaults to ~/.config/awsorg/cache)
    pub cache_dir: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            profile: cli.profile.clone(),
            profile_name: cli.profile_name.clone(),
            cache_age: cli.cache_age,
            region: cli.region.clone(),
            config: cli.config.clone(),
            cache_dir: cli.cache_dir.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get cache dir override as `Option<&str>`.
    pub fn cache_dir_ref(&self) -> Option<&str> {
        self.cache_dir.as_deref()
    }
}
