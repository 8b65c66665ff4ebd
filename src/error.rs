//! Error types for the awsorg CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for awsorg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No root or organizational unit matches '{0}'")]
    UnitNotFound(String),
}

/// Failures talking to the AWS Organizations API.
///
/// Authentication, network and throttling failures are not distinguished;
/// the SDK's message is carried through for the user.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{operation} failed: {message}")]
    Sdk { operation: String, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Failed to create AWS client: {0}")]
    Connect(String),
}

impl RemoteError {
    pub fn sdk(operation: &str, message: impl Into<String>) -> Self {
        RemoteError::Sdk {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

/// Cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache file {} is corrupt: {message}. Run `awsorg refresh` to rebuild it.", .path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Invalid profile name '{0}': use letters, digits, '-', '_' or '.' (max 64 characters, not starting with '.')"
    )]
    InvalidProfileKey(String),

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Invalid cache age '{0}': expected a number of hours or days such as 3h or 2d")]
    InvalidCacheAge(String),

    #[error("No AWS profile given. Pass --profile or set default_profile in the config file.")]
    MissingProfile,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
