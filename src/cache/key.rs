//! Profile key validation
//!
//! The profile key becomes a file name, so it is restricted to a safe
//! character set instead of being escaped or hashed.

use crate::error::ConfigError;

/// Longest accepted profile key
pub const MAX_PROFILE_KEY_LEN: usize = 64;

/// Check that `key` is usable as a cache file stem.
///
/// Accepts ASCII letters, digits, `-`, `_` and `.`; rejects empty keys, keys
/// longer than [`MAX_PROFILE_KEY_LEN`], and keys starting with `.` (which
/// also rules out `.` and `..`).
pub fn validate_profile_key(key: &str) -> Result<&str, ConfigError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_PROFILE_KEY_LEN
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(key)
    } else {
        Err(ConfigError::InvalidProfileKey(key.to_string()))
    }
}

/// Deterministic cache file name for a profile
pub fn snapshot_file_name(key: &str) -> Result<String, ConfigError> {
    Ok(format!("{}.yaml", validate_profile_key(key)?))
}
