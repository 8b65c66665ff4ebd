//! Cache entry display model

use serde::Serialize;
use tabled::Tabled;

use crate::cache::{CacheEntry, age_seconds, timestamp_is_fresh};
use crate::output::formatters::{format_age, format_epoch_local, format_size};

/// One row per cached profile for `awsorg cache list`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CacheEntryDisplay {
    #[tabled(rename = "PROFILE")]
    pub profile: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CACHED AT")]
    pub cached_at: String,

    #[tabled(rename = "AGE")]
    pub age: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl CacheEntryDisplay {
    /// Build a row, judging freshness against `max_age_secs` at `now`.
    pub fn new(entry: &CacheEntry, max_age_secs: i64, now: i64) -> Self {
        let status = match (&entry.corrupt, entry.timestamp) {
            (Some(_), _) => "corrupt",
            (None, ts) if timestamp_is_fresh(ts, max_age_secs, now) => "fresh",
            _ => "stale",
        };

        Self {
            profile: entry.profile_key.clone(),
            name: entry.display_name.clone().unwrap_or_else(|| "-".to_string()),
            cached_at: entry
                .timestamp
                .map(format_epoch_local)
                .unwrap_or_else(|| "-".to_string()),
            age: age_seconds(entry.timestamp, now)
                .map(format_age)
                .unwrap_or_else(|| "-".to_string()),
            size: format_size(entry.size_bytes),
            status: status.to_string(),
        }
    }
}
