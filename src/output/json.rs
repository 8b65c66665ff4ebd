//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::tree::OrganizationSnapshot;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// When this output was produced
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Profile the data belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When the underlying snapshot was cached (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<i64>,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                profile: None,
                cached_at: None,
            },
        }
    }

    /// Attach the profile and cache time of the snapshot the data came from
    pub fn with_snapshot(mut self, snapshot: &OrganizationSnapshot) -> Self {
        self.meta.profile = Some(snapshot.profile_key.clone());
        self.meta.cached_at = snapshot.timestamp;
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format data derived from a snapshot as pretty-printed JSON
pub fn format_snapshot_json<T: Serialize + ?Sized>(
    data: &T,
    snapshot: &OrganizationSnapshot,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data).with_snapshot(snapshot))
}
