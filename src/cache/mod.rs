//! Local snapshot cache
//!
//! One YAML file per AWS profile under the user's configuration directory.
//! A snapshot is usable while its age is at most the caller's maximum age;
//! otherwise the caller rebuilds the tree and writes a fresh snapshot.

pub mod key;
pub mod storage;

use crate::tree::OrganizationSnapshot;

/// Default maximum snapshot age: one day
pub const DEFAULT_MAX_AGE_SECS: i64 = 24 * 60 * 60;

/// Whether `snapshot` is young enough to use.
///
/// True iff the snapshot exists, has been stamped, and
/// `now_seconds - timestamp <= max_age_seconds`. The boundary is inclusive:
/// a snapshot exactly `max_age_seconds` old is still fresh.
pub fn is_fresh(
    snapshot: Option<&OrganizationSnapshot>,
    max_age_seconds: i64,
    now_seconds: i64,
) -> bool {
    timestamp_is_fresh(
        snapshot.and_then(|s| s.timestamp),
        max_age_seconds,
        now_seconds,
    )
}

/// The freshness rule on a bare write timestamp.
///
/// An age that does not fit in an `i64` is never fresh.
pub fn timestamp_is_fresh(timestamp: Option<i64>, max_age_seconds: i64, now_seconds: i64) -> bool {
    age_seconds(timestamp, now_seconds).is_some_and(|age| age <= max_age_seconds)
}

/// Seconds between `timestamp` and `now_seconds`; `None` if there is no
/// timestamp or the difference overflows.
pub fn age_seconds(timestamp: Option<i64>, now_seconds: i64) -> Option<i64> {
    timestamp.and_then(|ts| now_seconds.checked_sub(ts))
}

// Re-export main types
pub use key::{snapshot_file_name, validate_profile_key};
pub use storage::{CacheEntry, CacheStore};
