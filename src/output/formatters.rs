//! Reusable formatting utilities for CLI output
//!
//! Timestamps, ages and sizes shared by the org and cache commands.

use chrono::{TimeZone, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Format Unix seconds as a local date/time string.
///
/// Returns "N/A" if the timestamp is out of range.
///
/// # Example output
/// `2025-01-15 14:30 PST`
pub fn format_epoch_local(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => {
            let local = dt.with_timezone(&chrono::Local);
            let date_time = local.format("%Y-%m-%d %H:%M").to_string();
            let tz_abbrev = offset_to_tz_abbrev(local.offset().local_minus_utc());
            format!("{} {}", date_time, tz_abbrev)
        }
        _ => "N/A".to_string(),
    }
}

/// Convert UTC offset (seconds) to timezone abbreviation.
///
/// Maps common UTC offsets to standard timezone abbreviations. Falls back to
/// `UTC+N` format for uncommon offsets.
pub fn offset_to_tz_abbrev(offset_secs: i32) -> String {
    let offset_hours = offset_secs / 3600;
    let abbrev = match offset_hours {
        -10 => "HST",
        -9 => "AKST",
        -8 => "PST",
        -7 => "MST",
        -6 => "CST",
        -5 => "EST",
        0 => "UTC",
        1 => "CET",
        2 => "EET",
        9 => "JST",
        10 => "AEST",
        12 => "NZST",
        _ => return format!("UTC{:+}", offset_hours),
    };
    abbrev.to_string()
}

/// Format an age in seconds as a short human-readable string.
///
/// # Example output
/// - `2d 3h`
/// - `1h 15m`
/// - `5m`
/// - `45s`
pub fn format_age(secs: i64) -> String {
    if secs < 0 {
        return "in the future".to_string();
    }

    if secs >= DAY {
        format!("{}d {}h", secs / DAY, (secs % DAY) / HOUR)
    } else if secs >= HOUR {
        format!("{}h {}m", secs / HOUR, (secs % HOUR) / MINUTE)
    } else if secs >= MINUTE {
        format!("{}m", secs / MINUTE)
    } else {
        format!("{}s", secs)
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
