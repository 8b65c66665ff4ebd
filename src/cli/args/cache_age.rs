//! Maximum cache age argument
//!
//! Users give ages in hours or days (`3h`, `2d`); the cache itself only ever
//! sees seconds.

use std::fmt;
use std::str::FromStr;

use crate::cache::DEFAULT_MAX_AGE_SECS;
use crate::error::ConfigError;

const HOUR: i64 = 60 * 60;
const DAY: i64 = 24 * HOUR;

/// A maximum cache age, parsed from `<n>h`, `<n>d` or a bare `<n>` (days).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheAge {
    seconds: i64,
}

impl CacheAge {
    pub fn from_secs(seconds: i64) -> Self {
        Self { seconds }
    }

    pub fn as_secs(&self) -> i64 {
        self.seconds
    }
}

impl Default for CacheAge {
    fn default() -> Self {
        Self::from_secs(DEFAULT_MAX_AGE_SECS)
    }
}

impl FromStr for CacheAge {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidCacheAge(s.to_string());
        let trimmed = s.trim().to_ascii_lowercase();

        let (digits, unit) = match trimmed.char_indices().last() {
            Some((i, 'h')) => (&trimmed[..i], HOUR),
            Some((i, 'd')) => (&trimmed[..i], DAY),
            Some(_) => (trimmed.as_str(), DAY),
            None => return Err(invalid()),
        };

        let amount: i64 = digits.parse().map_err(|_| invalid())?;
        if amount < 0 {
            return Err(invalid());
        }

        amount
            .checked_mul(unit)
            .map(Self::from_secs)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for CacheAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds % DAY == 0 {
            write!(f, "{}d", self.seconds / DAY)
        } else if self.seconds % HOUR == 0 {
            write!(f, "{}h", self.seconds / HOUR)
        } else {
            write!(f, "{}s", self.seconds)
        }
    }
}
