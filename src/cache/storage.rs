//! File-backed snapshot storage
//!
//! Each profile's snapshot lives in `<dir>/<profile>.yaml`. Writes go to a
//! hidden temporary sibling first and are renamed into place, so a reader in
//! another process sees either the old file or the new one, never a torn
//! write.

use chrono::Utc;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::is_fresh;
use super::key::snapshot_file_name;
use crate::error::{CacheError, ConfigError, Result};
use crate::tree::OrganizationSnapshot;

/// Snapshot cache rooted at one directory
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

/// A cached profile as seen by `cache list`
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub profile_key: String,
    pub display_name: Option<String>,
    pub timestamp: Option<i64>,
    pub size_bytes: u64,
    pub path: PathBuf,
    /// Parse error if the file could not be read as a snapshot
    pub corrupt: Option<String>,
}

impl CacheStore {
    /// Open the cache at the default location
    pub fn open() -> Result<Self> {
        Ok(Self::open_at(Self::default_dir()?))
    }

    /// Default cache directory (~/.config/awsorg/cache on Linux)
    pub fn default_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("awsorg").join("cache"))
    }

    /// Open the cache at a specific directory. The directory is created on
    /// first write.
    pub fn open_at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the snapshot for `profile_key`
    pub fn path_for(&self, profile_key: &str) -> Result<PathBuf> {
        Ok(self.dir.join(snapshot_file_name(profile_key)?))
    }

    /// Load the snapshot for `profile_key`.
    ///
    /// Returns `Ok(None)` if nothing has been cached for the profile. A file
    /// that exists but does not parse is a [`CacheError::Corrupt`].
    pub fn read_snapshot(&self, profile_key: &str) -> Result<Option<OrganizationSnapshot>> {
        let path = self.path_for(profile_key)?;

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::Io(format!("Failed to read {}: {}", path.display(), e)).into());
            }
        };

        let snapshot = serde_yaml::from_str(&contents).map_err(|e| CacheError::Corrupt {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Some(snapshot))
    }

    /// The cached snapshot for `profile_key` if it exists and is fresh.
    ///
    /// `None` means the caller must rebuild; it is never an error.
    pub fn valid_cache(
        &self,
        profile_key: &str,
        max_age_seconds: i64,
        now_seconds: i64,
    ) -> Result<Option<OrganizationSnapshot>> {
        let snapshot = self.read_snapshot(profile_key)?;

        if is_fresh(snapshot.as_ref(), max_age_seconds, now_seconds) {
            log::debug!("Cache hit: {}", profile_key);
            Ok(snapshot)
        } else {
            log::debug!("Cache miss: {}", profile_key);
            Ok(None)
        }
    }

    /// Stamp `snapshot` with the current time and persist it.
    pub fn write_snapshot(&self, profile_key: &str, snapshot: &mut OrganizationSnapshot) -> Result<()> {
        self.write_snapshot_at(profile_key, snapshot, Utc::now().timestamp())
    }

    /// Atomically replace the profile's cache file with `snapshot` stamped
    /// at `now_seconds`.
    ///
    /// If any step fails, `snapshot` keeps the timestamp it had before the
    /// call.
    pub fn write_snapshot_at(
        &self,
        profile_key: &str,
        snapshot: &mut OrganizationSnapshot,
        now_seconds: i64,
    ) -> Result<()> {
        let path = self.path_for(profile_key)?;

        let previous = snapshot.timestamp.replace(now_seconds);
        if let Err(e) = self.persist(profile_key, &path, snapshot) {
            snapshot.timestamp = previous;
            return Err(e);
        }

        log::debug!("Wrote snapshot for {} to {}", profile_key, path.display());
        Ok(())
    }

    fn persist(&self, profile_key: &str, path: &Path, snapshot: &OrganizationSnapshot) -> Result<()> {
        let yaml =
            serde_yaml::to_string(snapshot).map_err(|e| CacheError::Serialize(e.to_string()))?;

        fs::create_dir_all(&self.dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        // Hidden, per-process temp name: never matches a profile file and
        // never collides with another writer's temp file
        let temp_path = self
            .dir
            .join(format!(".{}.{}.tmp", profile_key, std::process::id()));

        let written = write_synced(&temp_path, yaml.as_bytes())
            .and_then(|()| fs::rename(&temp_path, path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(CacheError::Io(format!("Failed to write {}: {}", path.display(), e)).into());
        }

        Ok(())
    }

    /// Every cached profile in the directory, sorted by profile key.
    ///
    /// Unreadable snapshots are reported with `corrupt` set instead of
    /// failing the whole listing.
    pub fn list_entries(&self) -> Result<Vec<CacheEntry>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::Io(format!("Failed to list cache dir: {}", e)).into()),
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| CacheError::Io(e.to_string()))?;
            let path = dir_entry.path();

            let Some(profile_key) = profile_key_of(&path) else {
                continue;
            };
            let size_bytes = dir_entry.metadata().map(|m| m.len()).unwrap_or(0);

            let entry = match self.read_snapshot(&profile_key) {
                Ok(Some(snapshot)) => CacheEntry {
                    profile_key,
                    display_name: Some(snapshot.display_name),
                    timestamp: snapshot.timestamp,
                    size_bytes,
                    path,
                    corrupt: None,
                },
                Ok(None) => continue,
                Err(e) => CacheEntry {
                    profile_key,
                    display_name: None,
                    timestamp: None,
                    size_bytes,
                    path,
                    corrupt: Some(e.to_string()),
                },
            };
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.profile_key.cmp(&b.profile_key));
        Ok(entries)
    }
}

/// Profile key for a `<key>.yaml` file, if the stem is a valid key
fn profile_key_of(path: &Path) -> Option<String> {
    if path.extension()? != "yaml" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    super::validate_profile_key(stem).ok().map(str::to_string)
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
