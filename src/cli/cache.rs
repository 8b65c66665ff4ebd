//! Cache management commands

use chrono::Utc;

use crate::cache::CacheStore;
use crate::cli::{CacheAge, GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::models::CacheEntryDisplay;
use crate::output::{json, table};

/// Open the cache honouring `--cache-dir`
fn open_store(opts: &GlobalOptions) -> Result<CacheStore> {
    match opts.cache_dir_ref() {
        Some(dir) => Ok(CacheStore::open_at(dir)),
        None => CacheStore::open(),
    }
}

/// Max age used to label entries fresh or stale
fn max_age_secs(opts: &GlobalOptions) -> Result<i64> {
    if let Some(age) = opts.cache_age {
        return Ok(age.as_secs());
    }
    let config = Config::load_at(opts.config_ref())?;
    match config.cache_age.as_deref() {
        Some(raw) => Ok(raw.parse::<CacheAge>()?.as_secs()),
        None => Ok(CacheAge::default().as_secs()),
    }
}

/// List cached profiles
pub fn list(opts: &GlobalOptions) -> Result<()> {
    let store = open_store(opts)?;
    let max_age = max_age_secs(opts)?;
    let now = Utc::now().timestamp();

    let entries = store.list_entries()?;
    let rows: Vec<CacheEntryDisplay> = entries
        .iter()
        .map(|entry| CacheEntryDisplay::new(entry, max_age, now))
        .collect();

    match opts.format {
        OutputFormat::Json => println!("{}", json::format_json(&rows)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{}", table::format_table(&rows, "No cached profiles."));
            for entry in entries.iter().filter(|e| e.corrupt.is_some()) {
                log::warn!("{}: {}", entry.path.display(), entry.corrupt.as_deref().unwrap_or(""));
            }
        }
    }

    Ok(())
}

/// Show cache path
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let store = open_store(opts)?;
    println!("{}", store.dir().display());
    Ok(())
}
