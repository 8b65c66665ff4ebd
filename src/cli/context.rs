//! Command execution context
//!
//! Resolves settings from flags, environment and the config file, opens the
//! snapshot cache, and connects to AWS only when a rebuild is needed.

use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::{CacheStore, DEFAULT_MAX_AGE_SECS, validate_profile_key};
use crate::cli::{CacheAge, GlobalOptions, OutputFormat};
use crate::client::{NodeDescriptor, OrganizationsApi, OrganizationsClient};
use crate::config::Config;
use crate::error::{CacheError, ConfigError, Error, Result};
use crate::tree::{OrganizationSnapshot, build_organization_tree};

/// Effective settings for one invocation.
///
/// Precedence: CLI flag > environment variable > config file > default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// AWS profile, validated for use as a cache key
    pub profile: String,
    /// Friendly name shown in output
    pub display_name: String,
    /// Maximum cache age in seconds
    pub max_age_secs: i64,
    /// Region override for the Organizations client
    pub region: Option<String>,
}

impl Settings {
    pub fn resolve(opts: &GlobalOptions, config: &Config) -> Result<Self> {
        let profile = opts
            .profile
            .clone()
            .or_else(|| config.default_profile.clone())
            .ok_or(ConfigError::MissingProfile)?;
        validate_profile_key(&profile)?;

        let display_name = opts
            .profile_name
            .clone()
            .or_else(|| config.display_name_for(&profile).map(String::from))
            .unwrap_or_else(|| profile.clone());

        let max_age_secs = match (opts.cache_age, config.cache_age.as_deref()) {
            (Some(age), _) => age.as_secs(),
            (None, Some(raw)) => raw.parse::<CacheAge>()?.as_secs(),
            (None, None) => DEFAULT_MAX_AGE_SECS,
        };

        Ok(Self {
            profile,
            display_name,
            max_age_secs,
            region: opts.region.clone().or_else(|| config.region.clone()),
        })
    }
}

/// Context for the organization commands.
pub struct CommandContext {
    pub settings: Settings,
    pub cache: CacheStore,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, resolve settings and open the cache.
    ///
    /// # Errors
    /// Returns error if the config file is invalid, no profile is given, or
    /// the profile is not a valid cache key.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let settings = Settings::resolve(opts, &config)?;

        let cache = match opts.cache_dir_ref() {
            Some(dir) => CacheStore::open_at(dir),
            None => CacheStore::open()?,
        };

        Ok(Self {
            settings,
            cache,
            format: opts.format,
        })
    }

    /// The cached snapshot if it is still fresh at `now`.
    ///
    /// A corrupt cache file is reported and treated as a miss so that the
    /// caller rebuilds over it.
    pub fn cached(&self, now: i64) -> Result<Option<OrganizationSnapshot>> {
        match self
            .cache
            .valid_cache(&self.settings.profile, self.settings.max_age_secs, now)
        {
            Err(Error::Cache(err @ CacheError::Corrupt { .. })) => {
                log::warn!("{}", err);
                Ok(None)
            }
            other => other,
        }
    }

    /// A fresh snapshot, from the cache when possible.
    pub async fn snapshot(&self) -> Result<OrganizationSnapshot> {
        match self.cached(Utc::now().timestamp())? {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh().await,
        }
    }

    /// Rebuild from AWS and replace the cache entry.
    pub async fn refresh(&self) -> Result<OrganizationSnapshot> {
        let client =
            OrganizationsClient::connect(&self.settings.profile, self.settings.region.as_deref())
                .await?;
        self.rebuild_with(&client).await
    }

    /// Rebuild using `api` and persist the result.
    pub async fn rebuild_with<C: OrganizationsApi + ?Sized>(
        &self,
        api: &C,
    ) -> Result<OrganizationSnapshot> {
        log::debug!("Rebuilding organization tree for {}", self.settings.profile);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message(format!("Reading organization for {}", self.settings.display_name));

        let progress = |node: &NodeDescriptor| {
            spinner.set_message(format!("Reading {} ({})", node.name, node.id));
        };

        let built = build_organization_tree(
            api,
            &self.settings.profile,
            &self.settings.display_name,
            Some(&progress),
        )
        .await;
        spinner.finish_and_clear();

        let mut snapshot = built?;
        self.cache.write_snapshot(&self.settings.profile, &mut snapshot)?;

        Ok(snapshot)
    }
}
