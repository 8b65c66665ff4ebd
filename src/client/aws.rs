//! AWS Organizations client implementation

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_organizations::Client;
use aws_sdk_organizations::config::Region;
use aws_sdk_organizations::error::DisplayErrorContext;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

use super::{Account, NodeDescriptor, OrganizationsApi, Page};
use crate::error::{RemoteError, Result};

/// Organizations is a global service homed in us-east-1
const DEFAULT_REGION: &str = "us-east-1";

/// The Organizations list APIs throttle well below most AWS services
const CALLS_PER_SECOND: NonZeroU32 = NonZeroU32::new(4).unwrap();

/// AWS Organizations client bound to one named credentials profile
pub struct OrganizationsClient {
    inner: Client,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl OrganizationsClient {
    /// Load shared AWS configuration for `profile` and build a client.
    ///
    /// Region resolution: explicit `region`, then the standard provider
    /// chain, then us-east-1.
    pub async fn connect(profile: &str, region: Option<&str>) -> Result<Self> {
        let region_provider = RegionProviderChain::first_try(region.map(|r| Region::new(r.to_string())))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .profile_name(profile)
            .region(region_provider)
            .load()
            .await;

        if config.credentials_provider().is_none() {
            return Err(RemoteError::Connect(format!(
                "no credentials available for profile '{}'",
                profile
            ))
            .into());
        }

        log::debug!(
            "Created Organizations client for profile {} in {:?}",
            profile,
            config.region()
        );

        Ok(Self::from_client(Client::new(&config)))
    }

    /// Wrap an already-configured SDK client
    pub fn from_client(inner: Client) -> Self {
        Self {
            inner,
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_second(CALLS_PER_SECOND))),
        }
    }
}

fn required(field: Option<&str>, what: &str) -> Result<String> {
    field
        .map(str::to_string)
        .ok_or_else(|| RemoteError::InvalidResponse(format!("{} without an id", what)).into())
}

fn page<T>(items: Vec<T>, next_token: Option<&str>) -> Page<T> {
    let page = Page::new(items);
    match next_token {
        Some(token) => page.with_next_token(token),
        None => page,
    }
}

fn descriptor(id: String, name: Option<&str>, arn: Option<&str>) -> NodeDescriptor {
    let node = NodeDescriptor::new(id, name.unwrap_or_default());
    match arn {
        Some(arn) => node.with_arn(arn),
        None => node,
    }
}

#[async_trait]
impl OrganizationsApi for OrganizationsClient {
    async fn list_roots_page(&self, next_token: Option<String>) -> Result<Page<NodeDescriptor>> {
        self.rate_limiter.until_ready().await;

        let resp = self
            .inner
            .list_roots()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| RemoteError::sdk("ListRoots", DisplayErrorContext(&e).to_string()))?;

        let items = resp
            .roots()
            .iter()
            .map(|root| {
                Ok(descriptor(
                    required(root.id(), "root")?,
                    root.name(),
                    root.arn(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(page(items, resp.next_token()))
    }

    async fn list_child_units_page(
        &self,
        parent_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NodeDescriptor>> {
        self.rate_limiter.until_ready().await;

        let resp = self
            .inner
            .list_organizational_units_for_parent()
            .parent_id(parent_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                RemoteError::sdk(
                    "ListOrganizationalUnitsForParent",
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        let items = resp
            .organizational_units()
            .iter()
            .map(|ou| {
                Ok(descriptor(
                    required(ou.id(), "organizational unit")?,
                    ou.name(),
                    ou.arn(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(page(items, resp.next_token()))
    }

    #[allow(deprecated)]
    async fn list_accounts_page(
        &self,
        parent_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Account>> {
        self.rate_limiter.until_ready().await;

        let resp = self
            .inner
            .list_accounts_for_parent()
            .parent_id(parent_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                RemoteError::sdk("ListAccountsForParent", DisplayErrorContext(&e).to_string())
            })?;

        let items = resp
            .accounts()
            .iter()
            .map(|account| {
                let mut acct = Account::new(
                    required(account.id(), "account")?,
                    account.name().unwrap_or_default(),
                    account.email().unwrap_or_default(),
                );
                acct.arn = account.arn().map(str::to_string);
                acct.status = account.status().map(|s| s.as_str().to_string());
                Ok(acct)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(page(items, resp.next_token()))
    }
}
