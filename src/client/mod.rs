//! AWS Organizations API client

use async_trait::async_trait;

use crate::error::Result;

pub mod aws;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use aws::OrganizationsClient;
#[cfg(test)]
pub use mock::MockOrganizationsClient;
pub use models::{Account, NodeDescriptor};
pub use pagination::{Page, fetch_all};

/// The three list operations the tree builder needs, one page at a time.
///
/// Implementations return a single page per call; draining pages is the
/// caller's job (see [`fetch_all`]). `next_token` is `None` for the first
/// page.
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    /// List the organization's roots
    async fn list_roots_page(&self, next_token: Option<String>) -> Result<Page<NodeDescriptor>>;

    /// List the organizational units directly under a root or OU
    async fn list_child_units_page(
        &self,
        parent_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NodeDescriptor>>;

    /// List the accounts directly under a root or OU
    async fn list_accounts_page(
        &self,
        parent_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Account>>;
}
