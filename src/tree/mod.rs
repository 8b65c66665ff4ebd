//! Organization tree builder
//!
//! Reconstructs the full root/OU/account hierarchy from the flat, paginated
//! Organizations list calls. Calls are made one at a time and children are
//! kept in the order the API returns them.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::client::{Account, NodeDescriptor, OrganizationsApi, fetch_all};
use crate::error::Result;

mod node;

pub use node::{OrganizationNode, OrganizationSnapshot, Visit};

/// Callback invoked as each node starts being fetched
pub type ProgressFn<'a> = &'a (dyn Fn(&NodeDescriptor) + Send + Sync);

/// Builds [`OrganizationSnapshot`]s from any [`OrganizationsApi`].
pub struct TreeBuilder<'a, C: OrganizationsApi + ?Sized> {
    api: &'a C,
    progress: Option<ProgressFn<'a>>,
}

impl<'a, C: OrganizationsApi + ?Sized> TreeBuilder<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self {
            api,
            progress: None,
        }
    }

    /// Report each node as it is visited (used for the CLI spinner).
    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// All roots of the organization
    pub async fn list_roots(&self) -> Result<Vec<NodeDescriptor>> {
        let api = self.api;
        fetch_all(move |token| api.list_roots_page(token)).await
    }

    /// Units directly under `parent_id`
    pub async fn list_child_units(&self, parent_id: &str) -> Result<Vec<NodeDescriptor>> {
        let api = self.api;
        fetch_all(move |token| api.list_child_units_page(parent_id, token)).await
    }

    /// Accounts directly under `parent_id`
    pub async fn list_accounts(&self, parent_id: &str) -> Result<Vec<Account>> {
        let api = self.api;
        fetch_all(move |token| api.list_accounts_page(parent_id, token)).await
    }

    /// Build the complete subtree below `descriptor`.
    ///
    /// Every child is fully built, descendants included, before the parent
    /// node is assembled. Any failure abandons the whole subtree.
    pub fn build_subtree<'b>(
        &'b self,
        descriptor: &'b NodeDescriptor,
    ) -> BoxFuture<'b, Result<OrganizationNode>> {
        async move {
            if let Some(progress) = self.progress {
                progress(descriptor);
            }

            let accounts = self.list_accounts(&descriptor.id).await?;
            let units = self.list_child_units(&descriptor.id).await?;

            let mut children = Vec::with_capacity(units.len());
            for unit in &units {
                children.push(self.build_subtree(unit).await?);
            }

            log::debug!(
                "Built {} ({}): {} accounts, {} child units",
                descriptor.name,
                descriptor.id,
                accounts.len(),
                children.len()
            );

            Ok(OrganizationNode::new(descriptor, accounts, children))
        }
        .boxed()
    }

    /// Build a snapshot of every root. The timestamp is left unset; it is
    /// stamped when the snapshot is written to the cache.
    pub async fn build(&self, profile_key: &str, display_name: &str) -> Result<OrganizationSnapshot> {
        let roots = self.list_roots().await?;

        let mut built = Vec::with_capacity(roots.len());
        for root in &roots {
            built.push(self.build_subtree(root).await?);
        }

        Ok(OrganizationSnapshot::new(profile_key, display_name, built))
    }
}

/// Build the full organization tree for one profile, reporting each node to
/// `progress` when given.
pub async fn build_organization_tree<'a, C: OrganizationsApi + ?Sized>(
    api: &'a C,
    profile_key: &str,
    display_name: &str,
    progress: Option<ProgressFn<'a>>,
) -> Result<OrganizationSnapshot> {
    let mut builder = TreeBuilder::new(api);
    if let Some(progress) = progress {
        builder = builder.with_progress(progress);
    }
    builder.build(profile_key, display_name).await
}
