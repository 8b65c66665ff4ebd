//! Mock Organizations client for testing
//!
//! Provides an in-memory implementation of [`OrganizationsApi`] so the tree
//! builder can be exercised without AWS credentials.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{Account, NodeDescriptor, OrganizationsApi, Page};
use crate::error::{RemoteError, Result};

/// Mock API client for testing.
///
/// Configure pages per parent via builder methods, then hand it to a
/// `TreeBuilder`. Parents with nothing configured return one empty page.
///
/// # Example
/// ```ignore
/// let mock = MockOrganizationsClient::new()
///     .with_roots(vec![NodeDescriptor::new("r-1", "Root")]).await
///     .with_accounts("r-1", vec![Account::new("1", "a", "a@x")]).await;
/// ```
#[derive(Default)]
pub struct MockOrganizationsClient {
    /// Pages returned from list_roots_page
    root_pages: Arc<Mutex<Vec<Vec<NodeDescriptor>>>>,
    /// Pages of child units keyed by parent ID
    unit_pages: Arc<Mutex<HashMap<String, Vec<Vec<NodeDescriptor>>>>>,
    /// Pages of accounts keyed by parent ID
    account_pages: Arc<Mutex<HashMap<String, Vec<Vec<Account>>>>>,
    /// Calls that fail: (method, parent ID or None for any parent)
    failures: Arc<Mutex<Vec<(String, Option<String>)>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_roots: usize,
    pub list_child_units: usize,
    pub list_accounts: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_roots + self.list_child_units + self.list_accounts
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_accounts")
    pub method: String,
    /// Parent ID if the call was scoped to one
    pub parent_id: Option<String>,
    /// Continuation token sent with the request
    pub next_token: Option<String>,
}

impl MockOrganizationsClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure roots returned as a single page.
    pub async fn with_roots(self, roots: Vec<NodeDescriptor>) -> Self {
        *self.root_pages.lock().await = vec![roots];
        self
    }

    /// Configure child units of `parent_id` returned as a single page.
    pub async fn with_units(self, parent_id: &str, units: Vec<NodeDescriptor>) -> Self {
        self.with_unit_pages(parent_id, vec![units]).await
    }

    /// Configure child units of `parent_id` split across pages.
    pub async fn with_unit_pages(self, parent_id: &str, pages: Vec<Vec<NodeDescriptor>>) -> Self {
        self.unit_pages
            .lock()
            .await
            .insert(parent_id.to_string(), pages);
        self
    }

    /// Configure accounts of `parent_id` returned as a single page.
    pub async fn with_accounts(self, parent_id: &str, accounts: Vec<Account>) -> Self {
        self.with_account_pages(parent_id, vec![accounts]).await
    }

    /// Configure accounts of `parent_id` split across pages.
    /// Every page except the last carries a continuation token.
    pub async fn with_account_pages(self, parent_id: &str, pages: Vec<Vec<Account>>) -> Self {
        self.account_pages
            .lock()
            .await
            .insert(parent_id.to_string(), pages);
        self
    }

    /// Make every call to `method` fail, optionally only for one parent.
    pub async fn with_failure(self, method: &str, parent_id: Option<&str>) -> Self {
        self.failures
            .lock()
            .await
            .push((method.to_string(), parent_id.map(str::to_string)));
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    async fn record(&self, method: &str, parent_id: Option<&str>, next_token: &Option<String>) {
        {
            let mut counts = self.call_count.lock().await;
            match method {
                "list_roots" => counts.list_roots += 1,
                "list_child_units" => counts.list_child_units += 1,
                _ => counts.list_accounts += 1,
            }
        }

        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            parent_id: parent_id.map(str::to_string),
            next_token: next_token.clone(),
        });
    }

    async fn check_failure(&self, method: &str, parent_id: Option<&str>) -> Result<()> {
        let failures = self.failures.lock().await;
        let matched = failures.iter().any(|(m, p)| {
            m == method && (p.is_none() || p.as_deref() == parent_id)
        });
        if matched {
            return Err(RemoteError::sdk(method, "simulated failure").into());
        }
        Ok(())
    }
}

/// Tokens are `page-<n>` where n is the index of the page to return.
fn page_index(next_token: &Option<String>) -> Result<usize> {
    match next_token {
        None => Ok(0),
        Some(token) => token
            .strip_prefix("page-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| RemoteError::InvalidResponse(format!("unknown token {}", token)).into()),
    }
}

fn select_page<T: Clone>(pages: Option<&Vec<Vec<T>>>, next_token: &Option<String>) -> Result<Page<T>> {
    let index = page_index(next_token)?;
    let Some(pages) = pages else {
        return Ok(Page::new(Vec::new()));
    };
    if pages.is_empty() && index == 0 {
        return Ok(Page::new(Vec::new()));
    }

    let items = pages
        .get(index)
        .cloned()
        .ok_or_else(|| RemoteError::InvalidResponse(format!("no page {}", index)))?;

    let page = Page::new(items);
    if index + 1 < pages.len() {
        Ok(page.with_next_token(format!("page-{}", index + 1)))
    } else {
        Ok(page)
    }
}

#[async_trait]
impl OrganizationsApi for MockOrganizationsClient {
    async fn list_roots_page(&self, next_token: Option<String>) -> Result<Page<NodeDescriptor>> {
        self.record("list_roots", None, &next_token).await;
        self.check_failure("list_roots", None).await?;

        let pages = self.root_pages.lock().await;
        select_page(Some(&*pages), &next_token)
    }

    async fn list_child_units_page(
        &self,
        parent_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<NodeDescriptor>> {
        self.record("list_child_units", Some(parent_id), &next_token)
            .await;
        self.check_failure("list_child_units", Some(parent_id)).await?;

        let pages = self.unit_pages.lock().await;
        select_page(pages.get(parent_id), &next_token)
    }

    async fn list_accounts_page(
        &self,
        parent_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Account>> {
        self.record("list_accounts", Some(parent_id), &next_token)
            .await;
        self.check_failure("list_accounts", Some(parent_id)).await?;

        let pages = self.account_pages.lock().await;
        select_page(pages.get(parent_id), &next_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_unconfigured_parent_is_empty() {
        let mock = MockOrganizationsClient::new();
        let page = mock.list_accounts_page("ou-none", None).await.unwrap();

        assert!(page.items.is_empty());
        assert!(!page.has_next_page());
    }

    #[tokio::test]
    async fn test_mock_pages_carry_tokens() {
        let mock = MockOrganizationsClient::new()
            .with_account_pages(
                "r-1",
                vec![
                    vec![Account::new("1", "a", "a@example.com")],
                    vec![Account::new("2", "b", "b@example.com")],
                ],
            )
            .await;

        let first = mock.list_accounts_page("r-1", None).await.unwrap();
        assert_eq!(first.continuation(), Some("page-1"));

        let second = mock
            .list_accounts_page("r-1", Some("page-1".to_string()))
            .await
            .unwrap();
        assert_eq!(second.items[0].id, "2");
        assert!(!second.has_next_page());

        let counts = mock.call_counts().await;
        assert_eq!(counts.list_accounts, 2);
        assert_eq!(counts.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure_scoped_to_parent() {
        let mock = MockOrganizationsClient::new()
            .with_failure("list_child_units", Some("ou-bad"))
            .await;

        assert!(mock.list_child_units_page("ou-good", None).await.is_ok());
        assert!(mock.list_child_units_page("ou-bad", None).await.is_err());
    }
}
