//! Token-based pagination for Organizations list calls
//!
//! Every Organizations list operation returns one page of items plus an
//! optional `NextToken`. [`fetch_all`] drains a list operation by carrying the
//! token forward until the service stops returning one.

use std::future::Future;

use crate::error::Result;

/// One page of a paginated list response.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page, in service order
    pub items: Vec<T>,
    /// Continuation token for the next page, if any
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a final page (no continuation token).
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// Set the continuation token.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// The token to send with the next request.
    ///
    /// An empty token is treated the same as an absent one.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Check if there are more pages to fetch.
    pub fn has_next_page(&self) -> bool {
        self.continuation().is_some()
    }
}

/// Fetch every page of a list operation and concatenate the items in page
/// order.
///
/// `fetch_page` receives `None` for the first request and the previous page's
/// continuation token afterwards. The first error aborts the whole fetch;
/// items gathered from earlier pages are discarded.
pub async fn fetch_all<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(token.take()).await?;
        pages += 1;

        if page.has_next_page() {
            token = page.next_token.clone();
        }
        items.extend(page.items);

        if token.is_none() {
            break;
        }
    }

    log::trace!("Fetched {} items over {} pages", items.len(), pages);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, RemoteError};

    fn pages_of(pages: Vec<Page<u32>>) -> impl FnMut(Option<String>) -> std::future::Ready<Result<Page<u32>>> {
        let mut pages = pages.into_iter();
        move |_token| {
            std::future::ready(
                pages
                    .next()
                    .ok_or_else(|| RemoteError::InvalidResponse("past the last page".into()).into()),
            )
        }
    }

    #[test]
    fn test_page_continuation() {
        let page = Page::new(vec![1, 2]);
        assert!(!page.has_next_page());

        let page = Page::new(vec![1]).with_next_token("abc");
        assert!(page.has_next_page());
        assert_eq!(page.continuation(), Some("abc"));
    }

    #[test]
    fn test_empty_token_ends_pagination() {
        let page = Page::new(vec![1]).with_next_token("");
        assert!(!page.has_next_page());
        assert_eq!(page.continuation(), None);
    }

    #[tokio::test]
    async fn test_fetch_all_single_page() {
        let items = fetch_all(pages_of(vec![Page::new(vec![7, 8, 9])]))
            .await
            .unwrap();
        assert_eq!(items, vec![7, 8, 9]);
    }

    #[tokio::test]
    async fn test_fetch_all_follows_tokens_in_order() {
        let pages = vec![
            Page::new(vec![1, 2]).with_next_token("t1"),
            Page::new(vec![3, 4]).with_next_token("t2"),
            Page::new(vec![5, 6]).with_next_token("t3"),
            Page::new(vec![]),
        ];

        let items = fetch_all(pages_of(pages)).await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_fetch_all_passes_previous_token() {
        let mut seen = Vec::new();
        let mut remaining = vec![
            Page::new(vec![1]).with_next_token("first"),
            Page::new(vec![2]).with_next_token("second"),
            Page::new(vec![3]),
        ]
        .into_iter();

        let items = fetch_all(|token| {
            seen.push(token);
            std::future::ready(Ok(remaining.next().unwrap()))
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(
            seen,
            vec![None, Some("first".to_string()), Some("second".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_all_error_discards_partial_results() {
        let mut calls = 0;
        let result: Result<Vec<u32>> = fetch_all(|_token| {
            calls += 1;
            std::future::ready(if calls == 1 {
                Ok(Page::new(vec![1, 2]).with_next_token("next"))
            } else {
                Err(RemoteError::sdk("ListAccountsForParent", "Throttling").into())
            })
        })
        .await;

        assert!(matches!(result, Err(Error::Remote(RemoteError::Sdk { .. }))));
    }
}
