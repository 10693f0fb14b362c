//! Paginated list responses and the traversal that drains them

use serde::{Deserialize, Serialize};
use std::future::Future;

use super::{ClientError, Result};

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Total number of items, when the server reports it
    #[serde(default)]
    pub count: Option<u64>,
    /// Whether another page follows this one
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
    /// Zero-based page index as echoed by the server
    pub page: u32,
    #[serde(default)]
    pub page_size: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Index of the page to request after this one, if any.
    ///
    /// Derived from the server's echoed page number rather than a local
    /// counter, so server-side renumbering is followed.
    pub fn next_page(&self) -> Result<Option<u32>> {
        if !self.has_next {
            return Ok(None);
        }
        self.page
            .checked_add(1)
            .map(Some)
            .ok_or_else(|| ClientError::Decode(format!("page {} claims a next page", self.page)))
    }

    /// Convert every result, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            has_next: self.has_next,
            has_previous: self.has_previous,
            page: self.page,
            page_size: self.page_size,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Fetch pages starting at page 0 until the server reports no next page.
///
/// Requests are strictly sequential: each request depends on the page number
/// the previous response echoed. A server that never clears `hasNext` keeps
/// this looping.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut next = Some(0);

    while let Some(page) = next {
        let batch = fetch(page).await?;
        tracing::debug!(
            "Fetched page {} ({} results, has_next={})",
            batch.page,
            batch.results.len(),
            batch.has_next
        );
        next = batch.next_page()?;
        items.extend(batch.results);
    }

    Ok(items)
}
