//! Parallel loading of paginated datasets.
//!
//! The total record count is asked once, then one task per page is spawned and
//! all of them are joined before anything is returned. Pages are concatenated
//! by index, never by completion order. A single failed page fails the whole load.

use std::sync::Arc;

use async_trait::async_trait;
use pocs_core::{PageRequest, page_count};
use reqwest::StatusCode;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cache::MemoCache;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status { status: StatusCode, url: String },
    #[error("page {page} failed: {source}")]
    Page {
        page: usize,
        #[source]
        source: Box<FetchError>,
    },
    #[error("page task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A paginated record collection.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    type Record: Send + 'static;

    /// Identity of the query, used to memoize the total count
    fn query_key(&self) -> String;

    async fn total_count(&self) -> Result<u64, FetchError>;

    async fn fetch_page(&self, page: PageRequest) -> Result<Vec<Self::Record>, FetchError>;
}

/// Fetch `pages` pages concurrently and concatenate them in page order.
pub async fn fetch_pages<S: PageSource>(
    source: Arc<S>,
    pages: usize,
) -> Result<Vec<S::Record>, FetchError> {
    let mut tasks = JoinSet::new();
    for index in 0..pages {
        let source = source.clone();
        tasks.spawn(async move {
            let page = PageRequest::new(index);
            debug!("Fetching page {} (offset {})", index, page.offset);
            (index, source.fetch_page(page).await)
        });
    }

    // Each task owns its slot; nothing is read until every task has finished.
    let mut slots: Vec<Option<Vec<S::Record>>> = (0..pages).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        match result {
            Ok(records) => slots[index] = Some(records),
            Err(e) => {
                warn!("Page {} of {} failed, abandoning load: {}", index, pages, e);
                tasks.abort_all();
                return Err(FetchError::Page {
                    page: index,
                    source: Box::new(e),
                });
            }
        }
    }

    Ok(slots.into_iter().flatten().flatten().collect())
}

/// Load every record of `source`, asking for the total count at most once per cache lifetime.
pub async fn fetch_all<S: PageSource>(
    source: Arc<S>,
    counts: &MemoCache<String, u64>,
) -> Result<Vec<S::Record>, FetchError> {
    let key = source.query_key();
    let total = counts
        .get_or_try_insert_with(key.clone(), || {
            let source = source.clone();
            async move { source.total_count().await }
        })
        .await?;

    let pages = page_count(total);
    let records = fetch_pages(source, pages).await?;
    info!(
        "Loaded {} records for {} ({} pages, total_count {})",
        records.len(),
        key,
        pages,
        total
    );
    Ok(records)
}
