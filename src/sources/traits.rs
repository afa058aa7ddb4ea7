//! Fetcher trait for remote playlist documents

use async_trait::async_trait;

use crate::errors::FetchResult;

/// Retrieves the full text of a remote playlist
///
/// Implementations perform a single attempt: no retry and no total-request
/// timeout. Callers decide whether a failure is propagated or degraded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    /// Fetch the body at `url` decoded as text
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;
}
