//! reqwest-backed playlist fetcher

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::PlaylistFetcher;
use crate::config::FetchConfig;
use crate::errors::{FetchError, FetchResult};
use crate::utils::url::UrlUtils;

/// HTTP fetcher with a connect timeout only
///
/// A slow upstream can still hold a request open for as long as it keeps
/// sending; only connection establishment is bounded.
#[derive(Clone)]
pub struct HttpPlaylistFetcher {
    client: Client,
}

impl HttpPlaylistFetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        Self::with_connection_timeout(config.connect_timeout, &config.user_agent)
    }

    /// Create a fetcher with an explicit connect timeout and user agent
    pub fn with_connection_timeout(connect_timeout: Duration, user_agent: &str) -> FetchResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::request("<client>", format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let display_url = UrlUtils::obfuscate_credentials(url);

        let parsed = UrlUtils::parse_and_validate(url).map_err(|_| FetchError::invalid_url(url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::invalid_url(url));
        }

        debug!("Fetching playlist from: {}", display_url);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::request(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status.as_u16()));
        }

        let content = response
            .text()
            .await
            .map_err(|e| FetchError::decode(url, e.to_string()))?;

        debug!("Fetched {} bytes from {}", content.len(), display_url);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpPlaylistFetcher {
        HttpPlaylistFetcher::new(&FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_unparseable_url() {
        let err = fetcher().fetch_text("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let err = fetcher().fetch_text("file:///etc/hosts").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
