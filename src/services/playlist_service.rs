//! Playlist ingestion and listing
//!
//! Fetch failures are handled differently per path: the aggregated listing
//! degrades a failing source to an empty entry list, while the single
//! resource parser propagates the error to the caller.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{PlaylistSource, SourceListing, StoredKeySet, StreamEntry};
use crate::playlist::parse_stream_entries;
use crate::repositories::PlaylistSourceRepository;
use crate::sources::PlaylistFetcher;
use crate::storage::KvNamespace;
use crate::utils::url::UrlUtils;

/// Return a required parameter exactly as given; whitespace alone counts as missing
pub fn require_param<'a>(value: Option<&'a str>, name: &str) -> AppResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::validation(format!("Missing {name} parameter"))),
    }
}

/// Return a required parameter that must carry an http(s) scheme
pub fn require_http_url<'a>(value: Option<&'a str>, name: &str) -> AppResult<&'a str> {
    let url = require_param(value, name)?;
    if UrlUtils::has_http_scheme(url) {
        Ok(url)
    } else {
        Err(AppError::validation("Invalid URL"))
    }
}

#[derive(Clone)]
pub struct PlaylistService {
    repository: PlaylistSourceRepository,
    fetcher: Arc<dyn PlaylistFetcher>,
}

impl PlaylistService {
    pub fn new(namespace: Arc<dyn KvNamespace>, fetcher: Arc<dyn PlaylistFetcher>) -> Self {
        Self {
            repository: PlaylistSourceRepository::new(namespace),
            fetcher,
        }
    }

    /// Validate and store a new playlist source
    pub async fn add_source(&self, url: Option<&str>) -> AppResult<PlaylistSource> {
        let url = require_http_url(url, "url")?;
        let source = PlaylistSource::new(url);

        self.repository.add(&source).await?;
        info!(
            "Added playlist source: {}",
            UrlUtils::obfuscate_credentials(source.as_str())
        );
        Ok(source)
    }

    /// Every stored source, without fetching anything
    pub async fn list_sources(&self) -> AppResult<StoredKeySet> {
        Ok(self.repository.list().await?)
    }

    /// Fetch and parse one playlist, propagating fetch failures
    pub async fn parse_remote(&self, url: Option<&str>) -> AppResult<Vec<StreamEntry>> {
        let url = require_http_url(url, "url")?;
        let content = self.fetcher.fetch_text(url).await?;
        let entries = parse_stream_entries(&content);

        debug!(
            "Parsed {} stream entries from {}",
            entries.len(),
            UrlUtils::obfuscate_credentials(url)
        );
        Ok(entries)
    }

    /// Fetch and parse every stored source, one at a time in listing order
    ///
    /// A source whose fetch fails contributes an empty entry list and does
    /// not affect the others.
    pub async fn list_with_streams(&self) -> AppResult<Vec<SourceListing>> {
        let sources = self.repository.list().await?;
        let mut listings = Vec::with_capacity(sources.len());

        for source in sources {
            match self.fetcher.fetch_text(source.as_str()).await {
                Ok(content) => {
                    let streams = parse_stream_entries(&content);
                    debug!(
                        "Source {} yielded {} entries",
                        UrlUtils::obfuscate_credentials(source.as_str()),
                        streams.len()
                    );
                    listings.push(SourceListing::loaded(source, streams));
                }
                Err(e) => {
                    warn!("Degrading playlist source to empty listing: {}", e);
                    listings.push(SourceListing::degraded(source, e.to_string()));
                }
            }
        }

        Ok(listings)
    }

    /// Raw text of the single-blob playlist, if one was stored
    pub async fn legacy_playlist(&self) -> AppResult<Option<String>> {
        Ok(self.repository.legacy_playlist().await?)
    }

    /// Copy the upstream playlist into the single-blob key
    ///
    /// Returns the number of bytes stored.
    pub async fn refresh_legacy_playlist(&self, upstream_url: Option<&str>) -> AppResult<usize> {
        let upstream_url = upstream_url
            .ok_or_else(|| AppError::configuration("Upstream playlist URL is not configured"))?;

        let content = self.fetcher.fetch_text(upstream_url).await?;
        self.repository.store_legacy_playlist(&content).await?;

        info!(
            "Refreshed stored playlist from {} ({} bytes)",
            UrlUtils::obfuscate_credentials(upstream_url),
            content.len()
        );
        Ok(content.len())
    }
}
