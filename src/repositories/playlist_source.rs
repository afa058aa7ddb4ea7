//! Playlist source access pattern over a KV namespace
//!
//! Per-source layout: one key per source URL, value [`SOURCE_MARKER`].
//! Single-blob layout: raw playlist text under [`LEGACY_PLAYLIST_KEY`].
//! The two layouts never share a namespace.

use std::sync::Arc;
use tracing::debug;

use crate::errors::StorageResult;
use crate::models::{LEGACY_PLAYLIST_KEY, PlaylistSource, SOURCE_MARKER, StoredKeySet};
use crate::storage::KvNamespace;

#[derive(Clone)]
pub struct PlaylistSourceRepository {
    namespace: Arc<dyn KvNamespace>,
}

impl PlaylistSourceRepository {
    pub fn new(namespace: Arc<dyn KvNamespace>) -> Self {
        Self { namespace }
    }

    /// Store a source, overwriting any existing entry with the same URL
    pub async fn add(&self, source: &PlaylistSource) -> StorageResult<()> {
        debug!(backend = self.namespace.backend_name(), "Storing playlist source");
        self.namespace.put(source.as_str(), SOURCE_MARKER).await
    }

    /// Enumerate every stored source in one listing call
    pub async fn list(&self) -> StorageResult<StoredKeySet> {
        let keys = self.namespace.list().await?;
        Ok(keys.into_iter().map(PlaylistSource::new).collect())
    }

    /// Look up a single source by URL
    pub async fn get(&self, url: &str) -> StorageResult<Option<PlaylistSource>> {
        Ok(self
            .namespace
            .get(url)
            .await?
            .map(|_| PlaylistSource::new(url)))
    }

    /// Raw playlist text of the single-blob layout
    pub async fn legacy_playlist(&self) -> StorageResult<Option<String>> {
        self.namespace.get(LEGACY_PLAYLIST_KEY).await
    }

    /// Overwrite the single-blob playlist text
    pub async fn store_legacy_playlist(&self, content: &str) -> StorageResult<()> {
        self.namespace.put(LEGACY_PLAYLIST_KEY, content).await
    }
}
