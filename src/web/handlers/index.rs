//! Home page handler

use axum::{extract::State, response::Html};
use tracing::debug;

use crate::{
    config::StorageLayout,
    errors::AppResult,
    web::{
        AppState,
        extractors::Playlists,
        templates::{HomeTemplate, LegacyHomeTemplate, render},
    },
};

/// Serve the home page for the configured storage layout
///
/// In the per-source layout every stored playlist is fetched and parsed in
/// turn; a source that cannot be fetched is shown with no streams.
pub async fn index(
    State(state): State<AppState>,
    Playlists(service): Playlists,
) -> AppResult<Html<String>> {
    match state.layout() {
        StorageLayout::PerSource => {
            let listings = service.list_with_streams().await?;
            debug!("Rendering home page with {} sources", listings.len());
            render(&HomeTemplate::new(listings))
        }
        StorageLayout::SingleBlob => {
            let playlist = service
                .legacy_playlist()
                .await?
                .unwrap_or_else(|| "No M3U data available.".to_string());
            render(&LegacyHomeTemplate {
                playlist,
                can_refresh: state.upstream_url().is_some(),
            })
        }
    }
}
