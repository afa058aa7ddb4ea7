//! Single-blob layout handlers
//!
//! Failures here keep their own wording: `KV Error` for reading the stored
//! playlist and `M3U Fetch Error` for anything that goes wrong while
//! refreshing it.

use axum::{extract::State, http::StatusCode, response::Response};
use tracing::error;

use crate::web::{AppState, extractors::Playlists, responses::plain_text};

/// Raw stored playlist text
pub async fn get_stored_playlist(Playlists(service): Playlists) -> Response {
    match service.legacy_playlist().await {
        Ok(playlist) => plain_text(
            StatusCode::OK,
            playlist.unwrap_or_else(|| "No M3U data stored.".to_string()),
        ),
        Err(e) => {
            error!("Reading stored playlist failed: {}", e);
            plain_text(StatusCode::INTERNAL_SERVER_ERROR, format!("KV Error: {e}"))
        }
    }
}

/// Overwrite the stored playlist with the configured upstream
pub async fn update_stored_playlist(
    State(state): State<AppState>,
    Playlists(service): Playlists,
) -> Response {
    match service.refresh_legacy_playlist(state.upstream_url()).await {
        Ok(_) => plain_text(
            StatusCode::OK,
            "M3U List Updated Successfully!".to_string(),
        ),
        Err(e) => {
            error!("Upstream refresh failed: {}", e);
            plain_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("M3U Fetch Error: {e}"),
            )
        }
    }
}
