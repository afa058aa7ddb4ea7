//! Request extractors
//!
//! The KV namespace is handed to handlers explicitly through [`Namespace`]
//! and [`Playlists`]; neither falls back to any global.

use axum::{
    extract::{FromRequestParts, rejection::QueryRejection},
    http::request::Parts,
};
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::errors::AppError;
use crate::services::PlaylistService;
use crate::storage::KvNamespace;

/// Query string extractor whose rejection is a validation error
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

/// The namespace bound to this service
pub struct Namespace(pub Arc<dyn KvNamespace>);

impl FromRequestParts<AppState> for Namespace {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state
            .namespace
            .clone()
            .map(Namespace)
            .ok_or_else(AppError::namespace_unbound)
    }
}

/// A playlist service wired to the bound namespace and the shared fetcher
pub struct Playlists(pub PlaylistService);

impl FromRequestParts<AppState> for Playlists {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Namespace(namespace) = Namespace::from_request_parts(parts, state).await?;
        Ok(Playlists(PlaylistService::new(namespace, state.fetcher.clone())))
    }
}

/// `?url=` of the add route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddSourceParams {
    pub url: Option<String>,
}

/// `?m3u=` or `?url=` of the parser route; `m3u` wins when both are set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParserParams {
    pub m3u: Option<String>,
    pub url: Option<String>,
}

impl ParserParams {
    pub fn playlist_url(&self) -> Option<&str> {
        self.m3u
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .or(self.url.as_deref())
    }
}

/// `?stream=` of the player page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerParams {
    pub stream: Option<String>,
}

/// Output shape of the listing route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// JSON array of source URLs
    #[default]
    Json,
    /// JSON array of sources with their parsed entries
    Detailed,
    /// Pre-rendered HTML fragment
    Html,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub format: ListFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_params_prefer_m3u() {
        let params = ParserParams {
            m3u: Some("http://a/list.m3u".to_string()),
            url: Some("http://b/list.m3u".to_string()),
        };
        assert_eq!(params.playlist_url(), Some("http://a/list.m3u"));

        let params = ParserParams {
            m3u: Some(" ".to_string()),
            url: Some("http://b/list.m3u".to_string()),
        };
        assert_eq!(params.playlist_url(), Some("http://b/list.m3u"));

        assert_eq!(ParserParams::default().playlist_url(), None);
    }
}
