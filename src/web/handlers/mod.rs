//! HTTP request handlers organized by page / API area

pub mod index;
pub mod legacy;
pub mod player;
pub mod playlists;

use axum::http::Uri;

use crate::errors::AppError;

/// Fallback for every path no route claims
pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(uri.path())
}
