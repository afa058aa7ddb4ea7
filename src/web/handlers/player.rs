//! Player page handlers

use axum::{extract::Path, response::Html};

use crate::{
    errors::{AppError, AppResult},
    web::{
        extractors::{PlayerParams, Query},
        templates::{PlayerTemplate, render},
    },
};

/// `/play/?stream=<url>`
pub async fn player_page(Query(params): Query<PlayerParams>) -> AppResult<Html<String>> {
    render_player(params.stream.as_deref(), None)
}

/// `/play/<id>`, where the `stream` query parameter still takes precedence
pub async fn player_page_for_id(
    Path(id): Path<String>,
    Query(params): Query<PlayerParams>,
) -> AppResult<Html<String>> {
    render_player(params.stream.as_deref(), Some(&id))
}

fn render_player(stream: Option<&str>, path_id: Option<&str>) -> AppResult<Html<String>> {
    let stream_url = stream
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| path_id.map(str::trim).filter(|s| !s.is_empty()))
        .ok_or_else(|| AppError::validation("Missing stream parameter"))?;

    render(&PlayerTemplate::new(stream_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parameter_wins_over_path() {
        let html = render_player(Some("http://x/query.m3u8"), Some("path.mp4"))
            .unwrap()
            .0;
        assert!(html.contains("http://x/query.m3u8"));
        assert!(!html.contains("path.mp4"));
    }

    #[test]
    fn test_path_segment_fallback() {
        let html = render_player(None, Some("channel-7.m3u8")).unwrap().0;
        assert!(html.contains("channel-7.m3u8"));
    }

    #[test]
    fn test_missing_stream_is_validation_error() {
        let err = render_player(Some("  "), None).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
