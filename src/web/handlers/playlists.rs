//! Playlist API handlers

use axum::{
    Json,
    response::{IntoResponse, Response},
};

use crate::{
    errors::AppResult,
    web::{
        extractors::{AddSourceParams, ListFormat, ListParams, ParserParams, Playlists, Query},
        responses::{MessageResponse, StreamsResponse},
        templates::{SourcesFragmentTemplate, render},
    },
};

/// Store a playlist source given as `?url=`
pub async fn add_m3u(
    Playlists(service): Playlists,
    Query(params): Query<AddSourceParams>,
) -> AppResult<Json<MessageResponse>> {
    service.add_source(params.url.as_deref()).await?;
    Ok(Json(MessageResponse::new("M3U URL added successfully")))
}

/// List stored sources as URLs, detailed JSON or an HTML fragment
pub async fn get_m3u(
    Playlists(service): Playlists,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let response = match params.format {
        ListFormat::Json => {
            let urls: Vec<String> = service
                .list_sources()
                .await?
                .into_iter()
                .map(|source| source.url)
                .collect();
            Json(urls).into_response()
        }
        ListFormat::Detailed => Json(service.list_with_streams().await?).into_response(),
        ListFormat::Html => {
            let listings = service.list_with_streams().await?;
            render(&SourcesFragmentTemplate::new(listings))?.into_response()
        }
    };
    Ok(response)
}

/// Fetch and parse one playlist given as `?m3u=` or `?url=`
pub async fn m3u_parser(
    Playlists(service): Playlists,
    Query(params): Query<ParserParams>,
) -> AppResult<Json<StreamsResponse>> {
    let streams = service.parse_remote(params.playlist_url()).await?;
    Ok(Json(StreamsResponse { streams }))
}
