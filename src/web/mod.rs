//! Web layer module
//!
//! Thin axum handlers over [`crate::services::PlaylistService`]. The router
//! is assembled per storage layout, and every request passes the namespace
//! guard before any route sees it.

use anyhow::Result;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{MethodRouter, any},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

use crate::{
    config::{Config, StorageLayout},
    sources::PlaylistFetcher,
    storage::KvNamespace,
};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod templates;

pub use responses::{MessageResponse, StreamsResponse};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no `[kv]` section is configured
    pub namespace: Option<Arc<dyn KvNamespace>>,
    pub fetcher: Arc<dyn PlaylistFetcher>,
}

impl AppState {
    pub fn new(
        config: Config,
        namespace: Option<Arc<dyn KvNamespace>>,
        fetcher: Arc<dyn PlaylistFetcher>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            namespace,
            fetcher,
        }
    }

    pub fn layout(&self) -> StorageLayout {
        self.config
            .kv
            .as_ref()
            .map(|kv| kv.layout)
            .unwrap_or_default()
    }

    pub fn upstream_url(&self) -> Option<&str> {
        self.config
            .kv
            .as_ref()
            .and_then(|kv| kv.upstream_url.as_deref())
    }
}

/// Register `path` and everything below it on a segment boundary
///
/// `{*rest}` never matches an empty remainder, so `path/` is its own route.
fn prefix_route(router: Router<AppState>, path: &str, handler: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler.clone())
        .route(&format!("{path}/{{*rest}}"), handler)
}

/// Build the application router for the configured layout
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", any(handlers::index::index))
        .route("/play/", any(handlers::player::player_page))
        .route("/play/{*id}", any(handlers::player::player_page_for_id));

    router = prefix_route(router, "/api/m3u-parser", any(handlers::playlists::m3u_parser));

    router = match state.layout() {
        StorageLayout::PerSource => {
            let router = prefix_route(router, "/api/add-m3u", any(handlers::playlists::add_m3u));
            prefix_route(router, "/api/get-m3u", any(handlers::playlists::get_m3u))
        }
        StorageLayout::SingleBlob => router
            .route("/api/m3u", any(handlers::legacy::get_stored_playlist))
            .route("/api/update-m3u", any(handlers::legacy::update_stored_playlist)),
    };

    router
        .fallback(handlers::not_found)
        // Middleware (applied in reverse order)
        .layer(from_fn_with_state(state.clone(), middleware::require_namespace))
        .layer(from_fn_with_state(state.clone(), middleware::request_logging_middleware))
        .layer(CatchPanicLayer::custom(responses::panic_response))
        .with_state(state)
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr =
            format!("{}:{}", state.config.web.host, state.config.web.port).parse()?;
        let app = create_router(state);
        Ok(Self { app, addr })
    }

    /// Start the web server and run until ctrl-c
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Listening on http://{}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
