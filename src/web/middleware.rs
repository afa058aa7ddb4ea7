//! HTTP middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::AppState;
use crate::errors::AppError;

/// Request logging middleware
///
/// Every request runs inside a `request` span carrying a fresh id, the
/// method and path, the namespace backend and the storage layout. Only the
/// path is recorded: query strings may carry playlist credentials.
pub async fn request_logging_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let backend = state
        .namespace
        .as_ref()
        .map_or("unbound", |namespace| namespace.backend_name());
    let span = info_span!(
        "request",
        id = %uuid::Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
        backend = backend,
        layout = ?state.layout(),
    );

    async move {
        debug!("Request received");
        let response = next.run(request).await;
        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status.is_server_error() {
            error!(status = status.as_u16(), elapsed_ms, "Request failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), elapsed_ms, "Request rejected");
        } else {
            info!(status = status.as_u16(), elapsed_ms, "Request served");
        }
        response
    }
    .instrument(span)
    .await
}

/// Reject every request before routing when no namespace is bound
pub async fn require_namespace(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.namespace.is_none() {
        return AppError::namespace_unbound().into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, KvConfig, StorageLayout};
    use crate::sources::MockPlaylistFetcher;
    use crate::storage::MemoryNamespace;
    use crate::web::create_router;
    use axum_test::TestServer;
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn test_request_span_names_backend_and_layout() {
        let config = Config {
            kv: Some(KvConfig::memory(StorageLayout::SingleBlob)),
            ..Config::default()
        };
        let state = AppState::new(
            config,
            Some(Arc::new(MemoryNamespace::new())),
            Arc::new(MockPlaylistFetcher::new()),
        );
        let server = TestServer::new(create_router(state)).unwrap();

        server.get("/nope?password=hunter2").await;

        assert!(logs_contain("Request rejected"));
        assert!(logs_contain("memory"));
        assert!(logs_contain("SingleBlob"));
        assert!(!logs_contain("hunter2"));
    }
}
