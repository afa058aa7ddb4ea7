//! HTTP response types and error mapping
//!
//! [`AppError`] is turned into a response in exactly one place, here.
//! Validation failures answer with a JSON message, everything else with a
//! plain-text body.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{debug, error, warn};

use crate::errors::AppError;
use crate::models::StreamEntry;

/// `{"message": "..."}` body used by the add route and validation failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self::new(format!("Error: {message}"))
    }
}

/// `{"streams": [...]}` body of the parser route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamsResponse {
    pub streams: Vec<StreamEntry>,
}

/// Plain-text response with an explicit content type
pub fn plain_text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match &self {
            AppError::Validation { .. } => {
                warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, Json(MessageResponse::error(&message))).into_response()
            }
            AppError::NotFound { path } => {
                debug!("No route for {}", path);
                plain_text(StatusCode::NOT_FOUND, message)
            }
            AppError::Configuration { .. }
            | AppError::Fetch(_)
            | AppError::Storage(_)
            | AppError::Internal { .. } => {
                error!("Request failed: {}", message);
                plain_text(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error: {message}"),
                )
            }
        }
    }
}

/// Response for a handler that panicked
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AppError::internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FetchError, StorageError};

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_json_400() {
        let response = AppError::validation("Missing url parameter").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["message"], "Error: Missing url parameter");
    }

    #[tokio::test]
    async fn test_server_side_errors_echo_message() {
        let cases = vec![
            (AppError::namespace_unbound(), "Error: KV Namespace is not defined"),
            (
                AppError::from(StorageError::from(sqlx::Error::RowNotFound)),
                "Error: KV storage error: no rows returned by a query that expected to return at least one row",
            ),
            (
                AppError::from(FetchError::status("http://x/list.m3u", 404)),
                "Error: Upstream returned HTTP 404 for http://x/list.m3u",
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body_text(response).await, expected);
        }
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::not_found("/nope").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not Found");
    }

    #[tokio::test]
    async fn test_panic_payloads() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Error: boom");

        let response = panic_response(Box::new(String::from("owned boom")));
        assert_eq!(body_text(response).await, "Error: owned boom");
    }
}
