//! Error type definitions for the playlist service
//!
//! The set of error kinds is closed: every failure a handler can surface is
//! one of the [`AppError`] variants, and the web layer maps each variant to a
//! status code in exactly one place (`web::responses`).

use thiserror::Error;

use crate::utils::url::UrlUtils;

/// Top-level application error type
///
/// The `Display` output of each variant is the bare message that is echoed
/// back to the client, so variants do not prefix their own category.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required runtime dependency (such as the KV namespace) is missing
    #[error("{message}")]
    Configuration { message: String },

    /// A required request parameter is missing or malformed
    #[error("{message}")]
    Validation { message: String },

    /// Retrieving a remote playlist failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The key-value backend rejected an operation
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No route matched the request path
    #[error("Not Found")]
    NotFound { path: String },

    /// Failures with no more specific kind, such as template rendering
    #[error("{message}")]
    Internal { message: String },
}

/// Errors raised while fetching remote playlist content
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be used for an outbound request
    #[error("Invalid playlist URL: {url}")]
    InvalidUrl { url: String },

    /// Connection, DNS or transport failure
    #[error("Failed to fetch {url}: {message}")]
    Request { url: String, message: String },

    /// The remote answered with a non-success status
    #[error("Upstream returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The body could not be read or decoded as text
    #[error("Failed to decode response body from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Errors raised by key-value namespace backends
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite backend failures
    #[error("KV storage error: {0}")]
    Sqlite(#[from] sqlx::Error),
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a not found error for an unmatched path
    pub fn not_found<P: Into<String>>(path: P) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Error returned when no KV namespace is bound to the service
    pub fn namespace_unbound() -> Self {
        Self::configuration("KV Namespace is not defined")
    }
}

impl FetchError {
    /// Create an invalid URL error
    pub fn invalid_url(url: &str) -> Self {
        Self::InvalidUrl {
            url: UrlUtils::obfuscate_credentials(url),
        }
    }

    /// Create a transport failure error
    pub fn request<M: Into<String>>(url: &str, message: M) -> Self {
        Self::Request {
            url: UrlUtils::obfuscate_credentials(url),
            message: message.into(),
        }
    }

    /// Create a non-success status error
    pub fn status(url: &str, status: u16) -> Self {
        Self::Status {
            url: UrlUtils::obfuscate_credentials(url),
            status,
        }
    }

    /// Create a body decode error
    pub fn decode<M: Into<String>>(url: &str, message: M) -> Self {
        Self::Decode {
            url: UrlUtils::obfuscate_credentials(url),
            message: message.into(),
        }
    }
}
