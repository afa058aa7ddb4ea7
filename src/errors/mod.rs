//! Centralized error handling
//!
//! # Error Categories
//!
//! - **Configuration**: the KV namespace binding is missing
//! - **Validation**: missing or malformed query parameters
//! - **Fetch**: remote playlist retrieval failures
//! - **Storage**: key-value backend failures
//! - **NotFound**: unmatched routes
//! - **Internal**: anything else, such as template rendering failures

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for fetcher Results
pub type FetchResult<T> = Result<T, FetchError>;

/// Convenience type alias for namespace Results
pub type StorageResult<T> = Result<T, StorageError>;
