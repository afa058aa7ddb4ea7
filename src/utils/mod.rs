//! Utility helpers shared across layers

pub mod url;

pub use url::UrlUtils;
