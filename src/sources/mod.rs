//! Remote playlist retrieval

pub mod http;
pub mod traits;

pub use http::HttpPlaylistFetcher;
pub use traits::PlaylistFetcher;

#[cfg(test)]
pub use traits::MockPlaylistFetcher;
