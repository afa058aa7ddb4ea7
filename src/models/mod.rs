//! Domain types shared by the store, parser, service and web layers

use serde::{Deserialize, Serialize};

/// Marker value written for every stored playlist source
pub const SOURCE_MARKER: &str = "stored";

/// Fixed key holding the raw playlist text in the single-blob layout
pub const LEGACY_PLAYLIST_KEY: &str = "m3u_list";

/// A remote playlist document, identified by its URL
///
/// The URL is the unique key in the namespace. Sources are never mutated once
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistSource {
    pub url: String,
}

impl PlaylistSource {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for PlaylistSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// A trimmed playlist line believed to reference playable media
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamEntry(String);

impl StreamEntry {
    pub fn new<S: Into<String>>(line: S) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for StreamEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Media container inferred from a stream URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Hls,
    Mp4,
    MpegTs,
    Unknown,
}

impl StreamKind {
    /// Classify by substring, checking `.m3u8` first so that HLS playlists
    /// served with a `.ts` somewhere in their query are still treated as HLS
    pub fn detect(url: &str) -> Self {
        let lowered = url.to_ascii_lowercase();
        if lowered.contains(".m3u8") {
            Self::Hls
        } else if lowered.contains(".mp4") {
            Self::Mp4
        } else if lowered.contains(".ts") {
            Self::MpegTs
        } else {
            Self::Unknown
        }
    }

    /// MIME type used for the `<source>` element of the player page
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Hls => "application/x-mpegURL",
            Self::Mp4 => "video/mp4",
            Self::MpegTs => "video/mp2t",
            Self::Unknown => "application/x-mpegURL",
        }
    }
}

/// The result of one namespace enumeration, in listing order
pub type StoredKeySet = Vec<PlaylistSource>;

/// A stored source together with the entries derived from it
///
/// `error` carries the fetch failure message when the entries could not be
/// derived; `streams` is empty in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceListing {
    pub url: String,
    pub streams: Vec<StreamEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceListing {
    pub fn loaded(source: PlaylistSource, streams: Vec<StreamEntry>) -> Self {
        Self {
            url: source.url,
            streams,
            error: None,
        }
    }

    pub fn degraded(source: PlaylistSource, error: String) -> Self {
        Self {
            url: source.url,
            streams: Vec::new(),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_kind_detection() {
        assert_eq!(StreamKind::detect("http://x/live/index.m3u8"), StreamKind::Hls);
        assert_eq!(StreamKind::detect("http://x/movie.MP4"), StreamKind::Mp4);
        assert_eq!(StreamKind::detect("http://x/seg001.ts"), StreamKind::MpegTs);
        assert_eq!(StreamKind::detect("http://x/a.m3u8?seg=1.ts"), StreamKind::Hls);
        assert_eq!(StreamKind::detect("http://x/radio"), StreamKind::Unknown);
    }

    #[test]
    fn test_listing_serialization_omits_missing_error() {
        let listing = SourceListing::loaded(
            PlaylistSource::new("http://x/list.m3u"),
            vec![StreamEntry::new("http://x/a.m3u8")],
        );
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "http://x/list.m3u", "streams": ["http://x/a.m3u8"]})
        );

        let degraded = SourceListing::degraded(
            PlaylistSource::new("http://down/list.m3u"),
            "connection refused".to_string(),
        );
        let json = serde_json::to_value(&degraded).unwrap();
        assert_eq!(json["streams"], serde_json::json!([]));
        assert_eq!(json["error"], "connection refused");
    }
}
