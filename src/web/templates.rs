//! Page rendering
//!
//! Every value interpolated into a page is encoded for the context it lands
//! in: askama HTML-escapes `{{ }}` output (text and quoted attributes),
//! values placed inside inline scripts go through [`script_string_literal`],
//! and URLs placed in query strings are percent-encoded.

use askama::Template;
use axum::response::Html;

use crate::errors::{AppError, AppResult};
use crate::models::{SourceListing, StreamKind};
use crate::utils::url::UrlUtils;

/// Encode a value as a JavaScript string literal safe inside `<script>`
///
/// JSON string encoding covers quotes and control characters; `<`, `>` and
/// `&` are additionally escaped so the literal can never close the script
/// element, and U+2028/U+2029 so older engines do not see a line break.
pub fn script_string_literal(value: &str) -> String {
    let json = serde_json::Value::String(value.to_owned()).to_string();

    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a template into an HTML response body
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::internal(format!("Failed to render page: {e}")))
}

/// Link from a listed entry to the player page
#[derive(Debug, Clone)]
pub struct StreamLink {
    pub url: String,
    pub play_href: String,
}

impl StreamLink {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            play_href: format!("/play/?stream={}", UrlUtils::encode_query_value(url)),
        }
    }
}

/// One stored source as shown on the home page
#[derive(Debug, Clone)]
pub struct SourceView {
    pub url: String,
    pub domain: String,
    /// Empty when the source was fetched successfully
    pub error: String,
    pub streams: Vec<StreamLink>,
}

impl From<SourceListing> for SourceView {
    fn from(listing: SourceListing) -> Self {
        let domain = UrlUtils::extract_domain(&listing.url).unwrap_or_else(|| listing.url.clone());
        let streams = listing
            .streams
            .iter()
            .map(|entry| StreamLink::new(entry.as_str()))
            .collect();

        Self {
            url: listing.url,
            domain,
            error: listing.error.unwrap_or_default(),
            streams,
        }
    }
}

fn source_views(listings: Vec<SourceListing>) -> Vec<SourceView> {
    listings.into_iter().map(SourceView::from).collect()
}

/// Management page of the per-source layout
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub sources: Vec<SourceView>,
}

impl HomeTemplate {
    pub fn new(listings: Vec<SourceListing>) -> Self {
        Self {
            sources: source_views(listings),
        }
    }
}

/// Source list without page chrome, served by the listing route
#[derive(Template)]
#[template(path = "sources_fragment.html")]
pub struct SourcesFragmentTemplate {
    pub sources: Vec<SourceView>,
}

impl SourcesFragmentTemplate {
    pub fn new(listings: Vec<SourceListing>) -> Self {
        Self {
            sources: source_views(listings),
        }
    }
}

/// Home page of the single-blob layout
#[derive(Template)]
#[template(path = "legacy_home.html")]
pub struct LegacyHomeTemplate {
    pub playlist: String,
    pub can_refresh: bool,
}

/// Video player for one stream URL
#[derive(Template)]
#[template(path = "player.html")]
pub struct PlayerTemplate {
    pub stream_url: String,
    pub mime_type: &'static str,
    pub is_hls: bool,
    /// Only http(s) URLs are offered as a clickable link
    pub has_direct_link: bool,
    pub stream_url_js: String,
    pub mime_type_js: String,
}

impl PlayerTemplate {
    pub fn new(stream_url: &str) -> Self {
        let kind = StreamKind::detect(stream_url);
        let mime_type = kind.mime_type();

        Self {
            stream_url: stream_url.to_string(),
            mime_type,
            is_hls: matches!(kind, StreamKind::Hls | StreamKind::Unknown),
            has_direct_link: UrlUtils::has_http_scheme(stream_url),
            stream_url_js: script_string_literal(stream_url),
            mime_type_js: script_string_literal(mime_type),
        }
    }
}
