//! Stream entry extraction from raw playlist text
//!
//! Lines are processed in a fixed order:
//!
//! 1. blank lines and comment lines (first non-whitespace character `#`)
//!    are dropped, which also removes `#EXTM3U` / `#EXTINF` directives;
//! 2. lines containing one of [`STREAM_EXTENSIONS`] are kept;
//! 3. kept lines are trimmed.
//!
//! Output order follows input order and duplicates are preserved.

use crate::models::StreamEntry;

/// Literal substrings that mark a line as a media reference
pub const STREAM_EXTENSIONS: [&str; 3] = [".m3u8", ".mp4", ".ts"];

/// Whether a line is skipped before the extension check
fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Whether a line references one of the recognised media extensions
pub fn references_stream(line: &str) -> bool {
    STREAM_EXTENSIONS.iter().any(|ext| line.contains(ext))
}

/// Lazily extract stream entries from playlist text
pub fn stream_entries(content: &str) -> impl Iterator<Item = StreamEntry> + '_ {
    content
        .lines()
        .filter(|line| !is_blank_or_comment(line))
        .filter(|line| references_stream(line))
        .map(|line| StreamEntry::new(line.trim()))
}

/// Extract all stream entries from playlist text
pub fn parse_stream_entries(content: &str) -> Vec<StreamEntry> {
    stream_entries(content).collect()
}
