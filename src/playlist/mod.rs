//! Playlist text processing

pub mod parser;

pub use parser::{STREAM_EXTENSIONS, parse_stream_entries, references_stream, stream_entries};
