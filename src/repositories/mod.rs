//! Data access over the KV namespace

pub mod playlist_source;

pub use playlist_source::PlaylistSourceRepository;
