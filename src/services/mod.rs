//! Business logic layer

pub mod playlist_service;

pub use playlist_service::PlaylistService;
