//! M3U playlist manager and web player backed by a key-value namespace

pub mod config;
pub mod errors;
pub mod models;
pub mod playlist;
pub mod repositories;
pub mod services;
pub mod sources;
pub mod storage;
pub mod utils;
pub mod web;
