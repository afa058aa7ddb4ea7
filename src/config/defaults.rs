/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// KV namespace defaults
pub const DEFAULT_KV_URL: &str = "sqlite://./m3u-kv-player.db";
pub const DEFAULT_KV_MAX_CONNECTIONS: u32 = 5;

// Outbound fetch defaults
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("m3u-kv-player/", env!("CARGO_PKG_VERSION"));
