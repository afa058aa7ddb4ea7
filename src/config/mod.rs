use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

use crate::utils::url::UrlUtils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    /// KV namespace binding. When the section is absent the service still
    /// starts, but every request is answered with a configuration error.
    pub kv: Option<KvConfig>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which key-value backend provides the namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KvBackend {
    /// Process-local map, lost on restart
    Memory,
    /// SQLite database through sqlx
    #[default]
    Sqlite,
}

/// How playlists are laid out inside the namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLayout {
    /// One key per playlist source URL holding a constant marker
    #[default]
    PerSource,
    /// A single `m3u_list` key holding raw playlist text
    SingleBlob,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvConfig {
    #[serde(default)]
    pub backend: KvBackend,
    #[serde(default = "default_kv_url")]
    pub url: String,
    #[serde(default = "default_kv_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub layout: StorageLayout,
    /// Remote playlist copied into `m3u_list` by the single-blob refresh route
    pub upstream_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_kv_url() -> String {
    DEFAULT_KV_URL.to_string()
}

fn default_kv_max_connections() -> u32 {
    DEFAULT_KV_MAX_CONNECTIONS
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            backend: KvBackend::default(),
            url: default_kv_url(),
            max_connections: default_kv_max_connections(),
            layout: StorageLayout::default(),
            upstream_url: None,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            kv: Some(KvConfig::default()),
            fetch: FetchConfig::default(),
        }
    }
}

impl KvConfig {
    /// In-memory namespace, mostly useful for tests and throwaway instances
    pub fn memory(layout: StorageLayout) -> Self {
        Self {
            backend: KvBackend::Memory,
            layout,
            ..Self::default()
        }
    }
}

impl Config {
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Self::from_toml(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reject settings that would only fail later at request time
    pub fn validate(&self) -> Result<()> {
        if let Some(kv) = &self.kv {
            if kv.backend == KvBackend::Sqlite && kv.url.trim().is_empty() {
                bail!("kv.url must be set when the sqlite backend is selected");
            }
            if kv.max_connections == 0 {
                bail!("kv.max_connections must be at least 1");
            }
            if let Some(upstream) = &kv.upstream_url {
                if !UrlUtils::has_http_scheme(upstream) {
                    bail!("kv.upstream_url must be an http(s) URL, got '{}'", upstream);
                }
            }
        }
        Ok(())
    }
}
