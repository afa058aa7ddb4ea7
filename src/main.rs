use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_kv_player::{
    config::{Config, KvBackend},
    sources::HttpPlaylistFetcher,
    storage::open_namespace,
    utils::UrlUtils,
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "m3u-kv-player")]
#[command(version)]
#[command(about = "Store M3U playlist URLs in a key-value namespace and play their streams")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// KV storage URL (overrides config file)
    #[arg(short = 'k', long, value_name = "URL")]
    kv_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("m3u_kv_player={},tower_http=trace", cli.log_level)
    } else {
        format!("m3u_kv_player={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting M3U KV Player v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(kv_url) = cli.kv_url {
        if let Some(kv) = config.kv.as_mut() {
            kv.url = kv_url;
        } else {
            warn!("Ignoring --kv-url: no [kv] section is configured");
        }
    }

    let namespace = match &config.kv {
        Some(kv) => {
            let namespace = open_namespace(kv).await?;
            match kv.backend {
                KvBackend::Sqlite => info!("Using KV storage: {}", kv.url),
                KvBackend::Memory => info!("Using in-memory KV storage"),
            }
            info!("Storage layout: {:?}", kv.layout);
            if let Some(upstream) = &kv.upstream_url {
                info!("Upstream playlist: {}", UrlUtils::obfuscate_credentials(upstream));
            }
            Some(namespace)
        }
        None => {
            warn!("No [kv] section configured; every request will fail until a namespace is bound");
            None
        }
    };

    let fetcher = Arc::new(HttpPlaylistFetcher::new(&config.fetch)?);

    let server = WebServer::new(AppState::new(config, namespace, fetcher))?;
    info!("Web server configured on {}:{}", server.host(), server.port());

    server.serve().await?;

    info!("Shut down cleanly");
    Ok(())
}
