//! Shared fixtures for route-level tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::Arc;

use m3u_kv_player::{
    config::{Config, KvConfig, StorageLayout},
    errors::{FetchError, FetchResult, StorageResult},
    sources::PlaylistFetcher,
    storage::{KvNamespace, MemoryNamespace},
    web::{AppState, create_router},
};

/// Fetcher answering from a fixed table; unknown URLs fail like a refused connection
#[derive(Default)]
pub struct StubFetcher {
    bodies: HashMap<String, String>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl PlaylistFetcher for StubFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::request(url, "connection refused"))
    }
}

/// Namespace whose every operation fails like a closed database pool
pub struct FailingNamespace;

#[async_trait]
impl KvNamespace for FailingNamespace {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn put(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn delete(&self, _key: &str) -> StorageResult<()> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

pub fn test_config(layout: StorageLayout, upstream_url: Option<&str>) -> Config {
    let mut kv = KvConfig::memory(layout);
    kv.upstream_url = upstream_url.map(str::to_string);
    Config {
        kv: Some(kv),
        ..Config::default()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub namespace: Arc<MemoryNamespace>,
}

pub fn spawn_app(layout: StorageLayout, fetcher: StubFetcher) -> TestApp {
    spawn_app_with_upstream(layout, fetcher, None)
}

pub fn spawn_app_with_upstream(
    layout: StorageLayout,
    fetcher: StubFetcher,
    upstream_url: Option<&str>,
) -> TestApp {
    let namespace = Arc::new(MemoryNamespace::new());
    let bound: Arc<dyn KvNamespace> = namespace.clone();
    let state = AppState::new(
        test_config(layout, upstream_url),
        Some(bound),
        Arc::new(fetcher),
    );
    let server = TestServer::new(create_router(state)).unwrap();
    TestApp { server, namespace }
}

/// App bound to an arbitrary namespace implementation
pub fn spawn_app_on(
    namespace: Arc<dyn KvNamespace>,
    layout: StorageLayout,
    fetcher: StubFetcher,
    upstream_url: Option<&str>,
) -> TestServer {
    let state = AppState::new(
        test_config(layout, upstream_url),
        Some(namespace),
        Arc::new(fetcher),
    );
    TestServer::new(create_router(state)).unwrap()
}

/// App with no namespace bound at all
pub fn spawn_unbound_app() -> TestServer {
    let config = Config {
        kv: None,
        ..Config::default()
    };
    let state = AppState::new(config, None, Arc::new(StubFetcher::new()));
    TestServer::new(create_router(state)).unwrap()
}
