//! SQLite-backed namespace

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use super::traits::KvNamespace;
use crate::errors::StorageResult;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Namespace persisted in a single `kv_entries` table
#[derive(Clone)]
pub struct SqliteNamespace {
    pool: SqlitePool,
}

impl SqliteNamespace {
    /// Open (creating if needed) the database at `url` and ensure the schema
    pub async fn connect(url: &str, max_connections: u32) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own empty
        // database, so the pool must hold exactly one connection forever.
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let namespace = Self { pool };
        namespace.migrate().await?;

        info!("SQLite KV namespace ready (in_memory={})", in_memory);
        Ok(namespace)
    }

    async fn migrate(&self) -> StorageResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl KvNamespace for SqliteNamespace {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        debug!("Stored KV key ({} bytes)", value.len());
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_entries ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_namespace() -> SqliteNamespace {
        SqliteNamespace::connect("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_get_list_delete() {
        let ns = memory_namespace().await;
        ns.put("http://b/list.m3u", "stored").await.unwrap();
        ns.put("http://a/list.m3u", "stored").await.unwrap();

        assert_eq!(
            ns.list().await.unwrap(),
            vec!["http://a/list.m3u", "http://b/list.m3u"]
        );
        assert_eq!(
            ns.get("http://a/list.m3u").await.unwrap().as_deref(),
            Some("stored")
        );

        ns.delete("http://a/list.m3u").await.unwrap();
        assert!(ns.get("http://a/list.m3u").await.unwrap().is_none());
        assert_eq!(ns.list().await.unwrap(), vec!["http://b/list.m3u"]);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let ns = memory_namespace().await;
        ns.put("m3u_list", "#EXTM3U\n").await.unwrap();
        ns.put("m3u_list", "#EXTM3U\nhttp://x/a.m3u8\n").await.unwrap();

        assert_eq!(
            ns.get("m3u_list").await.unwrap().as_deref(),
            Some("#EXTM3U\nhttp://x/a.m3u8\n")
        );
        assert_eq!(ns.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_database_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("kv.db").display());

        {
            let ns = SqliteNamespace::connect(&url, 2).await.unwrap();
            ns.put("http://x/list.m3u", "stored").await.unwrap();
        }

        let reopened = SqliteNamespace::connect(&url, 2).await.unwrap();
        assert_eq!(reopened.list().await.unwrap(), vec!["http://x/list.m3u"]);
    }
}
