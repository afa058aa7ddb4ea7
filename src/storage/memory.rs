//! Process-local namespace

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::traits::KvNamespace;
use crate::errors::StorageResult;

/// Namespace kept in a map for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryNamespace {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryNamespace {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvNamespace for MemoryNamespace {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_overwrites_and_lists_in_key_order() {
        let ns = MemoryNamespace::new();
        ns.put("http://b/list.m3u", "stored").await.unwrap();
        ns.put("http://a/list.m3u", "stored").await.unwrap();
        ns.put("http://a/list.m3u", "again").await.unwrap();

        assert_eq!(
            ns.list().await.unwrap(),
            vec!["http://a/list.m3u", "http://b/list.m3u"]
        );
        assert_eq!(
            ns.get("http://a/list.m3u").await.unwrap().as_deref(),
            Some("again")
        );
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_noop() {
        let ns = MemoryNamespace::new();
        ns.delete("missing").await.unwrap();
        ns.put("k", "v").await.unwrap();
        ns.delete("k").await.unwrap();
        assert!(ns.get("k").await.unwrap().is_none());
        assert!(ns.list().await.unwrap().is_empty());
    }
}
