//! Key-value namespace capability
//!
//! The namespace is the only shared state in the service. Backends own their
//! concurrency control; callers neither lock nor serialize access, and a
//! `put` followed by a `list` is not guaranteed to observe the write.

use async_trait::async_trait;

use crate::errors::StorageResult;

#[async_trait]
pub trait KvNamespace: Send + Sync {
    /// Short backend label used in logs
    fn backend_name(&self) -> &'static str;

    /// Look up a single key
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Insert or overwrite a key
    async fn put(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Enumerate every key in the namespace, in key order
    async fn list(&self) -> StorageResult<Vec<String>>;

    /// Remove a key; removing a missing key is not an error
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
