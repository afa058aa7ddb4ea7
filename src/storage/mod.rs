//! Key-value namespace backends

use std::sync::Arc;

use crate::config::{KvBackend, KvConfig};
use crate::errors::StorageResult;

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryNamespace;
pub use sqlite::SqliteNamespace;
pub use traits::KvNamespace;

/// Open the namespace described by the configuration
pub async fn open_namespace(config: &KvConfig) -> StorageResult<Arc<dyn KvNamespace>> {
    let namespace: Arc<dyn KvNamespace> = match config.backend {
        KvBackend::Memory => Arc::new(MemoryNamespace::new()),
        KvBackend::Sqlite => {
            Arc::new(SqliteNamespace::connect(&config.url, config.max_connections).await?)
        }
    };
    Ok(namespace)
}
