/// Durable key-value storage
///
/// Backs the session slot. Only the session manager writes through it.
/// Supports multiple backend implementations (memory, disk, SQLite).

pub mod disk;
pub mod memory;
pub mod sqlite;

pub use disk::DiskStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::{
    config::StorageBackend,
    error::{HubError, HubResult},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Durable string key-value store
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> HubResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> HubResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> HubResult<()>;
}

/// Open the store selected by configuration
pub async fn open_store(backend: &StorageBackend) -> HubResult<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Disk { location } => Arc::new(DiskStore::open(location.clone()).await?),
        StorageBackend::Sqlite { location } => Arc::new(SqliteStore::open(location).await?),
    };

    tracing::debug!(?backend, "Opened session store");

    Ok(store)
}

/// Keys end up as file names and table keys, so keep them plain
pub(crate) fn validate_key(key: &str) -> HubResult<()> {
    if key.is_empty() {
        return Err(HubError::Validation("Storage key cannot be empty".to_string()));
    }

    if key.len() > 128 {
        return Err(HubError::Validation("Storage key too long".to_string()));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        || key.starts_with('.')
    {
        return Err(HubError::Validation(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("humanitaria_user").is_ok());
        assert!(validate_key("session-v2.json").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(&"k".repeat(129)).is_err());
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store(&StorageBackend::Memory).await.unwrap();

        store.set("humanitaria_user", "{}").await.unwrap();
        assert_eq!(store.get("humanitaria_user").await.unwrap().as_deref(), Some("{}"));
    }
}
