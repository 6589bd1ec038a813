/// In-memory session store
use crate::{
    error::HubResult,
    storage::{validate_key, SessionStore},
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Memory-backed store
///
/// Clones share the same map, so a second manager built from a clone sees
/// what the first one persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> HubResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> HubResult<()> {
        validate_key(key)?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> HubResult<()> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_missing_key() {
        let store = MemoryStore::new();
        tokio_test::assert_ok!(store.remove("missing").await);
    }

    #[test]
    fn test_blocking_access() {
        let store = MemoryStore::new();

        tokio_test::block_on(async {
            tokio_test::assert_ok!(store.set("k", "v").await);
            assert_eq!(store.len().await, 1);
        });
    }

    #[tokio::test]
    async fn test_rejects_keys_other_stores_reject() {
        let store = MemoryStore::new();

        for key in ["humanitaria user", "../escape", ".hidden", ""] {
            assert!(store.set(key, "v").await.is_err(), "accepted {:?}", key);
            assert!(store.get(key).await.is_err());
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("humanitaria_user", "payload").await.unwrap();

        assert_eq!(other.get("humanitaria_user").await.unwrap().as_deref(), Some("payload"));
        assert_eq!(other.len().await, 1);
    }
}
