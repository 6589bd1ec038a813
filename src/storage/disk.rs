/// Disk-based session store
use crate::{
    error::{HubError, HubResult},
    storage::{validate_key, SessionStore},
};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Disk storage backend
///
/// Stores each key as one file under the base directory. Writes go to a
/// temporary file first and are renamed into place.
#[derive(Clone)]
pub struct DiskStore {
    base_path: PathBuf,
}

impl DiskStore {
    /// Open a disk store, creating the directory if needed
    pub async fn open(base_path: PathBuf) -> HubResult<Self> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            HubError::Storage(format!(
                "Failed to create store directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(Self { base_path })
    }

    /// Get the file path for a key
    fn entry_path(&self, key: &str) -> HubResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl SessionStore for DiskStore {
    async fn get(&self, key: &str) -> HubResult<Option<String>> {
        let path = self.entry_path(key)?;

        match fs::read(&path).await {
            // Non-UTF-8 bytes come back lossily so the caller can treat them as corrupt
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HubError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> HubResult<()> {
        let path = self.entry_path(key)?;
        let tmp_path = self.base_path.join(format!(".{}.tmp", key));

        fs::write(&tmp_path, value.as_bytes())
            .await
            .map_err(|e| HubError::Storage(format!("Failed to write {}: {}", key, e)))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| HubError::Storage(format!("Failed to commit {}: {}", key, e)))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> HubResult<()> {
        let path = self.entry_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HubError::Storage(format!("Failed to delete {}: {}", key, e))),
        }
    }
}
