/// SQLite-backed session store
use crate::{
    error::{HubError, HubResult},
    storage::{validate_key, SessionStore},
};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;

/// Key-value table in a SQLite database
#[derive(Clone)]
pub struct SqliteStore {
    db: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database file and its table
    pub async fn open(path: &Path) -> HubResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let db = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(std::time::Duration::from_secs(5)),
            )
            .await?;

        Self::from_pool(db).await
    }

    /// Single-connection in-memory database
    pub async fn open_in_memory() -> HubResult<Self> {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(db).await
    }

    async fn from_pool(db: SqlitePool) -> HubResult<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&db)
        .await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn get(&self, key: &str) -> HubResult<Option<String>> {
        validate_key(key)?;

        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> HubResult<()> {
        validate_key(key)?;

        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now())
        .execute(&self.db)
        .await
        .map_err(HubError::Database)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> HubResult<()> {
        validate_key(key)?;

        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_upsert_and_remove() {
        let store = SqliteStore::open_in_memory().await.unwrap();

        store.set("humanitaria_user", "first").await.unwrap();
        store.set("humanitaria_user", "second").await.unwrap();
        assert_eq!(
            store.get("humanitaria_user").await.unwrap().as_deref(),
            Some("second")
        );

        store.remove("humanitaria_user").await.unwrap();
        assert_eq!(store.get("humanitaria_user").await.unwrap(), None);
        store.remove("humanitaria_user").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.sqlite");

        {
            let store = SqliteStore::open(&path).await.unwrap();
            store.set("humanitaria_user", "kept").await.unwrap();
            store.db.close().await;
        }

        let reopened = SqliteStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("humanitaria_user").await.unwrap().as_deref(),
            Some("kept")
        );
    }
}
