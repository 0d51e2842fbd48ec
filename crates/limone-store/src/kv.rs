//! Key-value store for session and application flags.
//!
//! Stores plain string key-value pairs in the `app_state` table. Keys are
//! unnamespaced by convention; the session layer owns the key constants.
//! Setting an empty key or empty value is a no-op rather than an error,
//! matching the storage boundary contract.

use tracing::{debug, instrument};

use crate::db::Database;
use crate::error::StoreResult;

/// Persistent string key-value store.
#[derive(Clone)]
pub struct KvStore {
    db: Database,
}

impl KvStore {
    /// Create a new key-value store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a value by key, returning `None` if not found.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if key.is_empty() {
            return Ok(None);
        }
        let key = key.to_string();
        self.db
            .execute(move |conn| {
                let result = conn.query_row(
                    "SELECT value FROM app_state WHERE key = ?1",
                    rusqlite::params![key],
                    |row| row.get(0),
                );
                match result {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
    }

    /// Set a value for a key (insert or update).
    ///
    /// An empty key or empty value is silently ignored.
    #[instrument(skip(self, value))]
    pub async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if key.is_empty() || value.is_empty() {
            debug!(key = %key, "skipping empty key or value");
            return Ok(());
        }
        let key = key.to_string();
        let value = value.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO app_state (key, value) VALUES (?1, ?2) \
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![key, value],
                )?;
                debug!(key = %key, "app state updated");
                Ok(())
            })
            .await
    }

    /// Delete a key, returning `true` if it existed.
    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        let key = key.to_string();
        self.db
            .execute(move |conn| {
                let deleted = conn.execute(
                    "DELETE FROM app_state WHERE key = ?1",
                    rusqlite::params![key],
                )?;
                Ok(deleted > 0)
            })
            .await
    }

    /// Delete every key. Used by logout.
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> StoreResult<()> {
        self.db
            .execute(|conn| {
                let deleted = conn.execute("DELETE FROM app_state", [])?;
                debug!(deleted, "app state cleared");
                Ok(())
            })
            .await
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_store() -> KvStore {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().await.unwrap();
        KvStore::new(db)
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let store = setup_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_and_get() {
        let store = setup_store().await;

        store.set("name", "Ada Lovelace").await.unwrap();
        assert_eq!(
            store.get("name").await.unwrap(),
            Some("Ada Lovelace".to_string())
        );
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = setup_store().await;

        store.set("email", "old@example.com").await.unwrap();
        store.set("email", "new@example.com").await.unwrap();
        assert_eq!(
            store.get("email").await.unwrap(),
            Some("new@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn empty_key_or_value_is_noop() {
        let store = setup_store().await;

        store.set("", "value").await.unwrap();
        store.set("key", "").await.unwrap();
        assert!(store.get("").await.unwrap().is_none());
        assert!(store.get("key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_value_does_not_clear_existing() {
        let store = setup_store().await;

        store.set("phone", "555-0100").await.unwrap();
        store.set("phone", "").await.unwrap();
        assert_eq!(
            store.get("phone").await.unwrap(),
            Some("555-0100".to_string())
        );
    }

    #[tokio::test]
    async fn remove_existing() {
        let store = setup_store().await;

        store.set("key1", "val").await.unwrap();
        assert!(store.remove("key1").await.unwrap());
        assert!(store.get("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_nonexistent() {
        let store = setup_store().await;
        assert!(!store.remove("missing").await.unwrap());
    }

    #[tokio::test]
    async fn clear_all_removes_every_key() {
        let store = setup_store().await;

        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.clear_all().await.unwrap();

        assert!(store.get("a").await.unwrap().is_none());
        assert!(store.get("b").await.unwrap().is_none());
    }
}
