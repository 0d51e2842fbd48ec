//! SQLite database setup.
//!
//! The [`Database`] struct wraps a `rusqlite::Connection` behind an
//! `Arc<Mutex<>>` and exposes async methods that use
//! `tokio::task::spawn_blocking` so store calls never block the runtime.
//! The connection is opened once at startup and handed to the stores that
//! need it; there is no process-wide handle.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migration;

/// Thread-safe handle to the on-device SQLite database.
///
/// All read/write operations go through [`Database::execute`] or
/// [`Database::execute_mut`], which dispatch onto the blocking thread pool.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database at `path` and apply pragmas.
    ///
    /// This call blocks briefly on file I/O; call it during startup before
    /// entering the main event loop.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening database");

        let conn = Connection::open(path)?;
        Self::apply_pragmas(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        debug!("opening in-memory database");

        let conn = Connection::open_in_memory()?;
        Self::apply_pragmas(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the database and run all pending migrations.
    pub async fn open_and_migrate(path: impl AsRef<Path> + Send + 'static) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let db = tokio::task::spawn_blocking(move || Self::open(&path)).await??;
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run all pending schema migrations. Idempotent, safe on every launch.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::TaskJoin(format!("mutex poisoned: {e}")))?;
            migration::run_all(&conn)
        })
        .await?
    }

    /// Execute a closure against the connection on the blocking pool.
    ///
    /// This is the primary way the stores interact with SQLite from async
    /// code. The closure receives a `&Connection` and returns a
    /// `StoreResult<T>`.
    pub async fn execute<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::TaskJoin(format!("mutex poisoned: {e}")))?;
            f(&conn)
        })
        .await?
    }

    /// Execute a mutable closure (for transactions) on the blocking pool.
    pub async fn execute_mut<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::TaskJoin(format!("mutex poisoned: {e}")))?;
            f(&mut conn)
        })
        .await?
    }

    // ── pragmas ──────────────────────────────────────────────────────

    fn apply_pragmas(conn: &Connection) -> StoreResult<()> {
        debug!("applying SQLite pragmas");

        // WAL mode: readers never block the single writer.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        // NORMAL sync is safe with WAL: worst case loses the last
        // transaction on power failure, not the database.
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        // Enforce foreign key constraints.
        conn.pragma_update(None, "foreign_keys", "ON")?;

        // Wait instead of failing immediately if another handle holds a lock.
        conn.pragma_update(None, "busy_timeout", 5_000_i32)?;

        Ok(())
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_works() {
        let db = Database::open_in_memory().unwrap();
        let version: String = db
            .execute(|conn| {
                let v: String = conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))?;
                Ok(v)
            })
            .await
            .unwrap();
        assert!(!version.is_empty());
    }

    #[tokio::test]
    async fn migrations_run_on_fresh_db() {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().await.unwrap();

        let count: i64 = db
            .execute(|conn| {
                let c: i64 =
                    conn.query_row("SELECT count(*) FROM menu_items", [], |row| row.get(0))?;
                Ok(c)
            })
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn open_and_migrate_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limone.db");

        let db = Database::open_and_migrate(path.clone()).await.unwrap();
        drop(db);

        // Reopening and re-migrating an existing file must succeed.
        let db = Database::open_and_migrate(path).await.unwrap();
        db.run_migrations().await.unwrap();
    }
}
