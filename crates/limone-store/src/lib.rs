//! # limone-store
//!
//! SQLite persistence for limone.
//!
//! Provides a thread-safe [`Database`] handle (WAL mode, async access via
//! the blocking pool), versioned migrations, the relational menu catalog
//! ([`MenuStore`]), and a string key-value store ([`KvStore`]) backing the
//! session layer.
//!
//! The database is opened once at startup and injected into the stores
//! that need it:
//!
//! ```ignore
//! use limone_store::{Database, KvStore, MenuStore};
//!
//! let db = Database::open_and_migrate("data/limone.db").await?;
//! let kv = KvStore::new(db.clone());
//! let menu = MenuStore::new(db.clone());
//! menu.seed(&kv).await?;
//! ```

pub mod db;
pub mod error;
pub mod kv;
pub mod menu;
pub mod migration;

// ── re-exports ───────────────────────────────────────────────────────

pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use kv::KvStore;
pub use menu::{MenuItem, MenuStore, NewMenuItem, SEEDED_STATE_KEY};
