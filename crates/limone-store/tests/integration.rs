//! Integration tests for the limone-store crate.
//!
//! These exercise the full database lifecycle against a real SQLite file
//! on disk (via tempfile): migrations, seeding across reopens, and the
//! repair path when the seeded flag and table contents disagree.

use limone_store::{Database, KvStore, MenuStore, SEEDED_STATE_KEY};

#[tokio::test]
async fn open_and_migrate_creates_tables_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("limone.db");

    let db = Database::open_and_migrate(db_path.clone()).await.unwrap();

    let item_count: i64 = db
        .execute(|conn| {
            let c: i64 = conn.query_row("SELECT count(*) FROM menu_items", [], |row| row.get(0))?;
            Ok(c)
        })
        .await
        .unwrap();
    assert_eq!(item_count, 0);

    assert!(db_path.exists());
}

#[tokio::test]
async fn seed_survives_reopen_without_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("limone.db");

    {
        let db = Database::open_and_migrate(db_path.clone()).await.unwrap();
        let menu = MenuStore::new(db.clone());
        let kv = KvStore::new(db);
        menu.seed(&kv).await.unwrap();
        assert_eq!(menu.count().await.unwrap(), 5);
    }

    // A second "launch" must find the flag and insert nothing.
    let db = Database::open_and_migrate(db_path).await.unwrap();
    let menu = MenuStore::new(db.clone());
    let kv = KvStore::new(db);
    menu.seed(&kv).await.unwrap();
    assert_eq!(menu.count().await.unwrap(), 5);
}

#[tokio::test]
async fn seed_repairs_flag_lost_between_launches() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("limone.db");

    {
        let db = Database::open_and_migrate(db_path.clone()).await.unwrap();
        let menu = MenuStore::new(db.clone());
        let kv = KvStore::new(db);
        menu.seed(&kv).await.unwrap();

        // Simulate a flag lost after a successful insert (e.g. the key-value
        // write never landed).
        kv.remove(SEEDED_STATE_KEY).await.unwrap();
    }

    let db = Database::open_and_migrate(db_path).await.unwrap();
    let menu = MenuStore::new(db.clone());
    let kv = KvStore::new(db);
    menu.seed(&kv).await.unwrap();

    // The row-count guard caught it: still 5 rows, flag restored.
    assert_eq!(menu.count().await.unwrap(), 5);
    assert_eq!(
        kv.get(SEEDED_STATE_KEY).await.unwrap().as_deref(),
        Some("true")
    );
}
