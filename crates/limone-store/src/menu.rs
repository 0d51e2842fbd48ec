//! Menu catalog persistence.
//!
//! Provides SQLite-backed storage for menu items. Items are created by
//! seeding or explicit insert, never updated in place, and deleted by id.
//! The canonical category set is derived from the distinct `category`
//! values on items; the `categories` table exists in the schema but is not
//! the source of truth.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;

/// Key-value flag recording that the sample data has been inserted.
///
/// Deliberately independent of the row count: [`MenuStore::seed`] checks
/// both, and repairs the flag when the table already has data.
pub const SEEDED_STATE_KEY: &str = "database_seeded";

// ═══════════════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════════════

/// A single dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Row id, assigned by SQLite on insert.
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Non-negative price in the restaurant's currency.
    pub price: f64,
    /// Remote image URI. Never fetched by this crate.
    pub image: String,
    /// Grouping/filter key.
    pub category: String,
    /// Unix timestamp, set on insert.
    pub created_at: i64,
}

/// Input for [`MenuStore::insert`]: a menu item before the store assigns
/// its id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}

// ═══════════════════════════════════════════════════════════════════════
//  MenuStore
// ═══════════════════════════════════════════════════════════════════════

/// Queries and mutations over the `menu_items` table.
#[derive(Clone)]
pub struct MenuStore {
    db: Database,
}

impl MenuStore {
    /// Create a new menu store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Return every item, ordered by name ascending.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> StoreResult<Vec<MenuItem>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, description, price, image, category, created_at \
                     FROM menu_items ORDER BY name ASC",
                )?;
                let items = stmt
                    .query_map([], map_item)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await
    }

    /// Return items whose category equals `category` exactly, ordered by
    /// name ascending.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> StoreResult<Vec<MenuItem>> {
        let category = category.to_string();
        self.db
            .execute(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, description, price, image, category, created_at \
                     FROM menu_items WHERE category = ?1 ORDER BY name ASC",
                )?;
                let items = stmt
                    .query_map(rusqlite::params![category], map_item)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await
    }

    /// Insert a new item and return its assigned id.
    ///
    /// The name must be non-empty and the price non-negative.
    #[instrument(skip(self, item))]
    pub async fn insert(&self, item: NewMenuItem) -> StoreResult<i64> {
        if item.name.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "menu item name must not be empty".into(),
            ));
        }
        if item.price < 0.0 {
            return Err(StoreError::InvalidArgument(format!(
                "menu item price must not be negative: {}",
                item.price
            )));
        }

        let now = Utc::now().timestamp();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO menu_items (name, description, price, image, category, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    rusqlite::params![
                        item.name,
                        item.description,
                        item.price,
                        item.image,
                        item.category,
                        now
                    ],
                )?;
                let id = conn.last_insert_rowid();
                debug!(id, "menu item inserted");
                Ok(id)
            })
            .await
    }

    /// Delete the item with `id`. Deleting a missing id is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        self.db
            .execute(move |conn| {
                let deleted = conn.execute(
                    "DELETE FROM menu_items WHERE id = ?1",
                    rusqlite::params![id],
                )?;
                debug!(id, deleted, "menu item delete");
                Ok(())
            })
            .await
    }

    /// Return the sorted set of distinct category values across all items.
    ///
    /// A legitimately empty table yields `Ok(vec![])`; only a storage
    /// failure yields `Err`. Callers decide whether to substitute a
    /// fallback list for the error case.
    #[instrument(skip(self))]
    pub async fn distinct_categories(&self) -> StoreResult<Vec<String>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn
                    .prepare("SELECT DISTINCT category FROM menu_items ORDER BY category ASC")?;
                let categories = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(categories)
            })
            .await
    }

    /// Return the number of rows in `menu_items`.
    #[instrument(skip(self))]
    pub async fn count(&self) -> StoreResult<i64> {
        self.db
            .execute(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM menu_items", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }

    /// Insert the canonical sample items exactly once across the store's
    /// lifetime.
    ///
    /// Two guards prevent duplicate seeding: the `database_seeded` flag in
    /// the key-value store, and a live row count. A flag that is unset while
    /// rows exist is repaired (set without inserting). The insert itself
    /// runs in a single transaction, so a partial failure leaves no rows
    /// behind and the next launch retries cleanly.
    #[instrument(skip(self, kv))]
    pub async fn seed(&self, kv: &KvStore) -> StoreResult<()> {
        if kv.get(SEEDED_STATE_KEY).await?.as_deref() == Some("true") {
            debug!("menu already seeded (flag check)");
            return Ok(());
        }

        if self.count().await? > 0 {
            info!("menu already has data, marking as seeded");
            kv.set(SEEDED_STATE_KEY, "true").await?;
            return Ok(());
        }

        info!("seeding menu with sample data");

        let items = sample_items();
        let now = Utc::now().timestamp();
        self.db
            .execute_mut(move |conn| {
                let tx = conn.transaction()?;
                for item in &items {
                    tx.execute(
                        "INSERT INTO menu_items (name, description, price, image, category, created_at) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        rusqlite::params![
                            item.name,
                            item.description,
                            item.price,
                            item.image,
                            item.category,
                            now
                        ],
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await?;

        kv.set(SEEDED_STATE_KEY, "true").await?;
        info!(items = sample_items().len(), "menu seeded");
        Ok(())
    }

    /// Delete all rows from both tables and clear the seeded flag.
    ///
    /// Development resets only (`limone reset`).
    #[instrument(skip(self, kv))]
    pub async fn reset_all(&self, kv: &KvStore) -> StoreResult<()> {
        self.db
            .execute(|conn| {
                conn.execute("DELETE FROM menu_items", [])?;
                conn.execute("DELETE FROM categories", [])?;
                Ok(())
            })
            .await?;
        kv.remove(SEEDED_STATE_KEY).await?;
        info!("menu store reset");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Internals
// ═══════════════════════════════════════════════════════════════════════

fn map_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        image: row.get(4)?,
        category: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// The canonical sample menu, in insertion order.
fn sample_items() -> Vec<NewMenuItem> {
    vec![
        NewMenuItem {
            name: "Greek Salad".into(),
            description: "The famous greek salad of crispy lettuce, peppers, olives and our \
                          Chicago style feta cheese, garnished with crunchy garlic and rosemary \
                          croutons."
                .into(),
            price: 12.99,
            image: "https://images.unsplash.com/photo-1540420773420-3366772f4999?w=300&h=200&fit=crop"
                .into(),
            category: "Starters".into(),
        },
        NewMenuItem {
            name: "Bruschetta".into(),
            description: "Our Bruschetta is made from grilled bread that has been smeared with \
                          garlic and seasoned with salt and olive oil."
                .into(),
            price: 7.99,
            image: "https://images.unsplash.com/photo-1572695157366-5e585ab2b69f?w=300&h=200&fit=crop"
                .into(),
            category: "Starters".into(),
        },
        NewMenuItem {
            name: "Grilled Fish".into(),
            description: "Barbequed catch of the day, with red onion, crisp capers, chive creme \
                          fraiche."
                .into(),
            price: 20.00,
            image: "https://images.unsplash.com/photo-1544551763-46a013bb70d5?w=300&h=200&fit=crop"
                .into(),
            category: "Mains".into(),
        },
        NewMenuItem {
            name: "Pasta".into(),
            description: "Penne with fried aubergines, tomato sauce, fresh chilli, garlic, basil \
                          & salted ricotta cheese."
                .into(),
            price: 18.99,
            image: "https://images.unsplash.com/photo-1621996346565-e3dbc353d2e5?w=300&h=200&fit=crop"
                .into(),
            category: "Mains".into(),
        },
        NewMenuItem {
            name: "Lemon Dessert".into(),
            description: "Light and fluffy traditional homemade Italian Lemon and ricotta cake."
                .into(),
            price: 6.99,
            image: "https://images.unsplash.com/photo-1565958011703-44f9829ba187?w=300&h=200&fit=crop"
                .into(),
            category: "Desserts".into(),
        },
    ]
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> (MenuStore, KvStore) {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().await.unwrap();
        (MenuStore::new(db.clone()), KvStore::new(db))
    }

    fn new_item(name: &str, category: &str, price: f64) -> NewMenuItem {
        NewMenuItem {
            name: name.into(),
            description: format!("{name} description"),
            price,
            image: String::new(),
            category: category.into(),
        }
    }

    #[tokio::test]
    async fn seed_inserts_sample_items_once() {
        let (menu, kv) = setup().await;

        menu.seed(&kv).await.unwrap();
        assert_eq!(menu.count().await.unwrap(), 5);
        assert_eq!(
            kv.get(SEEDED_STATE_KEY).await.unwrap().as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let (menu, kv) = setup().await;

        menu.seed(&kv).await.unwrap();
        menu.seed(&kv).await.unwrap();
        menu.seed(&kv).await.unwrap();

        assert_eq!(menu.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn seed_repairs_unset_flag() {
        let (menu, kv) = setup().await;

        // Rows exist but the flag was never written.
        menu.insert(new_item("Soup", "Starters", 5.0)).await.unwrap();
        assert!(kv.get(SEEDED_STATE_KEY).await.unwrap().is_none());

        menu.seed(&kv).await.unwrap();

        // No sample rows were added; the flag is now set.
        assert_eq!(menu.count().await.unwrap(), 1);
        assert_eq!(
            kv.get(SEEDED_STATE_KEY).await.unwrap().as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn list_all_orders_by_name() {
        let (menu, kv) = setup().await;
        menu.seed(&kv).await.unwrap();

        let items = menu.list_all().await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Bruschetta",
                "Greek Salad",
                "Grilled Fish",
                "Lemon Dessert",
                "Pasta"
            ]
        );
    }

    #[tokio::test]
    async fn list_by_category_is_exact_match() {
        let (menu, kv) = setup().await;
        menu.seed(&kv).await.unwrap();

        let mains = menu.list_by_category("Mains").await.unwrap();
        let names: Vec<&str> = mains.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Grilled Fish", "Pasta"]);

        // Exact match only: case differences return nothing.
        assert!(menu.list_by_category("mains").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let (menu, _kv) = setup().await;

        let a = menu.insert(new_item("Falafel", "Starters", 8.5)).await.unwrap();
        let b = menu.insert(new_item("Moussaka", "Mains", 14.0)).await.unwrap();
        assert_ne!(a, b);

        let items = menu.list_all().await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn insert_rejects_empty_name() {
        let (menu, _kv) = setup().await;

        let result = menu.insert(new_item("  ", "Mains", 1.0)).await;
        match result {
            Err(StoreError::InvalidArgument(msg)) => {
                assert!(msg.contains("name"), "got: {msg}");
            }
            other => panic!("expected InvalidArgument, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn insert_rejects_negative_price() {
        let (menu, _kv) = setup().await;

        let result = menu.insert(new_item("Soup", "Starters", -0.01)).await;
        match result {
            Err(StoreError::InvalidArgument(msg)) => {
                assert!(msg.contains("price"), "got: {msg}");
            }
            other => panic!("expected InvalidArgument, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (menu, _kv) = setup().await;

        let id = menu.insert(new_item("Soup", "Starters", 5.0)).await.unwrap();
        menu.delete(id).await.unwrap();
        assert_eq!(menu.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (menu, _kv) = setup().await;

        menu.delete(9999).await.unwrap();
        menu.delete(9999).await.unwrap();
    }

    #[tokio::test]
    async fn distinct_categories_sorted() {
        let (menu, _kv) = setup().await;

        menu.insert(new_item("Pasta", "Mains", 18.99)).await.unwrap();
        menu.insert(new_item("Soup", "Starters", 5.0)).await.unwrap();
        menu.insert(new_item("Cake", "Desserts", 6.0)).await.unwrap();

        let categories = menu.distinct_categories().await.unwrap();
        assert_eq!(categories, vec!["Desserts", "Mains", "Starters"]);
    }

    #[tokio::test]
    async fn distinct_categories_empty_table_is_ok_empty() {
        let (menu, _kv) = setup().await;

        let categories = menu.distinct_categories().await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn reset_all_clears_rows_and_flag() {
        let (menu, kv) = setup().await;

        menu.seed(&kv).await.unwrap();
        menu.reset_all(&kv).await.unwrap();

        assert_eq!(menu.count().await.unwrap(), 0);
        assert!(kv.get(SEEDED_STATE_KEY).await.unwrap().is_none());

        // Seeding after a reset repopulates the sample set.
        menu.seed(&kv).await.unwrap();
        assert_eq!(menu.count().await.unwrap(), 5);
    }
}
