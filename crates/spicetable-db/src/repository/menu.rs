//! # Menu Repository
//!
//! Database operations for menu items.
//!
//! The `customizations` column is serialized JSON; conversion between rows
//! and the domain [`MenuItem`] happens here and nowhere else. Availability
//! toggling is a plain single-row update — the self-healing seed fallback
//! for unknown ids lives one layer up, in the catalog service.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use spicetable_core::{Customizations, MenuItem, MenuItemPatch, NewMenuItem};

/// Raw `menu_items` row; JSON column still a string.
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    category: String,
    image_url: String,
    is_vegetarian: bool,
    is_best_seller: bool,
    is_available: bool,
    customizations: String,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DbError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let customizations: Customizations = serde_json::from_str(&row.customizations)?;
        Ok(MenuItem {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            image_url: row.image_url,
            is_vegetarian: row.is_vegetarian,
            is_best_seller: row.is_best_seller,
            is_available: row.is_available,
            customizations,
        })
    }
}

const SELECT_COLUMNS: &str = "id, name, description, price, category, image_url, \
     is_vegetarian, is_best_seller, is_available, customizations";

/// Repository for menu item database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists all menu items ordered by id.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_items ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    /// Gets a menu item by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MenuItem::try_from).transpose()
    }

    /// Inserts a new menu item; the id is assigned by SQLite.
    pub async fn insert(&self, item: &NewMenuItem) -> DbResult<MenuItem> {
        debug!(name = %item.name, "Inserting menu item");

        let customizations = serde_json::to_string(&item.customizations)?;

        let result = sqlx::query(
            r#"
            INSERT INTO menu_items (
                name, description, price, category, image_url,
                is_vegetarian, is_best_seller, is_available, customizations
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.name)
        .bind(item.description.as_deref().unwrap_or(""))
        .bind(item.price)
        .bind(&item.category)
        .bind(item.image_url.as_deref().unwrap_or(""))
        .bind(item.is_vegetarian)
        .bind(item.is_best_seller)
        .bind(item.is_available)
        .bind(&customizations)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", id))
    }

    /// Inserts a menu item preserving its id (seed and self-heal paths).
    pub async fn insert_with_id(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = item.id, name = %item.name, "Inserting seed menu item");

        let customizations = serde_json::to_string(&item.customizations)?;

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, description, price, category, image_url,
                is_vegetarian, is_best_seller, is_available, customizations
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(&item.image_url)
        .bind(item.is_vegetarian)
        .bind(item.is_best_seller)
        .bind(item.is_available)
        .bind(&customizations)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Applies a partial update. The id itself is immutable.
    pub async fn update(&self, id: i64, patch: &MenuItemPatch) -> DbResult<MenuItem> {
        debug!(id, "Updating menu item");

        let current = self
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", id))?;

        let name = patch.name.clone().unwrap_or(current.name);
        let description = patch.description.clone().unwrap_or(current.description);
        let price = patch.price.unwrap_or(current.price);
        let category = patch.category.clone().unwrap_or(current.category);
        let image_url = patch.image_url.clone().unwrap_or(current.image_url);
        let is_vegetarian = patch.is_vegetarian.unwrap_or(current.is_vegetarian);
        let is_best_seller = patch.is_best_seller.unwrap_or(current.is_best_seller);
        let is_available = patch.is_available.unwrap_or(current.is_available);
        let customizations = serde_json::to_string(
            patch
                .customizations
                .as_ref()
                .unwrap_or(&current.customizations),
        )?;

        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                name = ?2,
                description = ?3,
                price = ?4,
                category = ?5,
                image_url = ?6,
                is_vegetarian = ?7,
                is_best_seller = ?8,
                is_available = ?9,
                customizations = ?10
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&name)
        .bind(&description)
        .bind(price)
        .bind(&category)
        .bind(&image_url)
        .bind(is_vegetarian)
        .bind(is_best_seller)
        .bind(is_available)
        .bind(&customizations)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", id))
    }

    /// Sets the availability flag. Returns the updated item, or
    /// `Ok(None)` when the id is not in the table (the caller decides
    /// whether the seed list can heal it).
    pub async fn set_availability(&self, id: i64, is_available: bool) -> DbResult<Option<MenuItem>> {
        debug!(id, is_available, "Updating menu item availability");

        let result = sqlx::query("UPDATE menu_items SET is_available = ?2 WHERE id = ?1")
            .bind(id)
            .bind(is_available)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    /// Deletes a menu item. Historical orders keep the id; nothing cascades.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        Ok(())
    }

    /// Counts menu items (seeding check).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use spicetable_core::seed;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_item() -> NewMenuItem {
        NewMenuItem {
            name: "Tandoori Mushroom".to_string(),
            description: Some("Char-grilled button mushrooms".to_string()),
            price: 329.0,
            category: "Starters".to_string(),
            image_url: None,
            is_vegetarian: true,
            is_best_seller: false,
            is_available: true,
            customizations: Default::default(),
        }
    }

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let db = test_db().await;
        let repo = db.menu();

        let created = repo.insert(&new_item()).await.unwrap();
        assert!(created.id >= 1);

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.get(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seed_items_keep_ids_and_customizations() {
        let db = test_db().await;
        let repo = db.menu();

        for item in seed::fallback_menu() {
            repo.insert_with_id(&item).await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 20);
        let manchurian = repo.get(1).await.unwrap().unwrap();
        assert_eq!(manchurian.name, "Vegetable Manchurian");
        assert_eq!(manchurian.customizations.options[0].name, "Spice Level");
    }

    #[tokio::test]
    async fn availability_toggle_is_idempotent() {
        let db = test_db().await;
        let repo = db.menu();
        let created = repo.insert(&new_item()).await.unwrap();

        let updated = repo
            .set_availability(created.id, false)
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.is_available);

        // Second application of the same value: same state, no error.
        let again = repo
            .set_availability(created.id, false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again, updated);

        // Unknown id: no row touched, caller decides.
        assert!(repo.set_availability(4242, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn patch_updates_only_given_fields() {
        let db = test_db().await;
        let repo = db.menu();
        let created = repo.insert(&new_item()).await.unwrap();

        let patch = MenuItemPatch {
            price: Some(359.0),
            is_best_seller: Some(true),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap();

        assert_eq!(updated.price, 359.0);
        assert!(updated.is_best_seller);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.id, created.id);

        assert!(matches!(
            repo.update(9999, &patch).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_removes_item() {
        let db = test_db().await;
        let repo = db.menu();
        let created = repo.insert(&new_item()).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
