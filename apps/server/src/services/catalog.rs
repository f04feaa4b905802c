//! Menu catalog service.
//!
//! The customer-facing menu read must never hard-fail: a storage error on
//! the list path degrades to the built-in fallback catalog. The availability
//! toggle self-heals seed items that have gone missing from the table.

use tracing::{error, info};

use crate::error::ApiResult;
use spicetable_core::{seed, validation, CoreError, MenuItem, MenuItemPatch, NewMenuItem};
use spicetable_db::MenuRepository;

#[derive(Clone)]
pub struct CatalogService {
    repo: MenuRepository,
}

impl CatalogService {
    pub fn new(repo: MenuRepository) -> Self {
        CatalogService { repo }
    }

    /// Idempotent startup step: seed the fallback catalog into an empty
    /// table. Seed ids are preserved.
    pub async fn ensure_seeded(&self) -> ApiResult<()> {
        if self.repo.count().await? > 0 {
            return Ok(());
        }

        let items = seed::fallback_menu();
        let count = items.len();
        for item in &items {
            self.repo.insert_with_id(item).await?;
        }
        info!(count, "Seeded menu catalog");
        Ok(())
    }

    /// Lists the catalog. Storage failure degrades to the fallback list so
    /// customers always see a menu.
    pub async fn list_items(&self) -> Vec<MenuItem> {
        match self.repo.list().await {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, "Menu read failed, serving fallback catalog");
                seed::fallback_menu()
            }
        }
    }

    pub async fn get_item(&self, id: i64) -> ApiResult<MenuItem> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::MenuItemNotFound(id).into())
    }

    pub async fn create_item(&self, item: NewMenuItem) -> ApiResult<MenuItem> {
        validation::validate_menu_item(&item)?;
        Ok(self.repo.insert(&item).await?)
    }

    pub async fn update_item(&self, id: i64, patch: MenuItemPatch) -> ApiResult<MenuItem> {
        if let Some(price) = patch.price {
            validation::validate_price("price", price)?;
        }
        Ok(self.repo.update(id, &patch).await?)
    }

    pub async fn delete_item(&self, id: i64) -> ApiResult<()> {
        // Historical orders keep the id; displays degrade to "Item #N".
        Ok(self.repo.delete(id).await?)
    }

    /// Sets availability. When the id is missing from the table but exists
    /// in the seed list, the seed item is re-inserted with the requested
    /// availability.
    pub async fn set_availability(&self, id: i64, is_available: bool) -> ApiResult<MenuItem> {
        if let Some(item) = self.repo.set_availability(id, is_available).await? {
            return Ok(item);
        }

        let Some(mut item) = seed::seed_item(id) else {
            return Err(CoreError::MenuItemNotFound(id).into());
        };

        item.is_available = is_available;
        self.repo.insert_with_id(&item).await?;
        info!(id, "Restored missing seed item during availability update");
        Ok(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
