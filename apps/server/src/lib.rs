//! # Spicetable Server
//!
//! HTTP JSON API for the restaurant ordering system: customer menu and
//! checkout, kitchen order lifecycle, and the admin dashboard.
//!
//! ## Layering
//! ```text
//! routes/        thin axum handlers, session resolution at the boundary
//!     │
//! services/      validation, lifecycle rules, seeding, notifications
//!     │
//! spicetable-db  repositories over SQLite
//!     │
//! spicetable-core  pure domain types and rules
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod routes;
pub mod services;
pub mod session;

use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::services::{AccountService, CatalogService, OrderService};
use crate::session::SessionManager;
use spicetable_db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionManager,
    pub catalog: CatalogService,
    pub orders: OrderService,
    pub accounts: AccountService,
}

impl AppState {
    /// Wire services over a connected database.
    pub fn new(db: &Database, config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let sessions = SessionManager::new(
            config.session_secret.clone(),
            config.session_lifetime_secs,
        );
        let catalog = CatalogService::new(db.menu());
        let orders = OrderService::new(db.orders(), notifier.clone());
        let accounts = AccountService::new(db.accounts(), notifier, config.app_url.clone());

        AppState {
            config,
            sessions,
            catalog,
            orders,
            accounts,
        }
    }

    /// Startup seeding: fallback catalog and the bootstrap admin. Both
    /// steps are idempotent.
    pub async fn seed(&self) -> error::ApiResult<()> {
        self.catalog.ensure_seeded().await?;
        self.accounts
            .ensure_admin_seed(&self.config.admin_email, &self.config.admin_password)
            .await
    }
}
