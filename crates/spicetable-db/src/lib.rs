//! # spicetable-db: Database Layer for Spicetable
//!
//! SQLite persistence for the ordering system, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler (create order)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  spicetable-db (THIS CRATE)                   │  │
//! │  │                                                               │  │
//! │  │  ┌────────────┐   ┌────────────────┐   ┌──────────────────┐  │  │
//! │  │  │  Database  │   │  Repositories  │   │    Migrations    │  │  │
//! │  │  │ (pool.rs)  │◄──│ menu / orders  │   │    (embedded)    │  │  │
//! │  │  │ SqlitePool │   │   / accounts   │   │ 001_initial.sql  │  │  │
//! │  │  └────────────┘   └────────────────┘   └──────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode)                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, order, account)

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use pool::{Database, DbConfig};

pub use repository::account::AccountRepository;
pub use repository::menu::MenuRepository;
pub use repository::order::OrderRepository;
