//! # Repository Module
//!
//! Database repository implementations for Spicetable.
//!
//! ## Repository Pattern
//! ```text
//! handler → db.orders().update_status(id, status) → SQL → SQLite
//! ```
//!
//! Each repository owns the SQL for one aggregate; callers never see rows,
//! only domain types from spicetable-core. JSON columns (menu
//! customizations, order line items) are converted at this boundary.
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Menu item CRUD and availability
//! - [`order::OrderRepository`] - Order creation, listing, status updates
//! - [`account::AccountRepository`] - Admin accounts and reset tokens

pub mod account;
pub mod menu;
pub mod order;
