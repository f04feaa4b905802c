//! # spicetable-core: Pure Domain Logic for Spicetable
//!
//! This crate contains the restaurant-ordering domain as pure types and
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Spicetable Data Flow                           │
//! │                                                                     │
//! │   HTTP handlers (apps/server)                                       │
//! │        │                                                            │
//! │        ▼                                                            │
//! │   ★ spicetable-core (THIS CRATE) ★                                  │
//! │                                                                     │
//! │   ┌──────────┐ ┌─────────────┐ ┌────────────┐ ┌──────────┐        │
//! │   │  types   │ │ transitions │ │ validation │ │   seed   │        │
//! │   │ MenuItem │ │ OrderStatus │ │   rules    │ │ fallback │        │
//! │   │  Order   │ │  guards     │ │   checks   │ │  catalog │        │
//! │   └──────────┘ └─────────────┘ └────────────┘ └──────────┘        │
//! │                                                                     │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS               │
//! │        │                                                            │
//! │        ▼                                                            │
//! │   spicetable-db (SQLite queries, migrations, repositories)         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Order, Account, status enums)
//! - [`transitions`] - Order/payment lifecycle rules
//! - [`validation`] - Input validation for drafts and menu items
//! - [`seed`] - Built-in fallback catalog
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, no side effects
//! 2. **No I/O**: database and network access are forbidden here
//! 3. **Explicit Errors**: typed errors, never strings or panics
//! 4. **Wire Fidelity**: types serialize to the exact camelCase JSON the
//!    customer/kitchen/admin clients consume (`"in progress"`, `menuItemId`,
//!    `isAvailable`, ...)

pub mod error;
pub mod seed;
pub mod transitions;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use types::*;

/// Maximum number of distinct lines in a single order.
///
/// Prevents runaway drafts from the customer cart; a dine-in order never
/// legitimately reaches this.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// Guards against fat-finger quantities (1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Password-reset tokens expire one hour after issuance.
pub const RESET_TOKEN_TTL_SECS: i64 = 3600;
