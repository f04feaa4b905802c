//! Service layer.
//!
//! Each service owns one aggregate's repository and enforces the rules the
//! repositories deliberately leave out: validation, lifecycle transitions,
//! seeding, and best-effort notifications.

pub mod account;
pub mod catalog;
pub mod order;

pub use account::AccountService;
pub use catalog::CatalogService;
pub use order::OrderService;
