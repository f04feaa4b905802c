//! # Domain Types
//!
//! Core domain types for the Spicetable ordering system.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │   MenuItem    │   │     Order     │   │    Account    │         │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │         │
//! │  │  id (i64)     │◄──│  items[]      │   │  id (i64)     │         │
//! │  │  price (f64)  │ by│  status       │   │  email        │         │
//! │  │  category     │ id│  paymentStatus│   │  password hash│         │
//! │  │  customiz'ns  │   │  total        │   │  reset token  │         │
//! │  └───────────────┘   └───────────────┘   └───────────────┘         │
//! │                                                                     │
//! │  OrderStatus: in progress → completed | cancelled  (terminal)       │
//! │  PaymentStatus: pending → paid | failed            (independent)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order lines reference menu items by id only (non-owning). Deleting a
//! menu item never touches historical orders; displays degrade to
//! `Item #N` when the referenced item is gone.
//!
//! All wire types serialize camelCase to match the JSON API the clients
//! consume.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Menu Catalog
// =============================================================================

/// A named group of customization choices on a menu item,
/// e.g. "Spice Level": max 1 of {Mild, Medium, Hot}.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationGroup {
    pub name: String,
    pub choices: Vec<String>,
    /// Maximum number of simultaneous selections from this group.
    pub max_choices: u32,
}

/// The ordered list of customization option groups on a menu item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customizations {
    pub options: Vec<CustomizationGroup>,
}

/// A dish on the menu.
///
/// `id` is immutable once created. `is_available` is the only field kitchen
/// staff mutate directly; everything else changes through admin CRUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Price in currency units. Invariant: `price >= 0`.
    pub price: f64,
    /// Free-text grouping ("Starters", "Main Course", ...).
    pub category: String,
    pub image_url: String,
    pub is_vegetarian: bool,
    pub is_best_seller: bool,
    pub is_available: bool,
    pub customizations: Customizations,
}

/// Payload for creating a menu item. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub customizations: Customizations,
}

fn default_true() -> bool {
    true
}

/// Partial update for a menu item. Absent fields are left untouched;
/// the id is never updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_vegetarian: Option<bool>,
    pub is_best_seller: Option<bool>,
    pub is_available: Option<bool>,
    pub customizations: Option<Customizations>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The kitchen-facing status of an order.
///
/// `Completed` and `Cancelled` are terminal; see
/// [`crate::transitions::OrderStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order accepted, kitchen is working on it (initial).
    #[serde(rename = "in progress")]
    InProgress,
    /// Served and done (terminal).
    #[serde(rename = "completed")]
    Completed,
    /// Abandoned or rejected (terminal).
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::InProgress
    }
}

impl OrderStatus {
    /// The exact wire/database string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "in progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(crate::ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec![
                    "in progress".to_string(),
                    "completed".to_string(),
                    "cancelled".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment state of an order. Independent axis from [`OrderStatus`]:
/// cancelling an order does not force a payment-status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment (initial, also "pay at restaurant").
    Pending,
    Paid,
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            _ => Err(crate::ValidationError::NotAllowed {
                field: "paymentStatus".to_string(),
                allowed: vec![
                    "pending".to_string(),
                    "paid".to_string(),
                    "failed".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay at the table / counter.
    Cash,
    Card,
    Upi,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            _ => Err(crate::ValidationError::NotAllowed {
                field: "paymentMethod".to_string(),
                allowed: vec!["cash".to_string(), "card".to_string(), "upi".to_string()],
            }),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// One menu item + quantity + selected customizations within an order.
///
/// Holds a non-owning reference to the menu item by id; the selections map
/// option-group names to the chosen labels and preserve group ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: i64,
    /// Invariant: `quantity >= 1`.
    pub quantity: i64,
    #[serde(default)]
    pub customizations: BTreeMap<String, Vec<String>>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    /// 10-digit contact number; at least one of mobile/email is present.
    pub mobile_number: Option<String>,
    pub user_email: Option<String>,
    /// Invariant: `table_number >= 1`.
    pub table_number: i64,
    pub items: Vec<OrderLine>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub cooking_instructions: Option<String>,
    /// Caller-supplied total (line prices × quantities, optionally plus
    /// GST applied before submission). The store trusts this value.
    pub total: f64,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
}

/// Checkout payload. Status and payment status are not accepted from the
/// caller; every order starts at `in progress` / `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_name: String,
    pub mobile_number: Option<String>,
    pub user_email: Option<String>,
    pub table_number: i64,
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub cooking_instructions: Option<String>,
    pub total: f64,
}

// =============================================================================
// Account
// =============================================================================

/// An admin account. This domain authenticates admins only; customers
/// never hold accounts.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC hash string. Never serialized, never logged.
    pub password: String,
    pub is_admin: bool,
    /// Single-use password-reset token; expired tokens are treated as absent.
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// What the API exposes about an account. No password material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        AccountSummary {
            id: account.id,
            email: account.email.clone(),
            is_admin: account.is_admin,
            created_at: account.created_at,
        }
    }
}

impl Account {
    /// True when the stored reset token matches and has not expired.
    pub fn reset_token_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_token, self.reset_token_expiry) {
            (Some(stored), Some(expiry)) => stored == token && now < expiry,
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
