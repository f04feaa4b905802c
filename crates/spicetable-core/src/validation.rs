//! # Validation Module
//!
//! Input validation for order drafts and menu-item payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: HTTP boundary (serde)                                     │
//! │  ├── Shape/type validation (deserialization)                        │
//! │  └── Unknown status strings rejected on parse                       │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (NOT NULL, UNIQUE, CHECK constraints)            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing rule is what the 400 response carries, so checks run
//! in the order a user would expect to see them.

use crate::error::ValidationError;
use crate::types::{NewMenuItem, OrderDraft};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a customer mobile number: exactly 10 ASCII digits.
pub fn validate_mobile_number(mobile: &str) -> ValidationResult<()> {
    if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobileNumber".to_string(),
            reason: "must be exactly 10 digits".to_string(),
        });
    }
    Ok(())
}

/// Shallow email shape check: something before and after a single `@`,
/// with a dot in the domain. Full RFC parsing is not the goal.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "Invalid email address".to_string(),
        });
    }
    Ok(())
}

/// Passwords must carry at least 6 characters (admin accounts only).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < 6 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        });
    }
    Ok(())
}

/// Validates a price (or total): finite and non-negative. Zero is allowed
/// (complimentary items).
pub fn validate_price(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a menu-item creation payload.
///
/// Required fields per the catalog contract: name, price, category;
/// price must be numeric and non-negative.
pub fn validate_menu_item(item: &NewMenuItem) -> ValidationResult<()> {
    if item.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if item.category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }
    validate_price("price", item.price)?;
    Ok(())
}

/// Validates an order draft before it becomes an order.
///
/// ## Rules
/// - customer name present
/// - at least one contact: a 10-digit mobile number or an email
/// - table number >= 1
/// - at least one line; every quantity in 1..=999
/// - total finite and >= 0 (the store does NOT recompute it from lines)
pub fn validate_order_draft(draft: &OrderDraft) -> ValidationResult<()> {
    if draft.customer_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customerName".to_string(),
        });
    }

    match (&draft.mobile_number, &draft.user_email) {
        (None, None) => {
            return Err(ValidationError::Required {
                field: "mobileNumber or userEmail".to_string(),
            })
        }
        (mobile, email) => {
            if let Some(mobile) = mobile {
                validate_mobile_number(mobile)?;
            }
            if let Some(email) = email {
                validate_email(email)?;
            }
        }
    }

    if draft.table_number < 1 {
        return Err(ValidationError::MustBePositive {
            field: "tableNumber".to_string(),
        });
    }

    if draft.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    if draft.items.len() > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }
    for line in &draft.items {
        if line.quantity < 1 || line.quantity > MAX_LINE_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_LINE_QUANTITY,
            });
        }
    }

    validate_price("total", draft.total)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
