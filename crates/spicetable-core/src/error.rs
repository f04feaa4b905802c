//! # Error Types
//!
//! Domain-specific error types for spicetable-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  spicetable-core errors (this file)                                 │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  spicetable-db errors (separate crate)                              │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  HTTP boundary (apps/server)                                        │
//! │  └── ApiError         - Status code + {"message"} body              │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ApiError → client              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive, never manual impls
//! 2. Context in messages (order id, status names)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

use crate::types::{OrderStatus, PaymentStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order id doesn't exist in the store.
    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    /// Menu item id unknown to the store and the built-in seed list.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(i64),

    /// Attempted to move an order out of a terminal status.
    ///
    /// Same-value updates are idempotent no-ops and never raise this;
    /// only a genuine change away from completed/cancelled does.
    #[error("Order {order_id} is {from}, cannot change status to {to}")]
    InvalidStatusTransition {
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Payment status value rejected by the transition rules.
    #[error("Order {order_id}: payment status cannot change from {from} to {to}")]
    InvalidPaymentTransition {
        order_id: i64,
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any domain logic runs.
///
/// The HTTP boundary maps these to 400 with the first failing message.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (malformed email, non-numeric mobile, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (unknown status strings).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. duplicate account email).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_message() {
        let err = CoreError::InvalidStatusTransition {
            order_id: 12,
            from: OrderStatus::Completed,
            to: OrderStatus::InProgress,
        };
        assert_eq!(
            err.to_string(),
            "Order 12 is completed, cannot change status to in progress"
        );
    }

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::Required {
            field: "customerName".to_string(),
        };
        assert_eq!(err.to_string(), "customerName is required");

        let err = ValidationError::InvalidFormat {
            field: "mobileNumber".to_string(),
            reason: "must be exactly 10 digits".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mobileNumber has invalid format: must be exactly 10 digits"
        );
    }

    #[test]
    fn validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
