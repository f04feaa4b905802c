//! # Order Lifecycle Transitions
//!
//! The transition tables for the two independent status axes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  status axis                       payment axis                     │
//! │                                                                     │
//! │   in progress ──► completed ✕      pending ◄──► paid                │
//! │        │                           pending ◄──► failed              │
//! │        └────────► cancelled ✕      paid    ◄──► failed              │
//! │                                                                     │
//! │   ✕ = terminal: no transition out, same-value no-op allowed        │
//! │   payment axis: last-write-wins, no restrictions                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancellation does not force a payment-status change and vice versa.

use crate::error::CoreError;
use crate::types::{OrderStatus, PaymentStatus};

impl OrderStatus {
    /// A status value from which no further transition is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether `next` is reachable from this status.
    ///
    /// Re-applying the current value is always allowed (idempotent update);
    /// any genuine change out of a terminal status is not.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        !self.is_terminal()
    }

    /// Guard used by the order lifecycle before persisting a status change.
    pub fn check_transition(&self, order_id: i64, next: OrderStatus) -> Result<(), CoreError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidStatusTransition {
                order_id,
                from: *self,
                to: next,
            })
        }
    }
}

impl PaymentStatus {
    /// Payment-status updates are unrestricted among pending/paid/failed.
    ///
    /// Concurrent updates are last-write-wins; the store offers no
    /// optimistic-concurrency token.
    pub fn can_transition_to(&self, _next: PaymentStatus) -> bool {
        true
    }
}
