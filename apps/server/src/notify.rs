//! Notification collaborator.
//!
//! ## Dispatch Model
//! ```text
//! OrderService ──┐
//!                ├──► tokio::spawn ──► Notifier ──► outcome logged
//! AccountService ┘        (fire & forget, never fails the request)
//! ```
//!
//! Actual email transport is an external concern. [`EmailNotifier`] renders
//! the messages and records the dispatch under the configured sender
//! identity; tests use [`RecordingNotifier`].

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use spicetable_core::Order;

/// Notification dispatch errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// No sender identity configured (SMTP_EMAIL unset).
    #[error("Notification sender not configured")]
    NotConfigured,

    /// The transport reported a failure.
    #[error("Notification dispatch failed: {0}")]
    Dispatch(String),
}

pub type NotifyResult = Result<(), NotifyError>;

/// Outbound notification seam.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Confirm a freshly placed order to the customer.
    async fn send_order_confirmation(&self, email: &str, order: &Order) -> NotifyResult;

    /// Send a password-reset link to an admin.
    async fn send_password_reset(&self, email: &str, reset_url: &str) -> NotifyResult;
}

/// Production notifier. Renders messages and logs the dispatch; returns
/// `NotConfigured` when no sender identity is set so callers can record
/// the skip.
pub struct EmailNotifier {
    sender: Option<String>,
}

impl EmailNotifier {
    pub fn new(sender: Option<String>) -> Self {
        EmailNotifier { sender }
    }

    fn sender(&self) -> Result<&str, NotifyError> {
        self.sender.as_deref().ok_or(NotifyError::NotConfigured)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send_order_confirmation(&self, email: &str, order: &Order) -> NotifyResult {
        let sender = self.sender()?;

        let body = format!(
            "Thank you for your order!\n\
             Your order has been received and is being prepared.\n\
             Order ID: {}\n\
             Total Amount: {}",
            order.id, order.total
        );

        info!(
            from = %sender,
            to = %email,
            subject = "Order Confirmation",
            body_len = body.len(),
            order_id = order.id,
            "Dispatching order confirmation"
        );
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, reset_url: &str) -> NotifyResult {
        let sender = self.sender()?;

        let body = format!(
            "You have requested to reset your password. Open the link below to \
             set a new password:\n{reset_url}\n\
             If you didn't request this, please ignore this email.\n\
             This link will expire in 1 hour."
        );

        info!(
            from = %sender,
            to = %email,
            subject = "Password Reset Request",
            body_len = body.len(),
            "Dispatching password reset email"
        );
        Ok(())
    }
}

/// Spawn a notification task; the outcome is logged, never surfaced.
pub fn spawn_notification<F>(context: &'static str, fut: F)
where
    F: std::future::Future<Output = NotifyResult> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            warn!(%context, error = %e, "Notification not delivered");
        }
    });
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use spicetable_core::{OrderStatus, PaymentMethod, PaymentStatus};

    fn order() -> Order {
        Order {
            id: 7,
            customer_name: "Priya".to_string(),
            mobile_number: Some("9876543210".to_string()),
            user_email: Some("priya@example.com".to_string()),
            table_number: 2,
            items: vec![],
            status: OrderStatus::InProgress,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Cash,
            cooking_instructions: None,
            total: 698.0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unconfigured_sender_reports_not_configured() {
        let notifier = EmailNotifier::new(None);
        let result = notifier
            .send_order_confirmation("priya@example.com", &order())
            .await;
        assert!(matches!(result, Err(NotifyError::NotConfigured)));
    }

    #[tokio::test]
    async fn configured_sender_dispatches() {
        let notifier = EmailNotifier::new(Some("restaurant@example.com".to_string()));
        assert!(notifier
            .send_order_confirmation("priya@example.com", &order())
            .await
            .is_ok());
        assert!(notifier
            .send_password_reset("admin@restaurant.com", "http://localhost:5000/reset?token=t")
            .await
            .is_ok());
    }
}
