//! Order service.
//!
//! Enforces the order lifecycle on top of the repository: validation at
//! creation, the terminal-status guard on status changes, last-write-wins
//! on the independent payment axis, and best-effort confirmation email.
//!
//! The caller-supplied total is stored as-is; pricing integrity lives with
//! the client that assembled the cart.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::notify::{spawn_notification, Notifier};
use spicetable_core::{validation, CoreError, Order, OrderDraft, OrderStatus, PaymentStatus};
use spicetable_db::OrderRepository;

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    notifier: Arc<dyn Notifier>,
}

impl OrderService {
    pub fn new(repo: OrderRepository, notifier: Arc<dyn Notifier>) -> Self {
        OrderService { repo, notifier }
    }

    /// Places an order. Every order starts `in progress` / `pending`; a
    /// confirmation email is spawned when the draft carries an address and
    /// never affects the response.
    pub async fn create_order(&self, draft: OrderDraft) -> ApiResult<Order> {
        validation::validate_order_draft(&draft)?;

        let order = self.repo.insert(&draft).await?;
        info!(
            order_id = order.id,
            table = order.table_number,
            total = order.total,
            "Order placed"
        );

        if let Some(email) = order.user_email.clone() {
            let notifier = self.notifier.clone();
            let confirmation = order.clone();
            spawn_notification("order confirmation", async move {
                notifier
                    .send_order_confirmation(&email, &confirmation)
                    .await
            });
        }

        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> ApiResult<Order> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(id).into())
    }

    pub async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn orders_by_mobile(&self, mobile: &str) -> ApiResult<Vec<Order>> {
        Ok(self.repo.list_by_mobile(mobile).await?)
    }

    pub async fn orders_by_email(&self, email: &str) -> ApiResult<Vec<Order>> {
        Ok(self.repo.list_by_email(email).await?)
    }

    /// Changes the kitchen status. Unknown values are 400, unknown ids 404,
    /// and a genuine change away from a terminal status is a 409; repeating
    /// the current value is an accepted no-op.
    pub async fn update_status(&self, id: i64, value: &str) -> ApiResult<Order> {
        let next: OrderStatus = value.parse().map_err(CoreError::Validation)?;

        let order = self.get_order(id).await?;
        order.status.check_transition(id, next)?;

        if order.status == next {
            return Ok(order);
        }

        let updated = self.repo.update_status(id, next).await?;
        info!(order_id = id, status = %next, "Order status changed");
        Ok(updated)
    }

    /// Changes the payment status (last-write-wins among the three values).
    pub async fn update_payment_status(&self, id: i64, value: &str) -> ApiResult<Order> {
        let next: PaymentStatus = value.parse().map_err(CoreError::Validation)?;

        // 404 before the write so unknown ids don't read as success.
        self.get_order(id).await?;

        let updated = self.repo.update_payment_status(id, next).await?;
        info!(order_id = id, payment_status = %next, "Payment status changed");
        Ok(updated)
    }

    /// Exports all orders as CSV, newest first. Line items render as
    /// `"{qty}x Item #{id}"` regardless of whether the menu item still
    /// exists.
    pub async fn export_csv(&self) -> ApiResult<(String, Vec<u8>)> {
        let orders = self.repo.list_all().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "Order ID",
                "Customer Name",
                "Mobile Number",
                "Table Number",
                "Status",
                "Payment Status",
                "Total Amount",
                "Items",
                "Created At",
            ])
            .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {e}")))?;

        for order in &orders {
            let items = order
                .items
                .iter()
                .map(|line| format!("{}x Item #{}", line.quantity, line.menu_item_id))
                .collect::<Vec<_>>()
                .join(", ");

            writer
                .write_record([
                    order.id.to_string(),
                    order.customer_name.clone(),
                    order.mobile_number.clone().unwrap_or_default(),
                    order.table_number.to_string(),
                    order.status.to_string(),
                    order.payment_status.to_string(),
                    order.total.to_string(),
                    items,
                    order.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                ])
                .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {e}")))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {e}")))?;
        let filename = format!("orders-{}.csv", Utc::now().format("%Y-%m-%d"));
        Ok((filename, bytes))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::{RecordingNotifier, Sent};
    use spicetable_core::{OrderLine, PaymentMethod};
    use spicetable_db::{Database, DbConfig};
    use std::collections::BTreeMap;

    async fn service() -> (OrderService, Arc<RecordingNotifier>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        (
            OrderService::new(db.orders(), notifier.clone()),
            notifier,
        )
    }

    fn draft(email: Option<&str>) -> OrderDraft {
        OrderDraft {
            customer_name: "Priya".to_string(),
            mobile_number: Some("9876543210".to_string()),
            user_email: email.map(str::to_string),
            table_number: 4,
            items: vec![OrderLine {
                menu_item_id: 1,
                quantity: 2,
                customizations: BTreeMap::new(),
            }],
            payment_method: PaymentMethod::Cash,
            cooking_instructions: None,
            total: 698.0,
        }
    }

    #[tokio::test]
    async fn create_trusts_total_and_assigns_distinct_ids() {
        let (service, _) = service().await;

        let first = service.create_order(draft(None)).await.unwrap();
        let second = service.create_order(draft(None)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.total, 698.0);
        assert_eq!(first.status, OrderStatus::InProgress);
        assert_eq!(first.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft() {
        let (service, _) = service().await;

        let mut bad = draft(None);
        bad.items.clear();
        assert!(matches!(
            service.create_order(bad).await,
            Err(ApiError::BadRequest(_))
        ));

        let mut no_contact = draft(None);
        no_contact.mobile_number = None;
        assert!(matches!(
            service.create_order(no_contact).await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn confirmation_goes_out_when_email_present() {
        let (service, notifier) = service().await;

        let order = service
            .create_order(draft(Some("priya@example.com")))
            .await
            .unwrap();

        // The notification task is spawned; give it a turn to run.
        tokio::task::yield_now().await;
        let sent = notifier.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![Sent::OrderConfirmation {
                email: "priya@example.com".to_string(),
                order_id: order.id,
            }]
        );
    }

    #[tokio::test]
    async fn terminal_status_guard() {
        let (service, _) = service().await;
        let order = service.create_order(draft(None)).await.unwrap();

        service.update_status(order.id, "completed").await.unwrap();

        // Repeating the value is a no-op.
        let same = service.update_status(order.id, "completed").await.unwrap();
        assert_eq!(same.status, OrderStatus::Completed);

        // Leaving the terminal state is a conflict.
        assert!(matches!(
            service.update_status(order.id, "cancelled").await,
            Err(ApiError::Conflict(_))
        ));

        // Payment axis stays open.
        let paid = service
            .update_payment_status(order.id, "paid")
            .await
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn status_errors_by_kind() {
        let (service, _) = service().await;
        let order = service.create_order(draft(None)).await.unwrap();

        assert!(matches!(
            service.update_status(order.id, "done").await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            service.update_status(999, "completed").await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            service.update_payment_status(999, "paid").await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn csv_export_shape() {
        let (service, _) = service().await;
        service.create_order(draft(None)).await.unwrap();

        let (filename, bytes) = service.export_csv().await.unwrap();
        assert!(filename.starts_with("orders-"));
        assert!(filename.ends_with(".csv"));

        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Order ID,Customer Name,Mobile Number,Table Number,Status,\
             Payment Status,Total Amount,Items,Created At"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Priya"));
        assert!(row.contains("2x Item #1"));
        assert!(row.contains("in progress"));
    }
}
