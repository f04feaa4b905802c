//! # Order Repository
//!
//! Database operations for placed orders.
//!
//! Order lines are stored as a JSON array in the `items` column; status
//! fields are stored as their exact wire strings. Lifecycle rules (no
//! leaving a terminal status) are enforced by the order service, not here.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use spicetable_core::{Order, OrderDraft, OrderLine, OrderStatus, PaymentMethod, PaymentStatus};

/// Raw `orders` row; JSON and enum columns still strings.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    mobile_number: Option<String>,
    user_email: Option<String>,
    table_number: i64,
    items: String,
    status: String,
    payment_status: String,
    payment_method: String,
    cooking_instructions: Option<String>,
    total: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<OrderLine> = serde_json::from_str(&row.items)?;
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|_| DbError::Internal(format!("Malformed stored status: {}", row.status)))?;
        let payment_status: PaymentStatus = row.payment_status.parse().map_err(|_| {
            DbError::Internal(format!(
                "Malformed stored payment status: {}",
                row.payment_status
            ))
        })?;
        let payment_method: PaymentMethod = row.payment_method.parse().map_err(|_| {
            DbError::Internal(format!(
                "Malformed stored payment method: {}",
                row.payment_method
            ))
        })?;

        Ok(Order {
            id: row.id,
            customer_name: row.customer_name,
            mobile_number: row.mobile_number,
            user_email: row.user_email,
            table_number: row.table_number,
            items,
            status,
            payment_status,
            payment_method,
            cooking_instructions: row.cooking_instructions,
            total: row.total,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, customer_name, mobile_number, user_email, table_number, \
     items, status, payment_status, payment_method, cooking_instructions, total, created_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order. Status starts at `in progress` / `pending`
    /// regardless of what the caller sent over the wire.
    pub async fn insert(&self, draft: &OrderDraft) -> DbResult<Order> {
        debug!(
            customer = %draft.customer_name,
            table = draft.table_number,
            lines = draft.items.len(),
            "Inserting order"
        );

        let items = serde_json::to_string(&draft.items)?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                customer_name, mobile_number, user_email, table_number, items,
                status, payment_status, payment_method, cooking_instructions,
                total, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&draft.customer_name)
        .bind(&draft.mobile_number)
        .bind(&draft.user_email)
        .bind(draft.table_number)
        .bind(&items)
        .bind(OrderStatus::default().as_str())
        .bind(PaymentStatus::default().as_str())
        .bind(draft.payment_method.as_str())
        .bind(&draft.cooking_instructions)
        .bind(draft.total)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Gets an order by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Lists all orders, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Lists orders placed under a mobile number, newest first.
    pub async fn list_by_mobile(&self, mobile_number: &str) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE mobile_number = ?1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(mobile_number)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Lists orders placed under an email address, newest first.
    pub async fn list_by_email(&self, email: &str) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE user_email = ?1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Sets the kitchen status of an order.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> DbResult<Order> {
        debug!(id, status = %status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Sets the payment status of an order.
    pub async fn update_payment_status(
        &self,
        id: i64,
        payment_status: PaymentStatus,
    ) -> DbResult<Order> {
        debug!(id, payment_status = %payment_status, "Updating order payment status");

        let result = sqlx::query("UPDATE orders SET payment_status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(payment_status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
