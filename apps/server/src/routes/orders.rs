//! Order handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::parse_body;
use crate::error::ApiResult;
use crate::AppState;
use spicetable_core::{Order, OrderDraft};

/// GET /api/orders — newest first.
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders().await?))
}

/// GET /api/orders/:id
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order(id).await?))
}

/// GET /api/orders/mobile/:mobile
pub async fn by_mobile(
    State(state): State<Arc<AppState>>,
    Path(mobile): Path<String>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.orders_by_mobile(&mobile).await?))
}

/// GET /api/users/:email/orders
pub async fn by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.orders_by_email(&email).await?))
}

/// POST /api/orders — checkout.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let draft: OrderDraft = parse_body(body)?;
    let order = state.orders.create_order(draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Deserialize)]
struct StatusBody {
    status: String,
}

/// POST /api/orders/:id/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Order>> {
    let body: StatusBody = parse_body(body)?;
    Ok(Json(state.orders.update_status(id, &body.status).await?))
}

/// POST /api/orders/:id/payment-status
pub async fn update_payment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Order>> {
    let body: StatusBody = parse_body(body)?;
    Ok(Json(
        state.orders.update_payment_status(id, &body.status).await?,
    ))
}

/// GET /api/orders/export/csv — dashboard download.
pub async fn export_csv(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let (filename, bytes) = state.orders.export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    ))
}
