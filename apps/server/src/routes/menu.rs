//! Menu catalog handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use super::{parse_body, require_admin};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use spicetable_core::{MenuItem, MenuItemPatch, NewMenuItem};

/// GET /api/menu — never 500s; degrades to the fallback catalog.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<MenuItem>> {
    Json(state.catalog.list_items().await)
}

/// GET /api/menu/:id
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.catalog.get_item(id).await?))
}

/// POST /api/menu (admin)
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    require_admin(&state, &headers).await?;
    let item: NewMenuItem = parse_body(body)?;
    let created = state.catalog.create_item(item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/menu/:id (admin)
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<Json<MenuItem>> {
    require_admin(&state, &headers).await?;
    let patch: MenuItemPatch = parse_body(body)?;
    Ok(Json(state.catalog.update_item(id, patch).await?))
}

/// DELETE /api/menu/:id (admin)
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers).await?;
    state.catalog.delete_item(id).await?;
    Ok(Json(json!({ "message": "Menu item deleted successfully" })))
}

/// POST /api/menu/:id/availability — kitchen-facing toggle, self-healing
/// for seed items.
pub async fn set_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<MenuItem>> {
    let is_available = body
        .get("isAvailable")
        .and_then(Value::as_bool)
        .ok_or_else(|| ApiError::BadRequest("isAvailable must be a boolean".to_string()))?;

    Ok(Json(state.catalog.set_availability(id, is_available).await?))
}
