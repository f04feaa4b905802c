//! HTTP routing.
//!
//! ## Route Map
//! ```text
//! /api/menu                    GET list | POST create (admin)
//! /api/menu/:id                GET | PATCH (admin) | DELETE (admin)
//! /api/menu/:id/availability   POST toggle (kitchen, self-healing)
//! /api/orders                  GET list | POST checkout
//! /api/orders/:id              GET
//! /api/orders/:id/status       POST kitchen lifecycle
//! /api/orders/:id/payment-status POST payment axis
//! /api/orders/mobile/:mobile   GET customer history
//! /api/orders/export/csv       GET dashboard download
//! /api/users/:email/orders     GET customer history by email
//! /api/admin/*                 login / logout / user / reset flow
//! /api/kitchen                 session-gated kitchen display handshake
//! ```

mod admin;
mod menu;
mod orders;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::session::{extract_session_token, AdminSession};
use crate::AppState;
use spicetable_core::Account;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/menu", get(menu::list).post(menu::create))
        .route(
            "/api/menu/:id",
            get(menu::get_item).patch(menu::update).delete(menu::delete),
        )
        .route("/api/menu/:id/availability", post(menu::set_availability))
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/export/csv", get(orders::export_csv))
        .route("/api/orders/:id", get(orders::get_order))
        .route("/api/orders/:id/status", post(orders::update_status))
        .route(
            "/api/orders/:id/payment-status",
            post(orders::update_payment_status),
        )
        .route("/api/orders/mobile/:mobile", get(orders::by_mobile))
        .route("/api/users/:email/orders", get(orders::by_email))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/user", get(admin::current_user))
        .route("/api/admin/request-reset", post(admin::request_reset))
        .route("/api/admin/reset-password", post(admin::reset_password))
        .route("/api/kitchen", get(admin::kitchen))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Request log line, one per API call.
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    if path.starts_with("/api") {
        info!(
            "{} {} {} in {}ms",
            method,
            path,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );
    }
    response
}

/// Deserialize a JSON body into a typed payload; failures are a 400 with
/// the serde message rather than a framework rejection.
pub(crate) fn parse_body<T: DeserializeOwned>(value: serde_json::Value) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
}

/// Resolve the session cookie into an account, without the admin check.
pub(crate) async fn require_session(state: &AppState, headers: &HeaderMap) -> ApiResult<Account> {
    let token = extract_session_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
    let claims = state.sessions.verify(token)?;
    state.accounts.find_account(claims.sub).await
}

/// Resolve the session cookie into an authorized admin session.
pub(crate) async fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> ApiResult<(AdminSession, Account)> {
    let account = require_session(state, headers).await?;
    if !account.is_admin {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }
    Ok((
        AdminSession {
            account_id: account.id,
        },
        account,
    ))
}
