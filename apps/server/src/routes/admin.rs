//! Admin auth handlers: login, logout, session introspection, the
//! password-reset flow, and the kitchen display handshake.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_body, require_admin, require_session};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use spicetable_core::{validation, AccountSummary};

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

/// POST /api/admin/login — sets the session cookie on success.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    let body: LoginBody = parse_body(body)?;
    validation::validate_email(&body.email)?;
    validation::validate_password(&body.password)?;

    let account = state.accounts.authenticate(&body.email, &body.password).await?;
    if !account.is_admin {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let token = state.sessions.issue(account.id)?;
    let cookie = state.sessions.session_cookie(&token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AccountSummary::from(&account)),
    ))
}

/// POST /api/admin/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Json(json!({ "message": "Logged out successfully" })),
    )
}

/// GET /api/admin/user — current admin's summary.
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<AccountSummary>> {
    let (session, _) = require_admin(&state, &headers).await?;
    Ok(Json(state.accounts.account_summary(session.account_id).await?))
}

#[derive(Deserialize)]
struct RequestResetBody {
    email: String,
}

/// POST /api/admin/request-reset — enumeration-safe: unknown emails get the
/// same 200 as known ones.
pub async fn request_reset(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let body: RequestResetBody = parse_body(body)?;
    validation::validate_email(&body.email)?;

    match state.accounts.create_reset_token(&body.email).await {
        Ok(()) | Err(ApiError::NotFound(_)) => {}
        Err(other) => return Err(other),
    }

    Ok(Json(json!({
        "message": "If an account exists for that email, a reset link has been sent"
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordBody {
    token: String,
    new_password: String,
}

/// POST /api/admin/reset-password
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let body: ResetPasswordBody = parse_body(body)?;
    state
        .accounts
        .reset_password(&body.token, &body.new_password)
        .await?;
    Ok(Json(json!({ "message": "Password reset successfully" })))
}

/// GET /api/kitchen — any authenticated session (kitchen staff are not
/// necessarily admins).
pub async fn kitchen(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    require_session(&state, &headers).await?;
    Ok(Json(json!({ "message": "Kitchen access granted" })))
}
