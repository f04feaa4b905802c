//! Admin session handling.
//!
//! Sessions are HS256 tokens carried in an HttpOnly `session` cookie. The
//! token binds to the account id; admin-only routes resolve it once at the
//! boundary into an [`AdminSession`] that handlers take as a parameter.

use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Unique identifier for this token
    pub jti: String,
}

/// A resolved, authorized admin session.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub account_id: i64,
}

/// Session token manager.
#[derive(Clone)]
pub struct SessionManager {
    secret: String,
    lifetime_secs: i64,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        SessionManager {
            secret,
            lifetime_secs,
        }
    }

    /// Issue a session token for an account.
    pub fn issue(&self, account_id: i64) -> ApiResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: account_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to issue session token: {e}")))
    }

    /// Validate and decode a session token.
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| ApiError::Unauthorized("Invalid or expired session".to_string()))?;

        Ok(token_data.claims)
    }

    /// Build the `Set-Cookie` value that installs a session.
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
            self.lifetime_secs
        )
    }

    /// Build the `Set-Cookie` value that clears the session.
    pub fn clear_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax")
    }
}

/// Extract the session token from the request's `Cookie` header.
pub fn extract_session_token(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}
