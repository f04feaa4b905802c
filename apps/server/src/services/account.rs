//! Admin account service.
//!
//! Owns password hashing (argon2 PHC strings), enumeration-safe
//! authentication, and the single-use password-reset token flow.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::notify::{spawn_notification, Notifier};
use spicetable_core::{validation, Account, AccountSummary, RESET_TOKEN_TTL_SECS};
use spicetable_db::AccountRepository;

/// The one message both credential failures share, so the two cases are
/// indistinguishable to a caller.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AccountService {
    repo: AccountRepository,
    notifier: Arc<dyn Notifier>,
    app_url: String,
}

impl AccountService {
    pub fn new(repo: AccountRepository, notifier: Arc<dyn Notifier>, app_url: String) -> Self {
        AccountService {
            repo,
            notifier,
            app_url,
        }
    }

    /// Verifies credentials. Unknown email and wrong password return the
    /// identical error; a missing account still burns a hash so the two
    /// paths take comparable time.
    pub async fn authenticate(&self, email: &str, password: &str) -> ApiResult<Account> {
        let Some(account) = self.repo.find_by_email(email).await? else {
            let _ = hash_password(password);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(password, &account.password) {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        Ok(account)
    }

    /// Issues a reset token for the account holding `email`: uuid token,
    /// one-hour expiry, then a best-effort reset email. Token creation is
    /// not rolled back if the email fails.
    pub async fn create_reset_token(&self, email: &str) -> ApiResult<()> {
        let account = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        let token = Uuid::new_v4().to_string();
        let expiry = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);
        self.repo
            .set_reset_token(account.id, Some(&token), Some(expiry))
            .await?;
        info!(account_id = account.id, "Password reset token issued");

        let reset_url = format!("{}/admin/reset-password?token={}", self.app_url, token);
        let notifier = self.notifier.clone();
        let to = account.email.clone();
        spawn_notification("password reset", async move {
            notifier.send_password_reset(&to, &reset_url).await
        });

        Ok(())
    }

    /// Consumes a reset token: replaces the hash and clears the token in
    /// one guarded update, so each token works exactly once.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()> {
        validation::validate_password(new_password)?;

        let account = self
            .repo
            .find_by_reset_token(token)
            .await?
            .ok_or_else(|| ApiError::BadRequest("Invalid or expired reset token".to_string()))?;

        if !account.reset_token_valid(token, Utc::now()) {
            return Err(ApiError::BadRequest("Reset token has expired".to_string()));
        }

        let hash = hash_password(new_password)?;
        if !self.repo.reset_password(account.id, token, &hash).await? {
            return Err(ApiError::BadRequest(
                "Invalid or expired reset token".to_string(),
            ));
        }

        info!(account_id = account.id, "Password reset completed");
        Ok(())
    }

    /// Idempotent bootstrap: creates the admin account on first start and
    /// never overwrites an existing one.
    pub async fn ensure_admin_seed(&self, email: &str, password: &str) -> ApiResult<()> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let hash = hash_password(password)?;
        let account = self.repo.insert(email, &hash, true).await?;
        info!(account_id = account.id, %email, "Seeded admin account");
        Ok(())
    }

    pub async fn find_account(&self, id: i64) -> ApiResult<Account> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))
    }

    pub async fn account_summary(&self, id: i64) -> ApiResult<AccountSummary> {
        Ok(AccountSummary::from(&self.find_account(id).await?))
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Constant-time verification of a password against a PHC hash string.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::{RecordingNotifier, Sent};
    use spicetable_db::{Database, DbConfig};

    async fn service() -> (AccountService, Arc<RecordingNotifier>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        (
            AccountService::new(
                db.accounts(),
                notifier.clone(),
                "http://localhost:5000".to_string(),
            ),
            notifier,
        )
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("admin123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
        assert!(!verify_password("admin123", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn authenticate_failures_are_indistinguishable() {
        let (service, _) = service().await;
        service
            .ensure_admin_seed("admin@restaurant.com", "admin123")
            .await
            .unwrap();

        let unknown = service
            .authenticate("nobody@restaurant.com", "admin123")
            .await
            .unwrap_err();
        let wrong = service
            .authenticate("admin@restaurant.com", "wrong-pass")
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, ApiError::Unauthorized(_)));

        let account = service
            .authenticate("admin@restaurant.com", "admin123")
            .await
            .unwrap();
        assert!(account.is_admin);
    }

    #[tokio::test]
    async fn admin_seed_never_overwrites() {
        let (service, _) = service().await;
        service
            .ensure_admin_seed("admin@restaurant.com", "admin123")
            .await
            .unwrap();
        service
            .ensure_admin_seed("admin@restaurant.com", "other-password")
            .await
            .unwrap();

        // First password still valid.
        assert!(service
            .authenticate("admin@restaurant.com", "admin123")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn reset_token_single_use() {
        let (service, notifier) = service().await;
        service
            .ensure_admin_seed("admin@restaurant.com", "admin123")
            .await
            .unwrap();

        service
            .create_reset_token("admin@restaurant.com")
            .await
            .unwrap();
        tokio::task::yield_now().await;

        let sent = notifier.sent.lock().unwrap().clone();
        let token = match &sent[0] {
            Sent::PasswordReset { reset_url, .. } => reset_url
                .split("token=")
                .nth(1)
                .unwrap()
                .to_string(),
            other => panic!("unexpected notification: {other:?}"),
        };

        service.reset_password(&token, "newpass1").await.unwrap();
        assert!(service
            .authenticate("admin@restaurant.com", "newpass1")
            .await
            .is_ok());

        // Second use of the same token fails.
        assert!(matches!(
            service.reset_password(&token, "anotherpass").await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn reset_rejects_weak_password_and_unknown_token() {
        let (service, _) = service().await;

        assert!(matches!(
            service.reset_password("no-such-token", "short").await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            service.reset_password("no-such-token", "longenough").await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            service.create_reset_token("nobody@restaurant.com").await,
            Err(ApiError::NotFound(_))
        ));
    }
}
