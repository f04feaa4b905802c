//! # Account Repository
//!
//! Database operations for admin accounts. Password hashing and reset-token
//! generation happen in the account service; this layer stores and fetches
//! whatever hash/token strings it is handed.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use spicetable_core::Account;

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    password: String,
    is_admin: bool,
    reset_token: Option<String>,
    reset_token_expiry: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            email: row.email,
            password: row.password,
            is_admin: row.is_admin,
            reset_token: row.reset_token,
            reset_token_expiry: row.reset_token_expiry,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "id, email, password, is_admin, reset_token, reset_token_expiry, created_at";

/// Repository for account database operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Finds an account by email (exact match).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Account::from))
    }

    /// Finds an account by id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Account::from))
    }

    /// Finds an account holding a reset token. Expiry is checked by the
    /// caller against [`Account::reset_token_valid`].
    pub async fn find_by_reset_token(&self, token: &str) -> DbResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts WHERE reset_token = ?1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Account::from))
    }

    /// Inserts a new account. `password` is an already-hashed PHC string.
    /// Duplicate emails surface as [`DbError::UniqueViolation`].
    pub async fn insert(&self, email: &str, password: &str, is_admin: bool) -> DbResult<Account> {
        debug!(%email, is_admin, "Inserting account");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (email, password, is_admin, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(email)
        .bind(password)
        .bind(is_admin)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Account", id))
    }

    /// Stores (or clears, with `None`) the password-reset token and expiry.
    pub async fn set_reset_token(
        &self,
        id: i64,
        token: Option<&str>,
        expiry: Option<DateTime<Utc>>,
    ) -> DbResult<()> {
        debug!(id, has_token = token.is_some(), "Setting reset token");

        let result =
            sqlx::query("UPDATE accounts SET reset_token = ?2, reset_token_expiry = ?3 WHERE id = ?1")
                .bind(id)
                .bind(token)
                .bind(expiry)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Account", id));
        }

        Ok(())
    }

    /// Replaces the password and consumes the reset token in one statement.
    /// Returns false when the token no longer matches (already used).
    pub async fn reset_password(&self, id: i64, token: &str, password: &str) -> DbResult<bool> {
        debug!(id, "Resetting account password");

        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password = ?3, reset_token = NULL, reset_token_expiry = NULL
            WHERE id = ?1 AND reset_token = ?2
            "#,
        )
        .bind(id)
        .bind(token)
        .bind(password)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
