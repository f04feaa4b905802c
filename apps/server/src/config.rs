//! Server configuration module.
//!
//! Configuration is loaded from environment variables. `DATABASE_URL` is
//! required; everything else has a development default.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,

    /// SQLite connection string (`sqlite://path` or a bare path)
    pub database_url: String,

    /// Secret key for signing session tokens
    pub session_secret: String,

    /// Session lifetime in seconds
    pub session_lifetime_secs: i64,

    /// Sender identity for outgoing notification email
    pub smtp_email: Option<String>,

    /// Credential for the notification sender
    pub smtp_password: Option<String>,

    /// Public base URL used in password-reset links
    pub app_url: String,

    /// Bootstrap admin email (seeded on first start)
    pub admin_email: String,

    /// Bootstrap admin password (seeded on first start)
    pub admin_password: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingRequired("DATABASE_URL".to_string()))?,

            session_secret: env::var("SESSION_SECRET").unwrap_or_else(|_| {
                // In production, this MUST be set via environment variable
                "spicetable-dev-secret-change-in-production".to_string()
            }),

            session_lifetime_secs: env::var("SESSION_LIFETIME_SECS")
                .unwrap_or_else(|_| "86400".to_string()) // 1 day
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_LIFETIME_SECS".to_string()))?,

            smtp_email: env::var("SMTP_EMAIL").ok(),

            smtp_password: env::var("SMTP_PASSWORD").ok(),

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:5000".to_string()),

            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@restaurant.com".to_string()),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
