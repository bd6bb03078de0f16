//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Token signing secret. Missing secret is fatal at startup: the
    /// service refuses to issue or decode tokens without one.
    pub jwt_secret: String,

    /// Login token lifetime in minutes
    pub access_token_ttl_minutes: i64,

    /// Email-verification token lifetime in minutes
    pub verify_token_ttl_minutes: i64,

    /// Length of generated verification codes
    pub verification_code_length: usize,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,

            access_token_ttl_minutes: env::var("ACCESS_TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            verify_token_ttl_minutes: env::var("VERIFY_TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            verification_code_length: env::var("VERIFICATION_CODE_LENGTH")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "gatehouse=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        if config.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        Ok(config)
    }
}
