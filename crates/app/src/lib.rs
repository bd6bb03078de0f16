//! Gatehouse application composition root
//!
//! Composes the accounts domain router with shared infrastructure routes.

use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use gatehouse_accounts::{AccountsRepositories, AccountsState};
use gatehouse_auth::AuthConfig;
use gatehouse_common::Config;
use gatehouse_email::{EmailConfig, EmailServiceFactory};
use sqlx::PgPool;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    // Create repositories
    let repos = AccountsRepositories::new(pool);

    // Auth configuration: one immutable value for codec and workflow
    let mut auth_config = AuthConfig::with_secret(config.jwt_secret.clone());
    auth_config.access_token_ttl = Duration::minutes(config.access_token_ttl_minutes);
    auth_config.verify_token_ttl = Duration::minutes(config.verify_token_ttl_minutes);
    auth_config.code_length = config.verification_code_length;

    // Create email service from environment
    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config).await?;

    // Create Accounts domain state
    let accounts_state = AccountsState::new(repos, auth_config, Arc::from(email_service))?;

    // Build router — compose domain routers with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Gatehouse API v0.1.0" }))
        .merge(gatehouse_accounts::routes().with_state(accounts_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
