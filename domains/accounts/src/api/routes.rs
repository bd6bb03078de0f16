//! Route definitions for the Accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, users};
use super::middleware::AccountsState;

/// Create user management routes
fn user_routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/users/register", post(users::register))
        .route("/v1/users/verify", post(users::verify_email))
        .route("/v1/users", get(users::list_users))
        .route(
            "/v1/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

/// Create auth routes
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/auth/token", post(auth::login))
        .route("/v1/auth/whoami", get(auth::whoami))
}

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new().merge(user_routes()).merge(auth_routes())
}
