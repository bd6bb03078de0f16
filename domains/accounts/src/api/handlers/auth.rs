//! Authentication API handlers
//!
//! Implements:
//! - POST /v1/auth/token - Exchange email + password for a login token
//! - GET /v1/auth/whoami - Return the profile behind the presented token

use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use gatehouse_auth::TokenPurpose;
use gatehouse_common::{Error, Result};

use crate::api::handlers::users::UserResponse;
use crate::api::middleware::{AccountsState, CurrentUser};

/// Request for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /v1/auth/token - Exchange email + password for a login token
///
/// The token is returned in the body and also set as an HttpOnly cookie for
/// browser clients.
pub async fn login(
    State(state): State<AccountsState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .repos
        .users
        .find_by_email(&request.email)
        .await?
        .filter(|user| user.verify_password(&request.password))
        .ok_or_else(|| Error::Authentication("Incorrect email or password".to_string()))?;

    if !user.is_active {
        return Err(Error::Authentication(
            "This email address isn't active, please contact your admin".to_string(),
        ));
    }

    let access_token = state
        .codec
        .issue(
            &user.email,
            TokenPurpose::Login,
            None,
            state.auth.access_token_ttl,
        )
        .map_err(|e| Error::Internal(format!("Failed to issue login token: {}", e)))?;

    tracing::info!(user_id = %user.id, "login token issued");

    let cookie = format!(
        "access_token={}; HttpOnly; Path=/; SameSite=Lax",
        access_token
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(TokenResponse {
            access_token,
            token_type: "bearer",
        }),
    ))
}

/// GET /v1/auth/whoami - Return the profile behind the presented token
pub async fn whoami(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
