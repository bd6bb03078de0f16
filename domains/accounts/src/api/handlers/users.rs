//! User management API handlers
//!
//! Implements registration, email verification, and user CRUD:
//! - POST /v1/users/register - Create a user and start email verification
//! - POST /v1/users/verify - Submit a verification token + code
//! - GET /v1/users - List users
//! - GET /v1/users/{id} - Fetch one user
//! - PATCH /v1/users/{id} - Partial update
//! - DELETE /v1/users/{id} - Delete a user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_auth::{generate_code, VerifyError};
use gatehouse_common::{Error, Result};

use crate::api::middleware::{AccountsState, CurrentUser};
use crate::domain::entities::{hash_password, User, VerificationRecord};
use crate::domain::validation::{validate_registration, MIN_PASSWORD_LENGTH};
use crate::repository::UserChanges;

/// Response for user operations
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_verified: user.is_verified,
            verified_at: user.verified_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Response for user registration.
///
/// The verification token is also delivered by email; it is returned here so
/// API clients can drive the verify step without a mailbox.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub verification_token: String,
}

/// Request for email verification
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
    pub code: String,
}

/// Response for email verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: &'static str,
    pub email: String,
}

/// Request for partial user update
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

/// POST /v1/users/register - Create a user and start email verification
pub async fn register(
    State(state): State<AccountsState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let issues = validate_registration(&request.email, &request.password);
    if !issues.is_empty() {
        let detail = issues
            .iter()
            .map(|issue| issue.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(Error::Validation(detail));
    }

    if state
        .repos
        .users
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(format!(
            "Email '{}' already exists",
            request.email
        )));
    }

    let user = User::new(request.email.clone(), &request.password)?;
    let mut created = state.repos.users.create(&user).await?;

    // One outstanding code per email; this replaces any prior record
    let code = generate_code(state.auth.code_length);
    let record = VerificationRecord::new(created.email.clone(), &code);
    state.repos.verifications.replace(&record).await?;

    let token = state
        .verification
        .start_verification(&created.email, &code)
        .map_err(|e| Error::Internal(format!("Failed to issue verification token: {}", e)))?;

    state
        .email
        .send_verification_code(&created.email, &code, &token)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %created.email, "verification email failed");
            Error::EmailDelivery("Can't send verification code".to_string())
        })?;

    if let Some(updated) = state
        .repos
        .users
        .mark_verification_sent(&created.email)
        .await?
    {
        created = updated;
    }

    tracing::info!(user_id = %created.id, "user registered, verification email sent");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: created.into(),
            verification_token: token,
        }),
    ))
}

/// POST /v1/users/verify - Submit a verification token + code
pub async fn verify_email(
    State(state): State<AccountsState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    let verified = state
        .verification
        .check_verification(&request.token, &request.code)
        .map_err(|e| match e {
            VerifyError::Expired => {
                Error::Authentication("Verification token has expired".to_string())
            }
            VerifyError::CodeMismatch => {
                Error::Authentication("Wrong verification code".to_string())
            }
            VerifyError::Malformed | VerifyError::InvalidSignature => {
                Error::Authentication("Invalid verification token".to_string())
            }
        })?;

    // Cross-check against the persisted record when one is outstanding
    if let Some(record) = state
        .repos
        .verifications
        .find_by_email(&verified.email)
        .await?
    {
        if !record.matches(&request.code) {
            return Err(Error::Authentication(
                "Wrong verification code".to_string(),
            ));
        }
    }

    let user = state
        .repos
        .users
        .mark_verified(&verified.email)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Can't find user {}", verified.email)))?;

    // The record is consumed; a rejected attempt requires a fresh registration
    state
        .repos
        .verifications
        .delete_by_email(&verified.email)
        .await?;

    tracing::info!(user_id = %user.id, "email verified");

    Ok(Json(VerifyResponse {
        message: "Code successfully verified",
        email: user.email,
    }))
}

/// GET /v1/users - List users
pub async fn list_users(
    State(state): State<AccountsState>,
    _current: CurrentUser,
) -> Result<Json<Vec<UserResponse>>> {
    let users = state.repos.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /v1/users/{id} - Fetch one user
pub async fn get_user(
    State(state): State<AccountsState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>> {
    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("The user with id {} doesn't exist", user_id)))?;

    Ok(Json(user.into()))
}

/// PATCH /v1/users/{id} - Partial update
pub async fn update_user(
    State(state): State<AccountsState>,
    _current: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let hashed_password = match request.password.as_deref() {
        Some(password) if password.len() < MIN_PASSWORD_LENGTH => {
            return Err(Error::Validation(
                "Password must have at least 8 chars".to_string(),
            ));
        }
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let changes = UserChanges {
        hashed_password,
        is_active: request.is_active,
    };

    let updated = state
        .repos
        .users
        .update(user_id, changes)
        .await?
        .ok_or_else(|| Error::NotFound(format!("The user with id {} doesn't exist", user_id)))?;

    Ok(Json(updated.into()))
}

/// DELETE /v1/users/{id} - Delete a user
pub async fn delete_user(
    State(state): State<AccountsState>,
    _current: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.users.delete(user_id).await?;
    if !deleted {
        return Err(Error::NotFound(format!(
            "The user with id {} doesn't exist",
            user_id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
