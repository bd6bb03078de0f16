//! Accounts domain state and authentication extractor

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use gatehouse_auth::{
    bearer_from_header, token_from_cookie_header, AuthConfig, ConfigError, TokenCodec, TokenError,
    TokenPurpose, VerificationWorkflow,
};
use gatehouse_common::Error;
use gatehouse_email::EmailService;

use crate::domain::entities::User;
use crate::repository::AccountsRepositories;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub repos: AccountsRepositories,
    pub auth: AuthConfig,
    pub codec: TokenCodec,
    pub verification: VerificationWorkflow,
    pub email: Arc<dyn EmailService>,
}

impl AccountsState {
    /// Wire up the domain state from its collaborators.
    ///
    /// Fails fast when the auth configuration is unusable (empty secret).
    pub fn new(
        repos: AccountsRepositories,
        auth: AuthConfig,
        email: Arc<dyn EmailService>,
    ) -> Result<Self, ConfigError> {
        let codec = TokenCodec::new(&auth)?;
        let verification = VerificationWorkflow::new(codec.clone(), auth.verify_token_ttl);

        Ok(Self {
            repos,
            auth,
            codec,
            verification,
            email,
        })
    }
}

/// Authenticated user extractor.
///
/// Resolves a login token from the `Authorization` header or the
/// `access_token` cookie, decodes it, checks the purpose, and loads the
/// user. Email-verification tokens are never accepted here.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AccountsState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let state = AccountsState::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(bearer_from_header)
            .or_else(|| {
                parts
                    .headers
                    .get(header::COOKIE)
                    .and_then(token_from_cookie_header)
            })
            .ok_or_else(|| Error::Authentication("Not authenticated".to_string()))?;

        let claims = state.codec.decode(&token).map_err(|e| {
            tracing::debug!(error = %e, "login token rejected");
            match e {
                TokenError::Expired => Error::Authentication("Token has expired".to_string()),
                TokenError::Malformed | TokenError::InvalidSignature => {
                    Error::Authentication("Could not validate credentials".to_string())
                }
            }
        })?;

        if claims.purpose != TokenPurpose::Login {
            tracing::debug!(purpose = %claims.purpose, "non-login token presented for authentication");
            return Err(Error::Authentication(
                "Could not validate credentials".to_string(),
            ));
        }

        let user = state
            .repos
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| Error::Authentication("Could not validate credentials".to_string()))?;

        Ok(CurrentUser(user))
    }
}
