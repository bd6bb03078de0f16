//! Authentication configuration
//!
//! An explicit immutable value handed to the codec and workflow at
//! construction time; never read from ambient global state.

use chrono::Duration;
use jsonwebtoken::Algorithm;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide signing secret; rotating it invalidates all outstanding tokens
    pub jwt_secret: String,
    /// Signing algorithm identifier
    pub algorithm: Algorithm,
    /// Lifetime of login tokens
    pub access_token_ttl: Duration,
    /// Lifetime of email-verification tokens
    pub verify_token_ttl: Duration,
    /// Length of generated verification codes
    pub code_length: usize,
}

impl AuthConfig {
    /// Config with the given secret and default HS256 / 30 min / 1 min / 4-char settings
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(30),
            verify_token_ttl: Duration::minutes(1),
            code_length: 4,
        }
    }
}
