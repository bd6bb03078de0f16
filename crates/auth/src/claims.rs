//! Signed claim set types

use serde::{Deserialize, Serialize};

/// What a token asserts it is for.
///
/// Consumers must check the purpose: a login token is never accepted where
/// an email-verification token is expected, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenPurpose {
    Login,
    EmailVerify,
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPurpose::Login => write!(f, "login"),
            TokenPurpose::EmailVerify => write!(f, "email-verify"),
        }
    }
}

/// The payload signed into a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token asserts (an email address)
    pub sub: String,
    /// What the token may be used for
    pub purpose: TokenPurpose,
    /// One-time verification code, present only for `email-verify` tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds); always strictly greater than `iat`
    pub exp: i64,
}
