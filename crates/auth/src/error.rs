//! Token and verification error taxonomy
//!
//! All variants are recoverable by the caller; none are process-fatal.
//! The only fatal class is [`ConfigError`], surfaced at startup before any
//! request is served.

use thiserror::Error;

/// Why a token failed to decode.
///
/// The three kinds are distinguishable so callers can decide how much detail
/// to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token cannot be parsed into the expected shape at all
    #[error("token is malformed")]
    Malformed,

    /// Structurally valid but past its expiry
    #[error("token has expired")]
    Expired,

    /// Structurally valid but the signature does not verify against the
    /// configured secret and algorithm
    #[error("token signature is invalid")]
    InvalidSignature,
}

/// Why a verification attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("verification token is malformed")]
    Malformed,

    #[error("verification token has expired")]
    Expired,

    #[error("verification token signature is invalid")]
    InvalidSignature,

    /// Token decoded cleanly but the submitted code differs from the one
    /// bound into it
    #[error("submitted code does not match")]
    CodeMismatch,
}

impl From<TokenError> for VerifyError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => VerifyError::Malformed,
            TokenError::Expired => VerifyError::Expired,
            TokenError::InvalidSignature => VerifyError::InvalidSignature,
        }
    }
}

/// Fatal configuration errors.
///
/// The codec refuses to issue or decode without a configured secret rather
/// than silently using a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("signing secret must not be empty")]
    EmptySecret,
}
