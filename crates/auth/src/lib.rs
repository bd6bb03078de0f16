//! Token issuance and verification for Gatehouse
//!
//! Provides the signed-token codec (login and email-verification claim sets),
//! the one-time verification-code workflow built on top of it, and bearer
//! extraction helpers for the HTTP layer.
//!
//! Everything here is a pure function of its inputs, the wall clock, and an
//! immutable signing secret supplied at construction time. No I/O, no shared
//! mutable state.

mod bearer;
mod claims;
mod codec;
mod config;
mod error;
mod verification;

pub use bearer::{bearer_from_header, token_from_cookie_header};
pub use claims::{Claims, TokenPurpose};
pub use codec::TokenCodec;
pub use config::AuthConfig;
pub use error::{ConfigError, TokenError, VerifyError};
pub use verification::{
    generate_code, VerificationWorkflow, VerifiedEmail, CODE_ALPHABET, DEFAULT_CODE_LENGTH,
};
