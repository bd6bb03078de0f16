//! One-time verification-code workflow
//!
//! Generates short human-readable codes and adjudicates client verification
//! attempts. A rejected attempt is terminal: the caller re-issues a fresh
//! code and token rather than retrying the old ones.

use chrono::Duration;
use rand::Rng;

use crate::claims::TokenPurpose;
use crate::codec::TokenCodec;
use crate::error::{TokenError, VerifyError};

/// Alphabet verification codes are drawn from. Uppercase only, so codes read
/// unambiguously out of an email.
pub const CODE_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default verification-code length
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Generate a random verification code of the given length.
///
/// `length` must be at least 1. Codes are drawn uniformly from
/// [`CODE_ALPHABET`]; collisions across concurrent registrations are
/// possible and accepted since records are scoped per email.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Successful verification outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEmail {
    pub email: String,
}

/// Binds codes into short-lived tokens and checks submitted attempts.
#[derive(Clone)]
pub struct VerificationWorkflow {
    codec: TokenCodec,
    token_ttl: Duration,
}

impl VerificationWorkflow {
    pub fn new(codec: TokenCodec, token_ttl: Duration) -> Self {
        Self { codec, token_ttl }
    }

    /// Bind `email` and `code` into an `email-verify` token.
    ///
    /// The returned token is delivered to the user out-of-band; knowing the
    /// token alone is not enough to verify without also knowing the code.
    pub fn start_verification(&self, email: &str, code: &str) -> Result<String, TokenError> {
        self.codec.issue(
            email,
            TokenPurpose::EmailVerify,
            Some(code.to_string()),
            self.token_ttl,
        )
    }

    /// Adjudicate a verification attempt.
    ///
    /// Decode failures map onto the matching rejection; a token of the wrong
    /// purpose or without an embedded code rejects as `Malformed`; the code
    /// comparison is exact and case-sensitive.
    pub fn check_verification(
        &self,
        token: &str,
        submitted_code: &str,
    ) -> Result<VerifiedEmail, VerifyError> {
        let claims = self.codec.decode(token)?;

        if claims.purpose != TokenPurpose::EmailVerify {
            tracing::debug!(purpose = %claims.purpose, "token with wrong purpose submitted for verification");
            return Err(VerifyError::Malformed);
        }

        let expected = claims.code.as_deref().ok_or(VerifyError::Malformed)?;
        if expected != submitted_code {
            return Err(VerifyError::CodeMismatch);
        }

        Ok(VerifiedEmail { email: claims.sub })
    }
}
