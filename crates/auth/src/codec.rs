//! Signed token codec
//!
//! Turns a claim set into an opaque, signed, transportable string and back.
//! Tokens are self-contained: verification needs no external store, traded
//! off against revocability. The verification workflow compensates by also
//! checking the submitted code against the decoded claim.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};

use crate::claims::{Claims, TokenPurpose};
use crate::config::AuthConfig;
use crate::error::{ConfigError, TokenError};

/// Issues and decodes signed, time-bounded claim sets.
///
/// Construction captures the secret and algorithm once; the codec itself is
/// immutable and safe to share across tasks.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from the given configuration.
    ///
    /// Refuses an empty signing secret; this is fatal at startup, before any
    /// request is served.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        if config.jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let mut validation = Validation::new(config.algorithm);
        // The expiry boundary is exact: a token is invalid the second its
        // lifetime ends, not sixty seconds later.
        validation.leeway = 0;
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
            header: Header::new(config.algorithm),
            validation,
        })
    }

    /// Sign a claim set expiring `lifetime` from now.
    ///
    /// `lifetime` must be positive so that `exp > iat` holds.
    pub fn issue(
        &self,
        subject: &str,
        purpose: TokenPurpose,
        code: Option<String>,
        lifetime: Duration,
    ) -> Result<String, TokenError> {
        debug_assert!(lifetime > Duration::zero(), "token lifetime must be positive");

        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            purpose,
            code,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            tracing::debug!(error = %e, "token encoding failed");
            TokenError::Malformed
        })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// The three failure kinds are distinguishable: `Malformed` when the
    /// token cannot be parsed, `Expired` when past `exp`, `InvalidSignature`
    /// when the signature (or algorithm) does not match.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "token validation failed");
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::Malformed,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn test_codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig::with_secret("test-secret-key")).unwrap()
    }

    /// Encode claims directly, bypassing `issue`, to control timestamps.
    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .expect("Failed to encode token")
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = TokenCodec::new(&AuthConfig::with_secret(""));
        assert_eq!(result.err(), Some(ConfigError::EmptySecret));
    }

    #[test]
    fn test_roundtrip_login_token() {
        let codec = test_codec();
        let token = codec
            .issue("user@example.com", TokenPurpose::Login, None, Duration::minutes(30))
            .unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.purpose, TokenPurpose::Login);
        assert_eq!(claims.code, None);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_roundtrip_preserves_code() {
        let codec = test_codec();
        let token = codec
            .issue(
                "user@example.com",
                TokenPurpose::EmailVerify,
                Some("ABCD".to_string()),
                Duration::minutes(1),
            )
            .unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.purpose, TokenPurpose::EmailVerify);
        assert_eq!(claims.code.as_deref(), Some("ABCD"));
    }

    #[test]
    fn test_token_has_compact_jws_shape() {
        let codec = test_codec();
        let token = codec
            .issue("user@example.com", TokenPurpose::Login, None, Duration::minutes(5))
            .unwrap();

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_decode_expired_token() {
        let codec = test_codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user@example.com".to_string(),
            purpose: TokenPurpose::Login,
            code: None,
            iat: now - 120,
            exp: now - 60,
        };
        let token = encode_raw(&claims, "test-secret-key");

        assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_decode_just_inside_expiry() {
        let codec = test_codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user@example.com".to_string(),
            purpose: TokenPurpose::Login,
            code: None,
            iat: now - 60,
            exp: now + 5,
        };
        let token = encode_raw(&claims, "test-secret-key");

        assert!(codec.decode(&token).is_ok());
    }

    #[test]
    fn test_decode_wrong_secret() {
        let codec = test_codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user@example.com".to_string(),
            purpose: TokenPurpose::Login,
            code: None,
            iat: now,
            exp: now + 300,
        };
        let token = encode_raw(&claims, "some-other-secret");

        assert_eq!(codec.decode(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_decode_tampered_signature() {
        let codec = test_codec();
        let token = codec
            .issue("user@example.com", TokenPurpose::Login, None, Duration::minutes(5))
            .unwrap();

        // Flip a byte in the signature segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut sig_bytes = parts[2].clone().into_bytes();
        sig_bytes[0] = if sig_bytes[0] == b'A' { b'B' } else { b'A' };
        parts[2] = String::from_utf8(sig_bytes).unwrap();
        let tampered = parts.join(".");

        assert_eq!(codec.decode(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_decode_tampered_payload() {
        let codec = test_codec();
        let token = codec
            .issue("user@example.com", TokenPurpose::Login, None, Duration::minutes(5))
            .unwrap();

        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        // A rewritten payload no longer matches the signature
        assert_eq!(codec.decode(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let codec = test_codec();
        assert_eq!(codec.decode("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.decode(""), Err(TokenError::Malformed));
        assert_eq!(codec.decode("a.b"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_decode_foreign_claim_shape_is_malformed() {
        let codec = test_codec();

        // Valid JWS, but the payload lacks the expected claim shape
        #[derive(serde::Serialize)]
        struct Foreign {
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Foreign {
                exp: Utc::now().timestamp() + 300,
            },
            &EncodingKey::from_secret("test-secret-key".as_ref()),
        )
        .unwrap();

        assert_eq!(codec.decode(&token), Err(TokenError::Malformed));
    }
}
