//! Token Lifecycle Integration Tests
//!
//! Exercises expiry and tamper behavior of the token codec end to end,
//! including real clock advancement past a short lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use gatehouse_auth::{
    AuthConfig, Claims, TokenCodec, TokenError, TokenPurpose, VerificationWorkflow, VerifyError,
};

const SECRET: &str = "integration-test-secret";

fn test_codec() -> TokenCodec {
    TokenCodec::new(&AuthConfig::with_secret(SECRET)).unwrap()
}

#[tokio::test]
async fn test_token_expires_after_lifetime_elapses() {
    let codec = test_codec();

    // One-second lifetime, then let the clock actually pass it
    let token = codec
        .issue(
            "user@example.com",
            TokenPurpose::EmailVerify,
            Some("ABCD".to_string()),
            Duration::seconds(1),
        )
        .unwrap();

    assert!(codec.decode(&token).is_ok(), "token should be valid before expiry");

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;

    assert_eq!(
        codec.decode(&token),
        Err(TokenError::Expired),
        "token should expire once its lifetime has elapsed"
    );
}

#[tokio::test]
async fn test_expired_verification_attempt_reports_expired() {
    let codec = test_codec();
    let workflow = VerificationWorkflow::new(codec, Duration::minutes(1));

    // Forge an already-expired verification token with the same secret
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "user@example.com".to_string(),
        purpose: TokenPurpose::EmailVerify,
        code: Some("ABCD".to_string()),
        iat: now - 120,
        exp: now - 60,
    };
    let expired_token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_ref()),
    )
    .unwrap();

    assert_eq!(
        workflow.check_verification(&expired_token, "ABCD"),
        Err(VerifyError::Expired)
    );
}

#[tokio::test]
async fn test_tampered_signature_never_verifies() {
    let codec = test_codec();
    let token = codec
        .issue("user@example.com", TokenPurpose::Login, None, Duration::minutes(30))
        .unwrap();

    let (rest, signature) = token.rsplit_once('.').unwrap();

    // Flip every signature byte position in turn; none may verify
    for i in 0..signature.len() {
        let mut sig_bytes = signature.as_bytes().to_vec();
        sig_bytes[i] = if sig_bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{}.{}", rest, String::from_utf8(sig_bytes).unwrap());

        assert!(
            codec.decode(&tampered).is_err(),
            "tampered signature at byte {} must not verify",
            i
        );
    }
}

#[tokio::test]
async fn test_token_issued_with_other_secret_is_rejected() {
    let codec = test_codec();
    let foreign_codec = TokenCodec::new(&AuthConfig::with_secret("some-other-secret")).unwrap();

    let token = foreign_codec
        .issue("user@example.com", TokenPurpose::Login, None, Duration::minutes(30))
        .unwrap();

    assert_eq!(codec.decode(&token), Err(TokenError::InvalidSignature));
}

#[tokio::test]
async fn test_login_token_rejected_by_verification_workflow() {
    let codec = test_codec();
    let workflow = VerificationWorkflow::new(codec.clone(), Duration::minutes(1));

    let login_token = codec
        .issue("user@example.com", TokenPurpose::Login, None, Duration::minutes(30))
        .unwrap();

    // Valid signature and expiry, but the wrong purpose
    assert_eq!(
        workflow.check_verification(&login_token, "ABCD"),
        Err(VerifyError::Malformed)
    );
}
