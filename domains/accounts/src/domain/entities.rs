//! Domain entities for the Accounts domain
//!
//! Each entity validates its invariants at construction time; passwords and
//! verification codes are only ever stored hashed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_common::{crypto, Error, Result};
use validator::ValidateEmail;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_verified: bool,
    /// When the verification email was last sent
    pub verification_sent_at: Option<DateTime<Utc>>,
    /// When the email address was verified
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation; the password is hashed immediately
    /// and never held in the entity.
    pub fn new(email: String, password: &str) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        let hashed_password = hash_password(password)?;

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            email,
            hashed_password,
            is_active: true,
            is_verified: false,
            verification_sent_at: None,
            verified_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.hashed_password).unwrap_or(false)
    }

    /// Validate entity invariants
    pub fn validate(&self) -> Result<()> {
        if !self.email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        // Verified users carry a verification timestamp
        if self.is_verified && self.verified_at.is_none() {
            return Err(Error::Validation(
                "Verified users must have a verification timestamp".to_string(),
            ));
        }

        Ok(())
    }
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

/// Persisted verification record: one hashed code per email.
///
/// The alternative to the self-contained token path, used so a submitted
/// code can also be checked against server-side state. At most one
/// outstanding record exists per email; a new registration replaces any
/// prior one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub user_email: String,
    pub hashed_code: String,
    pub created_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Create a record binding `email` to a hash of `code`
    pub fn new(email: String, code: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_email: email,
            hashed_code: crypto::hash_code(code),
            created_at: Utc::now(),
        }
    }

    /// Check a submitted code against the stored hash
    pub fn matches(&self, submitted_code: &str) -> bool {
        crypto::verify_code_hash(submitted_code, &self.hashed_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_hashes_password() {
        let user = User::new("user@example.com".to_string(), "s3cret-password").unwrap();
        assert_ne!(user.hashed_password, "s3cret-password");
        assert!(user.verify_password("s3cret-password"));
        assert!(!user.verify_password("wrong-password"));
    }

    #[test]
    fn test_user_new_defaults() {
        let user = User::new("user@example.com".to_string(), "s3cret-password").unwrap();
        assert!(user.is_active);
        assert!(!user.is_verified);
        assert!(user.verified_at.is_none());
        assert!(user.verification_sent_at.is_none());
    }

    #[test]
    fn test_user_new_rejects_invalid_email() {
        assert!(User::new("not-an-email".to_string(), "s3cret-password").is_err());
        assert!(User::new("".to_string(), "s3cret-password").is_err());
    }

    #[test]
    fn test_user_validate_verified_requires_timestamp() {
        let mut user = User::new("user@example.com".to_string(), "s3cret-password").unwrap();
        user.is_verified = true;
        assert!(user.validate().is_err());

        user.verified_at = Some(Utc::now());
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User::new("user@example.com".to_string(), "s3cret-password").unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
    }

    #[test]
    fn test_verification_record_matches() {
        let record = VerificationRecord::new("user@example.com".to_string(), "ABCD");
        assert_ne!(record.hashed_code, "ABCD");
        assert!(record.matches("ABCD"));
        assert!(!record.matches("ABCE"));
        assert!(!record.matches("abcd"));
    }
}
