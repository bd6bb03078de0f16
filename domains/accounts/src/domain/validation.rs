//! Validation helpers for registration input
//!
//! Validation is a pure function over the submitted values returning a list
//! of error descriptors; nothing accumulates state between validate and
//! render.

use serde::Serialize;
use validator::ValidateEmail;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: &'static str,
}

/// Validate registration input, returning every issue found.
pub fn validate_registration(email: &str, password: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !email.validate_email() {
        issues.push(ValidationIssue {
            field: "email",
            message: "Invalid email address",
        });
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        issues.push(ValidationIssue {
            field: "password",
            message: "Password must have at least 8 chars",
        });
    }

    issues
}
