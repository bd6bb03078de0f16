//! Accounts domain: users, registration, email verification, login

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{User, VerificationRecord};
pub use domain::validation::{validate_registration, ValidationIssue, MIN_PASSWORD_LENGTH};
// Re-export repository types
pub use repository::{AccountsRepositories, UserChanges, UserRepository, VerificationRepository};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
