//! Repository layer for the Accounts domain

mod users;
mod verifications;

pub use users::{UserChanges, UserRepository};
pub use verifications::VerificationRepository;

use sqlx::PgPool;

/// All Accounts domain repositories sharing one pool
#[derive(Clone)]
pub struct AccountsRepositories {
    pub users: UserRepository,
    pub verifications: VerificationRepository,
}

impl AccountsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            verifications: VerificationRepository::new(pool),
        }
    }
}
