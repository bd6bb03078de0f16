//! User repository

use crate::domain::entities::User;
use gatehouse_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Partial update of a user record; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub hashed_password: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new user
    pub async fn create(&self, user: &User) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, hashed_password, is_active, is_verified,
                               verification_sent_at, verified_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, email, hashed_password, is_active, is_verified,
                      verification_sent_at, verified_at, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.is_active)
        .bind(user.is_verified)
        .bind(user.verification_sent_at)
        .bind(user.verified_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::AlreadyExists
            }
            _ => RepositoryError::Connection(e),
        })?;

        Ok(created)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active, is_verified,
                   verification_sent_at, verified_at, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by exact email equality
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active, is_verified,
                   verification_sent_at, verified_at, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List all users, oldest first
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active, is_verified,
                   verification_sent_at, verified_at, created_at, updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Apply a partial update to a user
    pub async fn update(&self, user_id: Uuid, changes: UserChanges) -> Result<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                hashed_password = COALESCE($2, hashed_password),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, hashed_password, is_active, is_verified,
                      verification_sent_at, verified_at, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(changes.hashed_password)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Record that the verification email was sent
    pub async fn mark_verification_sent(&self, email: &str) -> Result<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                verification_sent_at = NOW(),
                updated_at = NOW()
            WHERE email = $1
            RETURNING id, email, hashed_password, is_active, is_verified,
                      verification_sent_at, verified_at, created_at, updated_at
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Mark a user's email as verified
    pub async fn mark_verified(&self, email: &str) -> Result<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                is_verified = TRUE,
                verified_at = NOW(),
                updated_at = NOW()
            WHERE email = $1
            RETURNING id, email, hashed_password, is_active, is_verified,
                      verification_sent_at, verified_at, created_at, updated_at
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a user; returns whether a row was removed
    pub async fn delete(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
