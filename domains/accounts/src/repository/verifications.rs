//! Verification record repository
//!
//! At most one outstanding record per email: a new registration replaces any
//! prior record, and a successful verification consumes it.

use crate::domain::entities::VerificationRecord;
use gatehouse_common::Result;
use sqlx::PgPool;

#[derive(Clone)]
pub struct VerificationRepository {
    pool: PgPool,
}

impl VerificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Save a verification record, replacing any prior record for the email
    pub async fn replace(&self, record: &VerificationRecord) -> Result<VerificationRecord> {
        let saved = sqlx::query_as::<_, VerificationRecord>(
            r#"
            INSERT INTO verification_codes (id, user_email, hashed_code, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_email) DO UPDATE SET
                hashed_code = EXCLUDED.hashed_code,
                created_at = EXCLUDED.created_at
            RETURNING id, user_email, hashed_code, created_at
            "#,
        )
        .bind(record.id)
        .bind(&record.user_email)
        .bind(&record.hashed_code)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    /// Find the outstanding record for an email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<VerificationRecord>> {
        let record = sqlx::query_as::<_, VerificationRecord>(
            r#"
            SELECT id, user_email, hashed_code, created_at
            FROM verification_codes
            WHERE user_email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Consume the record for an email; returns whether one existed
    pub async fn delete_by_email(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE user_email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
