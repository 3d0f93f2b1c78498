//! PostgreSQL implementation of EnrollmentRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{ClassSessionId, DomainError, UserId};
use crate::ports::EnrollmentRepository;

use super::{db_error, map_unique_violation};

/// PostgreSQL implementation of EnrollmentRepository.
///
/// The `enrollments_session_student_key` unique constraint is the
/// authoritative duplicate guard; this adapter maps its violation to
/// `AlreadyEnrolled`.
#[derive(Clone)]
pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    /// Creates a new PostgresEnrollmentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO enrollments (id, session_id, student_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(enrollment.id().as_uuid())
        .bind(enrollment.session_id().as_uuid())
        .bind(enrollment.student_id().as_uuid())
        .bind(enrollment.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to insert enrollment"))?;

        Ok(())
    }

    async fn exists_for(
        &self,
        session_id: &ClassSessionId,
        student_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM enrollments WHERE session_id = $1 AND student_id = $2",
        )
        .bind(session_id.as_uuid())
        .bind(student_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check enrollment existence", e))?;

        Ok(result.0 > 0)
    }
}
