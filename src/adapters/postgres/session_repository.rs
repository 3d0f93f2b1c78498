//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use chrono_tz::Tz;
use sqlx::{PgPool, Row};

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{
    CalendarDate, ClassSessionId, DomainError, Timestamp, UserId, WallClockTime,
};
use crate::domain::session::{ClassSession, SessionKey};
use crate::ports::SessionRepository;

use super::{db_error, map_unique_violation};

/// PostgreSQL implementation of SessionRepository.
///
/// Session dates are stored as the instant of midnight in the configured
/// reference timezone. The `class_sessions_natural_key` unique constraint
/// is the authoritative duplicate guard; this adapter maps its violation
/// to `DuplicateSession`.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
    reference_tz: Tz,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool, reference_tz: Tz) -> Self {
        Self { pool, reference_tz }
    }

    fn date_instant(&self, date: CalendarDate) -> Timestamp {
        date.midnight_in(self.reference_tz)
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save_with_roster(
        &self,
        session: &ClassSession,
        roster: &[Enrollment],
    ) -> Result<(), DomainError> {
        // One transaction: a roster failure must roll the session back.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO class_sessions (
                id, name, date_instant, start_time, end_time, instructor_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.name())
        .bind(self.date_instant(session.date()).as_datetime())
        .bind(session.start_time().as_naive_time())
        .bind(session.end_time().as_naive_time())
        .bind(session.instructor_id().as_uuid())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to insert session"))?;

        for enrollment in roster {
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
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, "Failed to insert initial enrollment"))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit session", e))?;

        Ok(())
    }

    async fn find_by_natural_key(
        &self,
        key: &SessionKey,
    ) -> Result<Option<ClassSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, date_instant, start_time, end_time, instructor_id,
                   created_at, updated_at
            FROM class_sessions
            WHERE name = $1 AND date_instant = $2 AND start_time = $3 AND instructor_id = $4
            "#,
        )
        .bind(&key.name)
        .bind(self.date_instant(key.date).as_datetime())
        .bind(key.start_time.as_naive_time())
        .bind(key.instructor_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session by natural key", e))?;

        row.map(|row| row_to_session(row, self.reference_tz)).transpose()
    }

    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, date_instant, start_time, end_time, instructor_id,
                   created_at, updated_at
            FROM class_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session", e))?;

        row.map(|row| row_to_session(row, self.reference_tz)).transpose()
    }

    async fn exists(&self, id: &ClassSessionId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM class_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check session existence", e))?;

        Ok(result.0 > 0)
    }
}

fn row_to_session(row: sqlx::postgres::PgRow, reference_tz: Tz) -> Result<ClassSession, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;

    let name: String = row
        .try_get("name")
        .map_err(|e| db_error("Failed to get name", e))?;

    let date_instant: chrono::DateTime<chrono::Utc> = row
        .try_get("date_instant")
        .map_err(|e| db_error("Failed to get date_instant", e))?;

    let start_time: chrono::NaiveTime = row
        .try_get("start_time")
        .map_err(|e| db_error("Failed to get start_time", e))?;

    let end_time: chrono::NaiveTime = row
        .try_get("end_time")
        .map_err(|e| db_error("Failed to get end_time", e))?;

    let instructor_id: uuid::Uuid = row
        .try_get("instructor_id")
        .map_err(|e| db_error("Failed to get instructor_id", e))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("Failed to get updated_at", e))?;

    // Stored instants are midnight in the reference timezone; converting
    // back through it recovers the calendar date.
    let date = CalendarDate::from_naive(date_instant.with_timezone(&reference_tz).date_naive());

    Ok(ClassSession::reconstitute(
        ClassSessionId::from_uuid(id),
        name,
        date,
        WallClockTime::from_naive_time(start_time),
        WallClockTime::from_naive_time(end_time),
        UserId::from_uuid(instructor_id),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
