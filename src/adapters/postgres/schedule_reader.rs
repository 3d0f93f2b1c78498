//! PostgreSQL implementation of ScheduleReader.
//!
//! Joined, read-optimized queries over class_sessions, enrollments, and
//! the externally-owned users table.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    ClassSessionId, DayRange, DomainError, EmailAddress, Timestamp, UserId, WallClockTime,
};
use crate::ports::{InstructorSummary, RosterEntry, ScheduleReader, SessionView};

use super::db_error;

// Role tags in users.user_type; see domain::foundation::Role::from_code.
const STUDENT_CODE: i32 = 1;
const INSTRUCTOR_CODE: i32 = 2;

/// PostgreSQL implementation of ScheduleReader.
#[derive(Clone)]
pub struct PostgresScheduleReader {
    pool: PgPool,
}

impl PostgresScheduleReader {
    /// Creates a new PostgresScheduleReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the rosters of the given sessions in one query.
    async fn rosters_for(
        &self,
        session_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<RosterEntry>>, DomainError> {
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT e.session_id, s.id AS student_id, s.name, s.email
            FROM enrollments e
            JOIN users s ON s.id = e.student_id
            WHERE e.session_id = ANY($1)
            ORDER BY s.name ASC, s.email ASC
            "#,
        )
        .bind(session_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch rosters", e))?;

        let mut rosters: HashMap<Uuid, Vec<RosterEntry>> = HashMap::new();
        for row in rows {
            let session_id: Uuid = row
                .try_get("session_id")
                .map_err(|e| db_error("Failed to get session_id", e))?;
            rosters
                .entry(session_id)
                .or_default()
                .push(row_to_roster_entry(&row)?);
        }
        Ok(rosters)
    }

    async fn views_from(
        &self,
        rows: Vec<sqlx::postgres::PgRow>,
    ) -> Result<Vec<SessionView>, DomainError> {
        let session_ids: Vec<Uuid> = rows
            .iter()
            .map(|row| row.try_get("id").map_err(|e| db_error("Failed to get id", e)))
            .collect::<Result<_, _>>()?;
        let mut rosters = self.rosters_for(&session_ids).await?;

        rows.into_iter()
            .map(|row| {
                let id: Uuid = row
                    .try_get("id")
                    .map_err(|e| db_error("Failed to get id", e))?;
                let roster = rosters.remove(&id).unwrap_or_default();
                row_to_view(&row, roster)
            })
            .collect()
    }
}

#[async_trait]
impl ScheduleReader for PostgresScheduleReader {
    async fn sessions_in_range(&self, range: &DayRange) -> Result<Vec<SessionView>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.date_instant, c.start_time, c.end_time,
                   i.id AS instructor_id, i.name AS instructor_name,
                   i.email AS instructor_email
            FROM class_sessions c
            JOIN users i ON i.id = c.instructor_id
            WHERE c.date_instant >= $1 AND c.date_instant < $2
            ORDER BY c.date_instant ASC, c.start_time ASC, c.name ASC
            "#,
        )
        .bind(range.start().as_datetime())
        .bind(range.end().as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch sessions in range", e))?;

        self.views_from(rows).await
    }

    async fn sessions_for_student(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<SessionView>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.date_instant, c.start_time, c.end_time,
                   i.id AS instructor_id, i.name AS instructor_name,
                   i.email AS instructor_email
            FROM class_sessions c
            JOIN users i ON i.id = c.instructor_id
            JOIN enrollments e ON e.session_id = c.id
            JOIN users s ON s.id = e.student_id
            WHERE s.email = $1 AND s.user_type = $2 AND i.user_type = $3
            ORDER BY c.date_instant ASC, c.start_time ASC, c.name ASC
            "#,
        )
        .bind(email.as_str())
        .bind(STUDENT_CODE)
        .bind(INSTRUCTOR_CODE)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch sessions for student", e))?;

        self.views_from(rows).await
    }

    async fn roster_for_session(
        &self,
        session_id: &ClassSessionId,
    ) -> Result<Vec<RosterEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT e.session_id, s.id AS student_id, s.name, s.email
            FROM enrollments e
            JOIN users s ON s.id = e.student_id
            WHERE e.session_id = $1
            ORDER BY s.name ASC, s.email ASC
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch roster", e))?;

        rows.iter().map(row_to_roster_entry).collect()
    }
}

fn row_to_roster_entry(row: &sqlx::postgres::PgRow) -> Result<RosterEntry, DomainError> {
    let student_id: Uuid = row
        .try_get("student_id")
        .map_err(|e| db_error("Failed to get student_id", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| db_error("Failed to get name", e))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| db_error("Failed to get email", e))?;

    Ok(RosterEntry {
        student_id: UserId::from_uuid(student_id),
        name,
        email: parse_stored_email(&email)?,
    })
}

fn row_to_view(
    row: &sqlx::postgres::PgRow,
    roster: Vec<RosterEntry>,
) -> Result<SessionView, DomainError> {
    let id: Uuid = row
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
    let instructor_id: Uuid = row
        .try_get("instructor_id")
        .map_err(|e| db_error("Failed to get instructor_id", e))?;
    let instructor_name: String = row
        .try_get("instructor_name")
        .map_err(|e| db_error("Failed to get instructor_name", e))?;
    let instructor_email: String = row
        .try_get("instructor_email")
        .map_err(|e| db_error("Failed to get instructor_email", e))?;

    Ok(SessionView {
        id: ClassSessionId::from_uuid(id),
        name,
        date: Timestamp::from_datetime(date_instant),
        start_time: WallClockTime::from_naive_time(start_time),
        end_time: WallClockTime::from_naive_time(end_time),
        instructor: InstructorSummary {
            id: UserId::from_uuid(instructor_id),
            name: instructor_name,
            email: parse_stored_email(&instructor_email)?,
        },
        roster,
    })
}

fn parse_stored_email(raw: &str) -> Result<EmailAddress, DomainError> {
    EmailAddress::parse(raw).map_err(|e| {
        DomainError::new(
            crate::domain::foundation::ErrorCode::DatabaseError,
            format!("Stored email is malformed: {}", e),
        )
    })
}
