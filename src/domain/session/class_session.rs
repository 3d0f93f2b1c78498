//! ClassSession entity.
//!
//! One scheduled occurrence of a class, owned by one instructor.
//!
//! # Ownership
//!
//! Sessions reference their instructor and their enrollments by ID only.
//! The user record lives in the role directory; enrollments live in the
//! enrollment ledger.

use crate::domain::foundation::{
    CalendarDate, ClassSessionId, Timestamp, UserId, ValidationError, WallClockTime,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a session name.
pub const MAX_NAME_LENGTH: usize = 200;

/// The natural key of a session: no two sessions may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub name: String,
    pub date: CalendarDate,
    pub start_time: WallClockTime,
    pub instructor_id: UserId,
}

/// One scheduled occurrence of a class.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `name` is 1-200 characters after trimming
/// - `(name, date, start_time, instructor_id)` is unique across all
///   sessions; the storage layer enforces this, the registry pre-checks it
///
/// Sessions are create-only: there is no update or cancel path in the
/// scheduling core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    /// Unique identifier for this session.
    id: ClassSessionId,

    /// Display name of the class.
    name: String,

    /// Calendar date, persisted as midnight in the reference timezone.
    date: CalendarDate,

    /// Wall-clock start time, no timezone.
    start_time: WallClockTime,

    /// Wall-clock end time, no timezone.
    end_time: WallClockTime,

    /// Owning instructor (role directory reference, not owned).
    instructor_id: UserId,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl ClassSession {
    /// Create a new session.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `OutOfRange` if the name is blank or too long
    pub fn new(
        id: ClassSessionId,
        name: String,
        date: CalendarDate,
        start_time: WallClockTime,
        end_time: WallClockTime,
        instructor_id: UserId,
    ) -> Result<Self, ValidationError> {
        let name = Self::validate_name(name)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            date,
            start_time,
            end_time,
            instructor_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ClassSessionId,
        name: String,
        date: CalendarDate,
        start_time: WallClockTime,
        end_time: WallClockTime,
        instructor_id: UserId,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            date,
            start_time,
            end_time,
            instructor_id,
            created_at,
            updated_at,
        }
    }

    /// Returns the session ID.
    pub fn id(&self) -> &ClassSessionId {
        &self.id
    }

    /// Returns the class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the calendar date.
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Returns the wall-clock start time.
    pub fn start_time(&self) -> WallClockTime {
        self.start_time
    }

    /// Returns the wall-clock end time.
    pub fn end_time(&self) -> WallClockTime {
        self.end_time
    }

    /// Returns the owning instructor's ID.
    pub fn instructor_id(&self) -> &UserId {
        &self.instructor_id
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The tuple that identifies a duplicate of this session.
    pub fn natural_key(&self) -> SessionKey {
        SessionKey {
            name: self.name.clone(),
            date: self.date,
            start_time: self.start_time,
            instructor_id: self.instructor_id,
        }
    }

    fn validate_name(name: String) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "name",
                1,
                MAX_NAME_LENGTH as i32,
                trimmed.len() as i32,
            ));
        }
        Ok(trimmed.to_string())
    }
}
