//! Schedule reader port (read side / queries).
//!
//! Read-optimized views of sessions with their instructor and roster
//! attached. The day-boundary arithmetic stays in the domain
//! ([`DayRange`]); implementations only filter stored instants against the
//! precomputed range.

use crate::domain::foundation::{
    ClassSessionId, DayRange, DomainError, EmailAddress, Timestamp, UserId, WallClockTime,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Instructor summary attached to a session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorSummary {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
}

/// One roster line: a student enrolled in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student_id: UserId,
    pub name: String,
    pub email: EmailAddress,
}

/// Read view of a session for query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Session ID.
    pub id: ClassSessionId,

    /// Class name.
    pub name: String,

    /// Stored date instant (midnight in the reference timezone).
    pub date: Timestamp,

    /// Wall-clock start time.
    pub start_time: WallClockTime,

    /// Wall-clock end time.
    pub end_time: WallClockTime,

    /// Owning instructor.
    pub instructor: InstructorSummary,

    /// Enrolled students.
    pub roster: Vec<RosterEntry>,
}

impl SessionView {
    /// Query ordering: date instant, then start time, then name as the
    /// stable tie-break.
    pub fn chronological_order(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.start_time.cmp(&other.start_time))
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Sorts query results into the canonical ordering.
pub fn sort_chronologically(sessions: &mut [SessionView]) {
    sessions.sort_by(SessionView::chronological_order);
}

/// Reader port for scheduling queries.
#[async_trait]
pub trait ScheduleReader: Send + Sync {
    /// Sessions whose stored date instant falls in `[range.start, range.end)`.
    ///
    /// Unfiltered by role; returns an empty vec when nothing matches.
    async fn sessions_in_range(&self, range: &DayRange) -> Result<Vec<SessionView>, DomainError>;

    /// Sessions the given student is enrolled in.
    ///
    /// Filtered to enrollments whose student has this email with the
    /// student role and whose session instructor has the instructor role.
    /// Returns an empty vec when the email resolves to nobody.
    async fn sessions_for_student(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<SessionView>, DomainError>;

    /// Roster of one session.
    ///
    /// Returns an empty vec for an existing session with no enrollments;
    /// callers distinguish the missing-session case through the session
    /// repository before asking for the roster.
    async fn roster_for_session(
        &self,
        session_id: &ClassSessionId,
    ) -> Result<Vec<RosterEntry>, DomainError>;
}
