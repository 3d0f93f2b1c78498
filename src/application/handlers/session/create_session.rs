//! CreateSessionHandler - Command handler for scheduling a new session.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{
    CalendarDate, ClassSessionId, EnrollmentId, UserId, WallClockTime,
};
use crate::domain::session::{ClassSession, SessionError};
use crate::ports::{RoleDirectory, SessionRepository, UserRecord};

/// Command to schedule a new class session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock start, `HH:MM` 24-hour.
    pub start_time: String,
    /// Wall-clock end, `HH:MM` 24-hour.
    pub end_time: String,
    pub instructor_id: UserId,
    /// Initial roster; duplicates are collapsed.
    pub student_ids: Vec<UserId>,
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSessionResult {
    pub session: ClassSession,
    pub instructor: UserRecord,
    pub enrolled: Vec<EnrollmentId>,
}

/// Handler for scheduling sessions.
///
/// The duplicate pre-check and the insert are separate storage operations;
/// the storage-level unique constraint is the real arbiter under
/// concurrency and its violation surfaces as the same `Duplicate` error.
pub struct CreateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    directory: Arc<dyn RoleDirectory>,
}

impl CreateSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, directory: Arc<dyn RoleDirectory>) -> Self {
        Self { sessions, directory }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResult, SessionError> {
        // 1. Validate inputs before touching storage
        let date = CalendarDate::parse(&cmd.date)?;
        let start_time = WallClockTime::parse(&cmd.start_time)?;
        let end_time = WallClockTime::parse(&cmd.end_time)?;

        // 2. Resolve the instructor and check its role
        let instructor = match self.directory.resolve_by_id(&cmd.instructor_id).await? {
            Some(user) => user,
            None => return Err(SessionError::InstructorNotFound(cmd.instructor_id)),
        };
        if !instructor.role.is_instructor() {
            return Err(SessionError::NotAnInstructor(cmd.instructor_id));
        }

        // 3. Resolve the initial roster, collapsing duplicate ids
        let mut seen = HashSet::new();
        let mut students = Vec::new();
        for student_id in &cmd.student_ids {
            if !seen.insert(*student_id) {
                continue;
            }
            let student = match self.directory.resolve_by_id(student_id).await? {
                Some(user) => user,
                None => return Err(SessionError::StudentNotFound(*student_id)),
            };
            if !student.role.is_student() {
                return Err(SessionError::NotAStudent(*student_id));
            }
            students.push(student);
        }

        // 4. Build the session and pre-check the natural key
        let session = ClassSession::new(
            ClassSessionId::new(),
            cmd.name,
            date,
            start_time,
            end_time,
            cmd.instructor_id,
        )?;
        if self
            .sessions
            .find_by_natural_key(&session.natural_key())
            .await?
            .is_some()
        {
            return Err(SessionError::Duplicate);
        }

        // 5. Persist session + roster in one repository call (one
        //    transaction in the postgres adapter)
        let roster: Vec<Enrollment> = students
            .iter()
            .map(|student| Enrollment::new(EnrollmentId::new(), *session.id(), student.id))
            .collect();
        self.sessions.save_with_roster(&session, &roster).await?;

        tracing::debug!(
            session_id = %session.id(),
            instructor_id = %cmd.instructor_id,
            roster = roster.len(),
            "scheduled class session"
        );

        Ok(CreateSessionResult {
            session,
            instructor,
            enrolled: roster.iter().map(|e| *e.id()).collect(),
        })
    }
}
