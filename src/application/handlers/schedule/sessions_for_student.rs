//! SessionsForStudentHandler - "classes for this student" query.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, EmailAddress};
use crate::ports::{sort_chronologically, ScheduleReader, SessionView};

/// Query for the sessions a student is enrolled in.
#[derive(Debug, Clone)]
pub struct SessionsForStudentQuery {
    pub email: String,
}

/// Handler for per-student queries.
///
/// The read side filters on the student role and the instructor role;
/// rows that drifted out of the role invariant simply do not show up.
pub struct SessionsForStudentHandler {
    reader: Arc<dyn ScheduleReader>,
}

impl SessionsForStudentHandler {
    pub fn new(reader: Arc<dyn ScheduleReader>) -> Self {
        Self { reader }
    }

    /// Returns the student's sessions in chronological order; an empty
    /// vec when the email resolves to no user or no enrollments.
    pub async fn handle(
        &self,
        query: SessionsForStudentQuery,
    ) -> Result<Vec<SessionView>, DomainError> {
        let email = EmailAddress::parse(query.email)?;

        let mut sessions = self.reader.sessions_for_student(&email).await?;
        sort_chronologically(&mut sessions);

        tracing::debug!(email = %email, matches = sessions.len(), "resolved sessions for student");
        Ok(sessions)
    }
}
