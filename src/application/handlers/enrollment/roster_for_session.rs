//! RosterForSessionHandler - roster query for one session.

use std::sync::Arc;

use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::ClassSessionId;
use crate::ports::{RosterEntry, ScheduleReader, SessionRepository};

/// Query for the roster of one session.
#[derive(Debug, Clone)]
pub struct RosterForSessionQuery {
    pub session_id: ClassSessionId,
}

/// Handler for roster queries.
///
/// A missing session is an error; an existing session with nobody
/// enrolled is an empty roster. The two outcomes are never conflated.
pub struct RosterForSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    reader: Arc<dyn ScheduleReader>,
}

impl RosterForSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, reader: Arc<dyn ScheduleReader>) -> Self {
        Self { sessions, reader }
    }

    /// Returns the roster sorted by student name, then email.
    pub async fn handle(
        &self,
        query: RosterForSessionQuery,
    ) -> Result<Vec<RosterEntry>, EnrollmentError> {
        if !self.sessions.exists(&query.session_id).await? {
            return Err(EnrollmentError::SessionNotFound(query.session_id));
        }

        let mut roster = self.reader.roster_for_session(&query.session_id).await?;
        roster.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.email.as_str().cmp(b.email.as_str()))
        });
        Ok(roster)
    }
}
