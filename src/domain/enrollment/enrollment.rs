//! Enrollment entity.
//!
//! A record that one student is registered for one session. References are
//! id-based; neither the session nor the user record is owned here.

use crate::domain::foundation::{ClassSessionId, EnrollmentId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Registration of a student in a class session.
///
/// # Invariants
///
/// - `(session_id, student_id)` is unique across all enrollments; the
///   storage layer enforces this, the ledger pre-checks it
/// - `student_id` resolved to a student-roled user at enrollment time
///
/// Enrollments are create-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    id: EnrollmentId,
    session_id: ClassSessionId,
    student_id: UserId,
    created_at: Timestamp,
}

impl Enrollment {
    /// Create a new enrollment.
    pub fn new(id: EnrollmentId, session_id: ClassSessionId, student_id: UserId) -> Self {
        Self {
            id,
            session_id,
            student_id,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute an enrollment from persistence.
    pub fn reconstitute(
        id: EnrollmentId,
        session_id: ClassSessionId,
        student_id: UserId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            student_id,
            created_at,
        }
    }

    /// Returns the enrollment ID.
    pub fn id(&self) -> &EnrollmentId {
        &self.id
    }

    /// Returns the enrolled session's ID.
    pub fn session_id(&self) -> &ClassSessionId {
        &self.session_id
    }

    /// Returns the enrolled student's ID.
    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    /// Returns when the enrollment was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// The pair that identifies a duplicate of this enrollment.
    pub fn pair(&self) -> (ClassSessionId, UserId) {
        (self.session_id, self.student_id)
    }
}
