//! EnrollStudentHandler - Command handler for enrolling a student.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError};
use crate::domain::foundation::{ClassSessionId, EmailAddress, EnrollmentId, UserId};
use crate::ports::{EnrollmentRepository, RoleDirectory, SessionRepository};

/// Command to enroll a student into a session.
#[derive(Debug, Clone)]
pub struct EnrollStudentCommand {
    pub session_id: ClassSessionId,
    pub student_email: String,
}

/// Success marker for an enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentReceipt {
    pub enrollment_id: EnrollmentId,
    pub session_id: ClassSessionId,
    pub student_id: UserId,
}

/// Handler for enrollments.
///
/// The duplicate pre-check and the insert are separate storage operations;
/// under a concurrent identical request the ledger's unique constraint
/// decides, and its violation surfaces as the same `AlreadyEnrolled`.
pub struct EnrollStudentHandler {
    sessions: Arc<dyn SessionRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    directory: Arc<dyn RoleDirectory>,
}

impl EnrollStudentHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        directory: Arc<dyn RoleDirectory>,
    ) -> Self {
        Self {
            sessions,
            enrollments,
            directory,
        }
    }

    pub async fn handle(
        &self,
        cmd: EnrollStudentCommand,
    ) -> Result<EnrollmentReceipt, EnrollmentError> {
        // 1. Validate the email before touching storage
        let email = EmailAddress::parse(cmd.student_email)?;

        // 2. Resolve the student and check its role
        let student = match self.directory.resolve_by_email(&email).await? {
            Some(user) => user,
            None => return Err(EnrollmentError::StudentNotFound(email.to_string())),
        };
        if !student.role.is_student() {
            return Err(EnrollmentError::NotAStudent(email.to_string()));
        }

        // 3. The session must exist
        if !self.sessions.exists(&cmd.session_id).await? {
            return Err(EnrollmentError::SessionNotFound(cmd.session_id));
        }

        // 4. Pre-check the (session, student) pair
        if self
            .enrollments
            .exists_for(&cmd.session_id, &student.id)
            .await?
        {
            return Err(EnrollmentError::AlreadyEnrolled);
        }

        // 5. Insert
        let enrollment = Enrollment::new(EnrollmentId::new(), cmd.session_id, student.id);
        self.enrollments.save(&enrollment).await?;

        tracing::debug!(
            session_id = %cmd.session_id,
            student_id = %student.id,
            "enrolled student"
        );

        Ok(EnrollmentReceipt {
            enrollment_id: *enrollment.id(),
            session_id: cmd.session_id,
            student_id: student.id,
        })
    }
}
