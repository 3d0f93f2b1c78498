//! Enrollment repository port (write side).
//!
//! # Design
//!
//! - **Uniqueness**: implementations must back the (session, student) pair
//!   with a storage-level unique constraint and surface violations as
//!   `AlreadyEnrolled`, so a race between two identical enroll requests
//!   yields exactly one success

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{ClassSessionId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for enrollment persistence.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert a new enrollment.
    ///
    /// # Errors
    ///
    /// - `AlreadyEnrolled` if the (session, student) pair exists
    /// - `DatabaseError` on other persistence failures
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    /// Check whether a (session, student) enrollment already exists.
    async fn exists_for(
        &self,
        session_id: &ClassSessionId,
        student_id: &UserId,
    ) -> Result<bool, DomainError>;
}
