//! Session repository port (write side).
//!
//! Defines the contract for persisting and retrieving class sessions.
//!
//! # Design
//!
//! - **Write-focused**: the read side lives in `ScheduleReader`
//! - **Uniqueness**: implementations must back the natural key with a
//!   storage-level unique constraint and surface violations as
//!   `DuplicateSession`; the handler's pre-check only produces the
//!   friendlier error on the common path

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{ClassSessionId, DomainError};
use crate::domain::session::{ClassSession, SessionKey};
use async_trait::async_trait;

/// Repository port for class-session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session together with its initial roster.
    ///
    /// Implementations backed by a transactional store must persist the
    /// session and its enrollments atomically so a roster failure never
    /// leaves a bare session behind.
    ///
    /// # Errors
    ///
    /// - `DuplicateSession` if the natural key is already taken
    /// - `AlreadyEnrolled` if the roster repeats a student
    /// - `DatabaseError` on other persistence failures
    async fn save_with_roster(
        &self,
        session: &ClassSession,
        roster: &[Enrollment],
    ) -> Result<(), DomainError>;

    /// Find a session matching the natural key exactly.
    ///
    /// Returns `None` if not found.
    async fn find_by_natural_key(
        &self,
        key: &SessionKey,
    ) -> Result<Option<ClassSession>, DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError>;

    /// Check if a session exists.
    async fn exists(&self, id: &ClassSessionId) -> Result<bool, DomainError>;
}
