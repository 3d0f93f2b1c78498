//! Role directory port.
//!
//! The directory that owns user records is an external collaborator; the
//! scheduling core only reads it to resolve references and check roles.
//! It is never written through this port.

use crate::domain::foundation::{DomainError, EmailAddress, Role, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role-tagged user record as supplied by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User ID.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Unique email address.
    pub email: EmailAddress,

    /// Role tag.
    pub role: Role,
}

/// Read-only lookup port into the external user directory.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Resolve a user by email.
    ///
    /// Returns `None` when no record matches; only storage failures are
    /// errors.
    async fn resolve_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, DomainError>;

    /// Resolve a user by ID.
    ///
    /// Returns `None` when no record matches.
    async fn resolve_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError>;
}
