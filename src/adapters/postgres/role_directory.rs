//! PostgreSQL implementation of RoleDirectory.
//!
//! The users table belongs to the identity service; this adapter only
//! reads it, mapping the integer role tag through `Role::from_code`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, Role, UserId};
use crate::ports::{RoleDirectory, UserRecord};

use super::db_error;

/// PostgreSQL implementation of RoleDirectory.
#[derive(Clone)]
pub struct PostgresRoleDirectory {
    pool: PgPool,
}

impl PostgresRoleDirectory {
    /// Creates a new PostgresRoleDirectory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleDirectory for PostgresRoleDirectory {
    async fn resolve_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, DomainError> {
        let row = sqlx::query("SELECT id, name, email, user_type FROM users WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to resolve user by email", e))?;

        row.map(row_to_record).transpose()
    }

    async fn resolve_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        let row = sqlx::query("SELECT id, name, email, user_type FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to resolve user by id", e))?;

        row.map(row_to_record).transpose()
    }
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<UserRecord, DomainError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| db_error("Failed to get name", e))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| db_error("Failed to get email", e))?;
    let user_type: i32 = row
        .try_get("user_type")
        .map_err(|e| db_error("Failed to get user_type", e))?;

    let email = EmailAddress::parse(email.as_str()).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored email is malformed: {}", e),
        )
    })?;

    Ok(UserRecord {
        id: UserId::from_uuid(id),
        name,
        email,
        role: Role::from_code(user_type),
    })
}
