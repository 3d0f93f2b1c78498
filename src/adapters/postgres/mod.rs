//! PostgreSQL adapters - Database implementations for the ports.
//!
//! - `PostgresSessionRepository` - class registry writes and lookups
//! - `PostgresEnrollmentRepository` - enrollment ledger writes
//! - `PostgresScheduleReader` - joined scheduling queries
//! - `PostgresRoleDirectory` - read-only lookups in the users table

mod enrollment_repository;
mod role_directory;
mod schedule_reader;
mod session_repository;

pub use enrollment_repository::PostgresEnrollmentRepository;
pub use role_directory::PostgresRoleDirectory;
pub use schedule_reader::PostgresScheduleReader;
pub use session_repository::PostgresSessionRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Embedded migrations (see the `migrations/` directory).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

// PostgreSQL unique_violation; the constraint name picks the error kind.
const UNIQUE_VIOLATION: &str = "23505";
const SESSION_NATURAL_KEY: &str = "class_sessions_natural_key";
const ENROLLMENT_PAIR_KEY: &str = "enrollments_session_student_key";

/// Connects a pool from configuration, optionally running migrations.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| db_error("Failed to connect to database", e))?;

    if config.run_migrations {
        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Migration failed: {}", e)))?;
        tracing::debug!("database migrations applied");
    }

    Ok(pool)
}

/// Wraps an unrecognized sqlx error as an opaque database error.
pub(crate) fn db_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

/// Maps a unique-constraint violation to the conflict code of the
/// constraint it hit; anything else stays an opaque database error.
///
/// This is what makes a lost check-then-insert race indistinguishable
/// from the pre-check conflict.
pub(crate) fn map_unique_violation(err: sqlx::Error, context: &str) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        let is_unique = db_err.code().as_deref() == Some(UNIQUE_VIOLATION);
        if is_unique {
            match db_err.constraint() {
                Some(SESSION_NATURAL_KEY) => {
                    return DomainError::new(
                        ErrorCode::DuplicateSession,
                        "A session with this name, date, start time and instructor already exists",
                    );
                }
                Some(ENROLLMENT_PAIR_KEY) => {
                    return DomainError::new(
                        ErrorCode::AlreadyEnrolled,
                        "Student is already enrolled in this session",
                    );
                }
                _ => {}
            }
        }
    }
    db_error(context, err)
}
