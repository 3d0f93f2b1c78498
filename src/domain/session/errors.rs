//! Class-registry error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Failures of class-registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A session with the same (name, date, start time, instructor)
    /// already exists.
    Duplicate,
    /// The instructor reference does not resolve.
    InstructorNotFound(UserId),
    /// The instructor reference resolves to a non-instructor.
    NotAnInstructor(UserId),
    /// An initial-roster student reference does not resolve.
    StudentNotFound(UserId),
    /// An initial-roster student reference resolves to a non-student.
    NotAStudent(UserId),
    /// Validation failed before any storage access.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Duplicate => ErrorCode::DuplicateSession,
            SessionError::InstructorNotFound(_) => ErrorCode::UserNotFound,
            SessionError::NotAnInstructor(_) => ErrorCode::InvalidRole,
            SessionError::StudentNotFound(_) => ErrorCode::UserNotFound,
            SessionError::NotAStudent(_) => ErrorCode::InvalidRole,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::Duplicate => {
                "A session with the same name, date, start time and instructor already exists"
                    .to_string()
            }
            SessionError::InstructorNotFound(id) => format!("Instructor not found: {}", id),
            SessionError::NotAnInstructor(id) => {
                format!("User {} does not have the instructor role", id)
            }
            SessionError::StudentNotFound(id) => format!("Student not found: {}", id),
            SessionError::NotAStudent(id) => {
                format!("User {} does not have the student role", id)
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        SessionError::validation(field, err.to_string())
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateSession => SessionError::Duplicate,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                SessionError::validation(
                    err.details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    err.message,
                )
            }
            _ => SessionError::infrastructure(err.to_string()),
        }
    }
}
