//! Enrollment-ledger error types.

use crate::domain::foundation::{ClassSessionId, DomainError, ErrorCode, ValidationError};

/// Failures of enrollment-ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// The referenced session does not exist.
    SessionNotFound(ClassSessionId),
    /// No user record matches the given email.
    StudentNotFound(String),
    /// The email resolves to a user without the student role.
    NotAStudent(String),
    /// The student is already enrolled in this session.
    AlreadyEnrolled,
    /// Validation failed before any storage access.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl EnrollmentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EnrollmentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EnrollmentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EnrollmentError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            EnrollmentError::StudentNotFound(_) => ErrorCode::UserNotFound,
            EnrollmentError::NotAStudent(_) => ErrorCode::InvalidRole,
            EnrollmentError::AlreadyEnrolled => ErrorCode::AlreadyEnrolled,
            EnrollmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EnrollmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EnrollmentError::SessionNotFound(id) => format!("Session not found: {}", id),
            EnrollmentError::StudentNotFound(email) => {
                format!("No user found for email {}", email)
            }
            EnrollmentError::NotAStudent(email) => {
                format!("User {} does not have the student role", email)
            }
            EnrollmentError::AlreadyEnrolled => {
                "Student is already enrolled in this session".to_string()
            }
            EnrollmentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            EnrollmentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EnrollmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EnrollmentError {}

impl From<ValidationError> for EnrollmentError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        EnrollmentError::validation(field, err.to_string())
    }
}

impl From<DomainError> for EnrollmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AlreadyEnrolled => EnrollmentError::AlreadyEnrolled,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                EnrollmentError::validation(
                    err.details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    err.message,
                )
            }
            _ => EnrollmentError::infrastructure(err.to_string()),
        }
    }
}
