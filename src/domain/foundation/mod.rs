//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, identifiers, enums, and error types that
//! form the vocabulary of the scheduling domain.

mod email;
mod errors;
mod ids;
mod role;
mod schedule;
mod timestamp;

pub use email::EmailAddress;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClassSessionId, EnrollmentId, UserId};
pub use role::Role;
pub use schedule::{parse_timezone, CalendarDate, DayRange, WallClockTime};
pub use timestamp::Timestamp;
