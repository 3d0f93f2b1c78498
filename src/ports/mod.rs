//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionRepository` - class registry writes and lookups
//! - `EnrollmentRepository` - enrollment ledger writes and lookups
//! - `ScheduleReader` - read-optimized scheduling queries
//! - `RoleDirectory` - read-only lookups into the external user directory

mod enrollment_repository;
mod role_directory;
mod schedule_reader;
mod session_repository;

pub use enrollment_repository::EnrollmentRepository;
pub use role_directory::{RoleDirectory, UserRecord};
pub use schedule_reader::{
    sort_chronologically, InstructorSummary, RosterEntry, ScheduleReader, SessionView,
};
pub use session_repository::SessionRepository;
