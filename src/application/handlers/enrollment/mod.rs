//! Enrollment ledger handlers.

mod enroll_student;
mod roster_for_session;

pub use enroll_student::{EnrollStudentCommand, EnrollStudentHandler, EnrollmentReceipt};
pub use roster_for_session::{RosterForSessionHandler, RosterForSessionQuery};
