//! Enrollment domain module - the ledger's entity and errors.

mod enrollment;
mod errors;

pub use enrollment::Enrollment;
pub use errors::EnrollmentError;
