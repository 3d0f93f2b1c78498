//! Scheduling query engine handlers.

mod sessions_for_student;
mod sessions_on_date;

pub use sessions_for_student::{SessionsForStudentHandler, SessionsForStudentQuery};
pub use sessions_on_date::{SessionsOnDateHandler, SessionsOnDateQuery};
