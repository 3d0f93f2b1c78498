//! User role classification.
//!
//! Roles come from the external role directory; the scheduling core only
//! inspects them. The checks are pure functions over this enum so the core
//! never depends on how the directory represents its user records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Instructor,
    Student,
    /// Any role the scheduling core does not recognize (admins, staff).
    Other,
}

impl Role {
    /// Decodes the directory's integer tag: 1 = student, 2 = instructor.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Role::Student,
            2 => Role::Instructor,
            _ => Role::Other,
        }
    }

    /// Encodes back to the directory's integer tag.
    pub fn as_code(&self) -> i32 {
        match self {
            Role::Student => 1,
            Role::Instructor => 2,
            Role::Other => 0,
        }
    }

    /// Whether this role may own class sessions.
    pub fn is_instructor(&self) -> bool {
        matches!(self, Role::Instructor)
    }

    /// Whether this role may be enrolled in class sessions.
    pub fn is_student(&self) -> bool {
        matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Instructor => "instructor",
            Role::Student => "student",
            Role::Other => "other",
        };
        write!(f, "{}", s)
    }
}
