//! Command and query handlers.
//!
//! Each handler is request-scoped: it holds `Arc<dyn Port>` collaborators
//! and no other shared mutable state, and runs one operation to
//! completion per call.

pub mod enrollment;
pub mod schedule;
pub mod session;
