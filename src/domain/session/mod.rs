//! Session domain module - the class registry's entity and errors.
//!
//! A [`ClassSession`] is created once and never mutated; duplicate
//! detection hangs off its [`SessionKey`] natural key.

mod class_session;
mod errors;

pub use class_session::{ClassSession, SessionKey, MAX_NAME_LENGTH};
pub use errors::SessionError;
