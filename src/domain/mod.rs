//! Domain layer - entities, value objects, and domain errors.

pub mod enrollment;
pub mod foundation;
pub mod session;
