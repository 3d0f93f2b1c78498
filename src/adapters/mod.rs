//! Adapters - Infrastructure implementations of the ports.

pub mod postgres;

pub use postgres::{
    connect_pool, PostgresEnrollmentRepository, PostgresRoleDirectory, PostgresScheduleReader,
    PostgresSessionRepository,
};
