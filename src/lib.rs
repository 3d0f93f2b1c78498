//! Class Scheduler - Scheduling and enrollment consistency engine.
//!
//! This crate implements the core invariants for a school that runs
//! recurring class sessions: duplicate-free session creation,
//! timezone-correct "classes on day D" queries, and role-checked
//! student enrollment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
