//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `CLASS_SCHEDULER` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use class_scheduler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod scheduling;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use scheduling::SchedulingConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Scheduling configuration (reference timezone)
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CLASS_SCHEDULER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CLASS_SCHEDULER__DATABASE__URL=...` -> `database.url = ...`
    /// - `CLASS_SCHEDULER__SCHEDULING__REFERENCE_TIMEZONE=America/Bogota`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are
    /// missing or values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLASS_SCHEDULER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.scheduling.validate()?;
        Ok(())
    }
}
