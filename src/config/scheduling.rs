//! Scheduling configuration

use chrono_tz::Tz;
use serde::Deserialize;

use super::error::ValidationError;

/// Scheduling configuration
///
/// Session dates are persisted as midnight in the reference timezone;
/// changing it rebuckets every stored date, so it is configuration, not a
/// per-request input.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// IANA name of the fixed reference timezone for stored dates
    #[serde(default = "default_reference_timezone")]
    pub reference_timezone: String,
}

impl SchedulingConfig {
    /// Resolve the reference timezone.
    ///
    /// Callers should run [`validate`](Self::validate) first; this falls
    /// back to UTC rather than panic if they did not.
    pub fn timezone(&self) -> Tz {
        self.reference_timezone.parse().unwrap_or(Tz::UTC)
    }

    /// Validate scheduling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reference_timezone.is_empty() {
            return Err(ValidationError::MissingRequired("REFERENCE_TIMEZONE"));
        }
        self.reference_timezone
            .parse::<Tz>()
            .map_err(|_| ValidationError::InvalidReferenceTimezone)?;
        Ok(())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            reference_timezone: default_reference_timezone(),
        }
    }
}

fn default_reference_timezone() -> String {
    "America/Bogota".to_string()
}
