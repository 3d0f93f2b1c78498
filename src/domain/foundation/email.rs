//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A syntactically plausible email address.
///
/// Validation is deliberately shallow: one `@` with a non-empty local part
/// and a domain containing a dot. Whether the address resolves to a real
/// user is the role directory's business, not this type's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses an email address, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the input is blank
    /// - `InvalidFormat` if the shape is not `local@domain.tld`
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let domain = parts.next().unwrap_or("");

        if local.is_empty() || domain.is_empty() {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        if domain.contains('@') || !domain.contains('.') || domain.starts_with('.') {
            return Err(ValidationError::invalid_format("email", "invalid domain"));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
