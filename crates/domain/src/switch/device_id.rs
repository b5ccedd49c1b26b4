use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object identifying the switch on the bus.
///
/// Derived deterministically from the human-readable switch name: lowercase,
/// internal whitespace runs collapsed to single underscores. The slug is used
/// verbatim in topic strings and must not be re-derived mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Derive the device identity from a display name
    pub fn from_name(name: &str) -> Result<Self> {
        let slug = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_");

        if slug.is_empty() {
            return Err(DomainError::InvalidSwitchName(
                "Switch name must contain at least one non-whitespace character".to_string(),
            ));
        }

        Ok(Self(slug))
    }

    /// Get the inner slug value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
