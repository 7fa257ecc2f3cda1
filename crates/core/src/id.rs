//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an inventory location, unique within a snapshot.
///
/// Serialized as a bare integer. Inside JSON objects it appears as a string
/// key (`"17"`), which `serde_json` parses back into the integer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(i64);

impl LocationId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Absolute difference between two identifiers.
    pub fn abs_diff(self, other: LocationId) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for LocationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<LocationId> for i64 {
    fn from(value: LocationId) -> Self {
        value.0
    }
}

impl FromStr for LocationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("LocationId `{s}`: {e}")))?;
        Ok(Self(raw))
    }
}
