//! Domain error model.

use thiserror::Error;

use crate::id::LocationId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only hard failures live here. Outcomes such as "no valid target" or a
/// partial relocation are decisions, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The input document could not be parsed or lacks a required field.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A referenced location has no entry in one of the attribute maps.
    #[error("location {location} is missing attribute `{attribute}`")]
    MissingAttribute {
        location: LocationId,
        attribute: &'static str,
    },

    /// A location id was requested that the snapshot does not contain.
    #[error("unknown location: {0}")]
    UnknownLocation(LocationId),

    /// A value failed validation (e.g. arithmetic overflow).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Conflicting input (e.g. the same location listed twice).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn missing(location: LocationId, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            location,
            attribute,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
