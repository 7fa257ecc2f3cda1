//! Threshold evaluation for a single location.

use loadshift_core::{DomainError, DomainResult, LocationId};

use crate::snapshot::{Location, Snapshot};

/// `true` when the location's upcoming quantity is strictly above its alert
/// threshold. Sitting exactly on the threshold is not an overload.
pub fn exceeds_threshold(snapshot: &Snapshot, location_id: LocationId) -> DomainResult<bool> {
    let location = snapshot.location(location_id)?;
    Ok(location.upcoming_quantity > location.threshold_for_alert)
}

/// Load above the alert threshold (zero or negative when not overloaded).
pub fn excess_load(location: &Location) -> DomainResult<i64> {
    location
        .upcoming_quantity
        .checked_sub(location.threshold_for_alert)
        .ok_or_else(|| overflow(location.id, "excess load"))
}

/// Headroom before the location itself would cross its alert threshold.
pub fn available_capacity(location: &Location) -> DomainResult<i64> {
    location
        .threshold_for_alert
        .checked_sub(location.upcoming_quantity)
        .ok_or_else(|| overflow(location.id, "available capacity"))
}

pub(crate) fn overflow(location: LocationId, what: &str) -> DomainError {
    DomainError::validation(format!("{what} for location {location} overflows i64"))
}
