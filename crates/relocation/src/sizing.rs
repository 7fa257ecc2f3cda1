//! Capacity-constrained sizing of a relocation.

use tracing::warn;

use loadshift_core::{DomainError, DomainResult, LocationId};

use crate::decision::{NoTargetReason, RelocationDecision, RelocationPlan};
use crate::snapshot::Snapshot;
use crate::threshold::{available_capacity, excess_load, overflow};

/// Work out how much of the source's excess `target` can absorb.
///
/// The amount is `min(excess load, target headroom, target free volume)`.
/// A non-positive amount means the target cannot take anything and yields
/// [`RelocationDecision::NoValidTarget`]. Negative attribute values are not
/// rejected; they simply flow through the arithmetic.
///
/// The source must be over its threshold; call
/// [`exceeds_threshold`](crate::threshold::exceeds_threshold) first.
pub fn size_relocation(
    snapshot: &Snapshot,
    source_id: LocationId,
    target_id: LocationId,
) -> DomainResult<RelocationDecision> {
    if source_id == target_id {
        return Err(DomainError::invariant(format!(
            "location {source_id} cannot be its own relocation target"
        )));
    }

    let source = snapshot.location(source_id)?;
    let target = snapshot.location(target_id)?;

    let excess = excess_load(source)?;
    if excess <= 0 {
        return Err(DomainError::invariant(format!(
            "location {source_id} is not over its alert threshold"
        )));
    }

    let capacity = available_capacity(target)?;
    let amount = excess.min(capacity).min(target.volume_free);

    if amount <= 0 {
        warn!(
            source = %source_id,
            target = %target_id,
            available_capacity = capacity,
            volume_free = target.volume_free,
            "target cannot accommodate any load"
        );
        return Ok(RelocationDecision::NoValidTarget {
            source: source_id,
            excess_load: excess,
            reason: NoTargetReason::TargetCannotAccept {
                target: target_id,
                relocatable_amount: amount,
            },
        });
    }

    let source_load_after = source
        .upcoming_quantity
        .checked_sub(amount)
        .ok_or_else(|| overflow(source_id, "source load after relocation"))?;
    let target_load_after = target
        .upcoming_quantity
        .checked_add(amount)
        .ok_or_else(|| overflow(target_id, "target load after relocation"))?;

    let remaining_excess = excess - amount;
    let partial = remaining_excess > 0;
    if partial {
        warn!(
            source = %source_id,
            target = %target_id,
            relocated = amount,
            remaining_excess,
            "could not relocate all excess load"
        );
    }

    Ok(RelocationDecision::Relocated(RelocationPlan {
        source: source_id,
        target: target_id,
        amount,
        excess_load: excess,
        remaining_excess,
        partial,
        source_load_before: source.upcoming_quantity,
        source_load_after,
        target_load_before: target.upcoming_quantity,
        target_load_after,
    }))
}
