//! Derive a snapshot document from raw inventory records.
//!
//! Stored inventory rows do not carry alert thresholds, distances or demand
//! signals directly; they are derived here:
//!
//! - threshold = available volume minus reserved volume
//! - distance = 10 per step of id difference from the source
//! - current demand = sum of the last 7 demand history entries
//! - forecasted demand = current demand * 1.2, truncated

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use loadshift_core::{DomainError, DomainResult, LocationId};

use crate::snapshot::SnapshotDocument;

pub const DEMAND_WINDOW: usize = 7;
pub const DISTANCE_PER_ID_STEP: i64 = 10;

/// One stored inventory location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: LocationId,
    pub volume_occupied: i64,
    pub volume_available: i64,
    pub volume_reserved: i64,
    /// Demand quantities, oldest first.
    pub demand_history: Vec<i64>,
}

/// Records plus the location under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordsDocument {
    pub source: LocationId,
    pub inventories: Vec<InventoryRecord>,
}

impl RecordsDocument {
    pub fn from_json_str(input: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_snapshot_document(&self) -> DomainResult<SnapshotDocument> {
        build_snapshot_document(self.source, &self.inventories)
    }
}

pub fn build_snapshot_document(
    source: LocationId,
    records: &[InventoryRecord],
) -> DomainResult<SnapshotDocument> {
    let mut doc = SnapshotDocument {
        from_inv: source,
        upcoming_quantity: BTreeMap::new(),
        distance_from_inv: BTreeMap::new(),
        current_demand: BTreeMap::new(),
        forecasted_demand: BTreeMap::new(),
        volume_free: BTreeMap::new(),
        threshold_for_alert: BTreeMap::new(),
    };

    let mut seen = BTreeSet::new();
    for record in records {
        let id = record.id;
        if !seen.insert(id) {
            return Err(DomainError::conflict(format!("inventory {id} listed twice")));
        }

        let threshold = record
            .volume_available
            .checked_sub(record.volume_reserved)
            .ok_or_else(|| overflow(id, "alert threshold"))?;
        let current = recent_demand(record)?;
        let forecast = current
            .checked_mul(12)
            .map(|d| d / 10)
            .ok_or_else(|| overflow(id, "forecasted demand"))?;

        doc.upcoming_quantity.insert(id, record.volume_occupied);
        doc.volume_free.insert(id, record.volume_available);
        doc.threshold_for_alert.insert(id, threshold);
        doc.distance_from_inv.insert(id, distance(source, id)?);
        doc.current_demand.insert(id, current);
        doc.forecasted_demand.insert(id, forecast);
    }

    Ok(doc)
}

fn recent_demand(record: &InventoryRecord) -> DomainResult<i64> {
    let start = record.demand_history.len().saturating_sub(DEMAND_WINDOW);
    record.demand_history[start..]
        .iter()
        .try_fold(0i64, |acc, q| acc.checked_add(*q))
        .ok_or_else(|| overflow(record.id, "current demand"))
}

fn distance(source: LocationId, id: LocationId) -> DomainResult<i64> {
    i64::try_from(source.abs_diff(id))
        .ok()
        .and_then(|d| d.checked_mul(DISTANCE_PER_ID_STEP))
        .ok_or_else(|| overflow(id, "distance"))
}

fn overflow(id: LocationId, what: &str) -> DomainError {
    DomainError::validation(format!("{what} for inventory {id} overflows i64"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    fn record(id: i64, occupied: i64, available: i64, reserved: i64, history: Vec<i64>) -> InventoryRecord {
        InventoryRecord {
            id: LocationId::new(id),
            volume_occupied: occupied,
            volume_available: available,
            volume_reserved: reserved,
            demand_history: history,
        }
    }

    #[test]
    fn derives_attributes_from_records() {
        let records = vec![
            record(1, 120, 100, 10, vec![1, 1, 1, 1, 1, 1, 1, 1, 1]),
            record(4, 30, 200, 50, vec![5, 10]),
        ];
        let doc = build_snapshot_document(LocationId::new(1), &records).unwrap();

        let four = LocationId::new(4);
        assert_eq!(doc.upcoming_quantity[&four], 30);
        assert_eq!(doc.volume_free[&four], 200);
        assert_eq!(doc.threshold_for_alert[&four], 150);
        assert_eq!(doc.distance_from_inv[&four], 30);
        assert_eq!(doc.current_demand[&four], 15);
        assert_eq!(doc.forecasted_demand[&four], 18);

        let one = LocationId::new(1);
        // Only the last seven entries count.
        assert_eq!(doc.current_demand[&one], 7);
        assert_eq!(doc.forecasted_demand[&one], 8);
        assert_eq!(doc.distance_from_inv[&one], 0);
        assert_eq!(doc.threshold_for_alert[&one], 90);

        let snapshot = Snapshot::from_document(&doc).unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn empty_history_means_zero_demand() {
        let doc = build_snapshot_document(LocationId::new(2), &[record(2, 1, 1, 0, vec![])]).unwrap();
        assert_eq!(doc.current_demand[&LocationId::new(2)], 0);
        assert_eq!(doc.forecasted_demand[&LocationId::new(2)], 0);
    }

    #[test]
    fn duplicate_records_conflict() {
        let records = vec![record(1, 1, 1, 0, vec![]), record(1, 2, 2, 0, vec![])];
        assert!(matches!(
            build_snapshot_document(LocationId::new(1), &records),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn parses_camel_case_document() {
        let doc = RecordsDocument::from_json_str(
            r#"{
                "source": 1,
                "inventories": [
                    {"id": 1, "volumeOccupied": 120, "volumeAvailable": 100, "volumeReserved": 10, "demandHistory": [4]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.inventories[0].volume_occupied, 120);

        let err = RecordsDocument::from_json_str(
            r#"{"source": 1, "inventories": [{"id": 1, "volumeOccupied": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::MalformedInput(_)));
    }

    #[test]
    fn missing_source_record_is_rejected_downstream() {
        let doc = build_snapshot_document(LocationId::new(9), &[record(1, 1, 1, 0, vec![])]).unwrap();
        assert_eq!(
            Snapshot::from_document(&doc).unwrap_err(),
            DomainError::UnknownLocation(LocationId::new(9))
        );
    }
}
