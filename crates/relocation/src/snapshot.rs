use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use serde::{Deserialize, Serialize};

use loadshift_core::{DomainError, DomainResult, Entity, LocationId};

/// Wire shape of a snapshot: one integer map per attribute, keyed by location.
///
/// The spaced key names (`"from inv"`, `"upcoming quantity"`,
/// `"distance from_inv"`) are accepted as aliases for older producers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotDocument {
    #[serde(alias = "from inv")]
    pub from_inv: LocationId,
    #[serde(alias = "upcoming quantity")]
    pub upcoming_quantity: BTreeMap<LocationId, i64>,
    #[serde(alias = "distance from_inv")]
    pub distance_from_inv: BTreeMap<LocationId, i64>,
    pub current_demand: BTreeMap<LocationId, i64>,
    pub forecasted_demand: BTreeMap<LocationId, i64>,
    pub volume_free: BTreeMap<LocationId, i64>,
    pub threshold_for_alert: BTreeMap<LocationId, i64>,
}

impl SnapshotDocument {
    pub fn from_json_str(input: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> DomainResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Every identifier mentioned by any attribute map.
    fn referenced_ids(&self) -> BTreeSet<LocationId> {
        [
            &self.upcoming_quantity,
            &self.distance_from_inv,
            &self.current_demand,
            &self.forecasted_demand,
            &self.volume_free,
            &self.threshold_for_alert,
        ]
        .into_iter()
        .flat_map(|m| m.keys().copied())
        .collect()
    }
}

/// Fixed-shape record for one inventory location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub upcoming_quantity: i64,
    /// `None` only for the source, whose distance is never read.
    pub distance_from_source: Option<i64>,
    pub current_demand: i64,
    pub forecasted_demand: i64,
    pub volume_free: i64,
    pub threshold_for_alert: i64,
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Read-only view of all locations plus the designated source.
///
/// Construction validates that every location carries every attribute the
/// decision procedure reads; lookups afterwards never fall back to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    source: LocationId,
    locations: BTreeMap<LocationId, Location>,
}

impl Snapshot {
    /// Build a snapshot from already-shaped records.
    pub fn new(
        source: LocationId,
        locations: impl IntoIterator<Item = Location>,
    ) -> DomainResult<Self> {
        let mut by_id = BTreeMap::new();
        for location in locations {
            let id = location.id();
            if by_id.insert(id, location).is_some() {
                return Err(DomainError::conflict(format!("location {id} listed twice")));
            }
        }

        if !by_id.contains_key(&source) {
            return Err(DomainError::UnknownLocation(source));
        }

        if let Some(missing) = by_id
            .values()
            .find(|l| l.id != source && l.distance_from_source.is_none())
        {
            return Err(DomainError::missing(missing.id, "distance_from_inv"));
        }

        Ok(Self {
            source,
            locations: by_id,
        })
    }

    pub fn from_document(doc: &SnapshotDocument) -> DomainResult<Self> {
        let source = doc.from_inv;
        let mut locations = Vec::new();

        for id in doc.referenced_ids() {
            let required = |map: &BTreeMap<LocationId, i64>, attribute: &'static str| {
                map.get(&id)
                    .copied()
                    .ok_or(DomainError::missing(id, attribute))
            };

            locations.push(Location {
                id,
                upcoming_quantity: required(&doc.upcoming_quantity, "upcoming_quantity")?,
                distance_from_source: doc.distance_from_inv.get(&id).copied(),
                current_demand: required(&doc.current_demand, "current_demand")?,
                forecasted_demand: required(&doc.forecasted_demand, "forecasted_demand")?,
                volume_free: required(&doc.volume_free, "volume_free")?,
                threshold_for_alert: required(&doc.threshold_for_alert, "threshold_for_alert")?,
            });
        }

        Self::new(source, locations)
    }

    pub fn from_json_str(input: &str) -> DomainResult<Self> {
        Self::from_document(&SnapshotDocument::from_json_str(input)?)
    }

    pub fn source_id(&self) -> LocationId {
        self.source
    }

    pub fn source(&self) -> &Location {
        // Presence of the source is checked in `new`.
        &self.locations[&self.source]
    }

    pub fn location(&self, id: LocationId) -> DomainResult<&Location> {
        self.locations
            .get(&id)
            .ok_or(DomainError::UnknownLocation(id))
    }

    /// All locations in ascending id order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Locations other than `source`, in ascending id order.
    pub fn others(&self, source: LocationId) -> impl Iterator<Item = &Location> {
        self.locations.values().filter(move |l| l.id != source)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl TryFrom<SnapshotDocument> for Snapshot {
    type Error = DomainError;

    fn try_from(doc: SnapshotDocument) -> Result<Self, Self::Error> {
        Self::from_document(&doc)
    }
}
