//! Candidate scoring and ranking.
//!
//! Score model (weights multiply raw, unnormalised magnitudes):
//!
//! ```text
//! score = 0.18 * 1 / (distance + 1)
//!       + 0.25 * current_demand
//!       + 0.18 * forecasted_demand
//!       + 0.15 * volume_free
//! ```
//!
//! Ranking is descending by score. Candidates are visited in ascending
//! [`LocationId`] order and sorted stably, so equal scores keep the lowest id
//! first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use loadshift_core::{DomainError, DomainResult, LocationId, ValueObject};

use crate::snapshot::{Location, Snapshot};

/// Relative importance of each candidate attribute.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub distance: f64,
    pub current_demand: f64,
    pub forecasted_demand: f64,
    pub volume_free: f64,
}

impl ScoreWeights {
    pub const DEFAULT: Self = Self {
        distance: 0.18,
        current_demand: 0.25,
        forecasted_demand: 0.18,
        volume_free: 0.15,
    };

    pub fn score(
        &self,
        distance: i64,
        current_demand: i64,
        forecasted_demand: i64,
        volume_free: i64,
    ) -> f64 {
        // distance 0 gives the full weight; larger distances decay toward 0.
        let proximity = 1.0 / (distance as f64 + 1.0);

        self.distance * proximity
            + self.current_demand * current_demand as f64
            + self.forecasted_demand * forecasted_demand as f64
            + self.volume_free * volume_free as f64
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ValueObject for ScoreWeights {}

/// A scored candidate together with the inputs that produced the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub location: LocationId,
    pub distance: i64,
    pub current_demand: i64,
    pub forecasted_demand: i64,
    pub volume_free: i64,
    pub score: f64,
}

impl CandidateScore {
    pub fn evaluate(location: &Location, weights: &ScoreWeights) -> DomainResult<Self> {
        let distance = location
            .distance_from_source
            .ok_or(DomainError::missing(location.id, "distance_from_inv"))?;

        Ok(Self {
            location: location.id,
            distance,
            current_demand: location.current_demand,
            forecasted_demand: location.forecasted_demand,
            volume_free: location.volume_free,
            score: weights.score(
                distance,
                location.current_demand,
                location.forecasted_demand,
                location.volume_free,
            ),
        })
    }
}

impl ValueObject for CandidateScore {}

/// Score every location except `source` and return them best first.
pub fn rank_candidates(snapshot: &Snapshot, source: LocationId) -> DomainResult<Vec<CandidateScore>> {
    rank_candidates_with(snapshot, source, &ScoreWeights::DEFAULT)
}

pub fn rank_candidates_with(
    snapshot: &Snapshot,
    source: LocationId,
    weights: &ScoreWeights,
) -> DomainResult<Vec<CandidateScore>> {
    snapshot.location(source)?;

    let mut ranked = snapshot
        .others(source)
        .map(|location| {
            let candidate = CandidateScore::evaluate(location, weights)?;
            debug!(
                location = %candidate.location,
                score = candidate.score,
                distance = candidate.distance,
                current_demand = candidate.current_demand,
                forecasted_demand = candidate.forecasted_demand,
                volume_free = candidate.volume_free,
                "scored relocation candidate"
            );
            Ok(candidate)
        })
        .collect::<DomainResult<Vec<_>>>()?;

    // `sort_by` is stable: ties stay in ascending id order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

/// The highest scoring candidate, or `None` when `source` is the only location.
pub fn find_best_target(snapshot: &Snapshot, source: LocationId) -> DomainResult<Option<LocationId>> {
    Ok(rank_candidates(snapshot, source)?
        .first()
        .map(|c| c.location))
}
