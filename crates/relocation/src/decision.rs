use serde::{Deserialize, Serialize};

use loadshift_core::LocationId;

use crate::scoring::CandidateScore;

/// Outcome of one relocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RelocationDecision {
    /// The source sits at or below its alert threshold.
    NoActionNeeded {
        source: LocationId,
        load: i64,
        threshold: i64,
    },
    /// The source is overloaded but nothing can take any of the excess.
    NoValidTarget {
        source: LocationId,
        excess_load: i64,
        reason: NoTargetReason,
    },
    Relocated(RelocationPlan),
}

impl RelocationDecision {
    pub fn target(&self) -> Option<LocationId> {
        match self {
            RelocationDecision::Relocated(plan) => Some(plan.target),
            _ => None,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, RelocationDecision::Relocated(plan) if plan.partial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoTargetReason {
    /// The source is the only location in the snapshot.
    NoCandidates,
    /// The best candidate has no headroom or no free volume.
    TargetCannotAccept {
        target: LocationId,
        relocatable_amount: i64,
    },
}

/// A concrete move of `amount` units from `source` to `target`.
///
/// `partial` is set whenever `amount < excess_load`; `remaining_excess` is
/// what a follow-up pass would still need to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationPlan {
    pub source: LocationId,
    pub target: LocationId,
    pub amount: i64,
    pub excess_load: i64,
    pub remaining_excess: i64,
    pub partial: bool,
    pub source_load_before: i64,
    pub source_load_after: i64,
    pub target_load_before: i64,
    pub target_load_after: i64,
}

/// Load picture of the source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub location: LocationId,
    pub load: i64,
    pub threshold: i64,
    pub exceeded: bool,
    /// Zero unless `exceeded`.
    pub excess_load: i64,
}

/// Headroom of the chosen target, reported before sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAnalysis {
    pub location: LocationId,
    pub score: f64,
    pub load: i64,
    pub threshold: i64,
    pub available_capacity: i64,
    pub volume_free: i64,
}

/// Decision plus everything needed to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationReport {
    pub source: SourceStatus,
    /// Ranked best first; empty when the source was not overloaded.
    pub candidates: Vec<CandidateScore>,
    pub target: Option<TargetAnalysis>,
    pub decision: RelocationDecision,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decisions_serialize_with_an_outcome_tag() {
        let decision = RelocationDecision::NoValidTarget {
            source: LocationId::new(1),
            excess_load: 20,
            reason: NoTargetReason::TargetCannotAccept {
                target: LocationId::new(2),
                relocatable_amount: 0,
            },
        };

        assert_eq!(
            serde_json::to_value(&decision).unwrap(),
            json!({
                "outcome": "no_valid_target",
                "source": 1,
                "excess_load": 20,
                "reason": {"kind": "target_cannot_accept", "target": 2, "relocatable_amount": 0}
            })
        );
        assert_eq!(decision.target(), None);
        assert!(!decision.is_partial());
    }

    #[test]
    fn relocated_plan_is_flattened_under_the_tag() {
        let decision = RelocationDecision::Relocated(RelocationPlan {
            source: LocationId::new(1),
            target: LocationId::new(2),
            amount: 10,
            excess_load: 20,
            remaining_excess: 10,
            partial: true,
            source_load_before: 100,
            source_load_after: 90,
            target_load_before: 50,
            target_load_after: 60,
        });

        let value = serde_json::to_value(&decision).unwrap();
        assert_eq!(value["outcome"], "relocated");
        assert_eq!(value["target"], 2);
        assert_eq!(value["partial"], true);

        let back: RelocationDecision = serde_json::from_value(value).unwrap();
        assert_eq!(back, decision);
        assert_eq!(back.target(), Some(LocationId::new(2)));
        assert!(back.is_partial());
    }
}
