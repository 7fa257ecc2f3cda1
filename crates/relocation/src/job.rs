use tracing::{info, warn};

use loadshift_core::DomainResult;

use crate::decision::{
    NoTargetReason, RelocationDecision, RelocationReport, SourceStatus, TargetAnalysis,
};
use crate::scoring::{ScoreWeights, rank_candidates_with};
use crate::sizing::size_relocation;
use crate::snapshot::Snapshot;
use crate::threshold::{available_capacity, excess_load, exceeds_threshold};

/// One relocation decision over a single snapshot.
///
/// Flow:
/// - check the source against its alert threshold (stop if not exceeded);
/// - rank every other location;
/// - size the move toward the top candidate.
///
/// Running the same job twice yields the same report.
#[derive(Debug, Clone)]
pub struct RelocationJob {
    snapshot: Snapshot,
    weights: ScoreWeights,
}

impl RelocationJob {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            weights: ScoreWeights::DEFAULT,
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn run(&self) -> DomainResult<RelocationReport> {
        let source_id = self.snapshot.source_id();
        let source = self.snapshot.source();

        let exceeded = exceeds_threshold(&self.snapshot, source_id)?;
        let status = SourceStatus {
            location: source_id,
            load: source.upcoming_quantity,
            threshold: source.threshold_for_alert,
            exceeded,
            excess_load: if exceeded { excess_load(source)? } else { 0 },
        };

        if !exceeded {
            info!(
                source = %source_id,
                load = status.load,
                threshold = status.threshold,
                "source within threshold; no relocation needed"
            );
            return Ok(RelocationReport {
                decision: RelocationDecision::NoActionNeeded {
                    source: source_id,
                    load: status.load,
                    threshold: status.threshold,
                },
                source: status,
                candidates: Vec::new(),
                target: None,
            });
        }

        info!(
            source = %source_id,
            load = status.load,
            threshold = status.threshold,
            excess_load = status.excess_load,
            "source over threshold; ranking candidates"
        );

        let candidates = rank_candidates_with(&self.snapshot, source_id, &self.weights)?;

        let Some(best) = candidates.first() else {
            warn!(source = %source_id, "no relocation candidates in snapshot");
            return Ok(RelocationReport {
                decision: RelocationDecision::NoValidTarget {
                    source: source_id,
                    excess_load: status.excess_load,
                    reason: NoTargetReason::NoCandidates,
                },
                source: status,
                candidates,
                target: None,
            });
        };

        let target = self.snapshot.location(best.location)?;
        let analysis = TargetAnalysis {
            location: target.id,
            score: best.score,
            load: target.upcoming_quantity,
            threshold: target.threshold_for_alert,
            available_capacity: available_capacity(target)?,
            volume_free: target.volume_free,
        };

        let decision = size_relocation(&self.snapshot, source_id, target.id)?;
        if let RelocationDecision::Relocated(plan) = &decision {
            info!(
                source = %plan.source,
                target = %plan.target,
                amount = plan.amount,
                partial = plan.partial,
                "relocation planned"
            );
        }

        Ok(RelocationReport {
            source: status,
            candidates,
            target: Some(analysis),
            decision,
        })
    }
}
