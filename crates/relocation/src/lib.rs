//! Relocation decision module.
//!
//! Given one read-only [`Snapshot`] of inventory state this crate decides
//! whether the source location is overloaded, ranks the other locations as
//! relocation targets and sizes the move. Everything here is deterministic
//! domain logic (no IO beyond parsing an in-memory document).

pub mod decision;
pub mod job;
pub mod records;
pub mod scoring;
pub mod sizing;
pub mod snapshot;
pub mod threshold;

pub use decision::{
    NoTargetReason, RelocationDecision, RelocationPlan, RelocationReport, SourceStatus,
    TargetAnalysis,
};
pub use job::RelocationJob;
pub use records::{InventoryRecord, RecordsDocument, build_snapshot_document};
pub use scoring::{
    CandidateScore, ScoreWeights, find_best_target, rank_candidates, rank_candidates_with,
};
pub use sizing::size_relocation;
pub use snapshot::{Location, Snapshot, SnapshotDocument};
pub use threshold::{available_capacity, excess_load, exceeds_threshold};
