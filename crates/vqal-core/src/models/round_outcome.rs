use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckpointStatus, SampleIndex, SelectionStats};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Scored, selected and applied.
    Completed,
    /// The unlabeled pool was empty; nothing was selected.
    PoolExhausted,
}

/// Result of one Scorer → Selector → PoolState round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// 1-based round counter of the engine that ran it.
    pub round: u32,
    pub status: RoundStatus,
    /// Newly labeled indices, in the order they were appended.
    pub selected: Vec<SampleIndex>,
    pub checkpoint: CheckpointStatus,
    pub stats: SelectionStats,
    pub labeled_total: usize,
    pub unlabeled_remaining: usize,
    pub completed_at: DateTime<Utc>,
}
