use serde::{Deserialize, Serialize};

use super::defaults;

/// Selection round configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    /// Number of samples moved from unlabeled to labeled per round.
    pub budget: usize,
    /// Samples per scoring-model invocation.
    pub batch_size: usize,
    /// Score batches on the rayon pool instead of sequentially.
    pub parallel_scoring: bool,
    /// Try to restore the scoring model from its checkpoint before scoring.
    pub restore_checkpoint: bool,
    /// Rounds executed per CLI invocation.
    pub rounds: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            budget: defaults::DEFAULT_BUDGET,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            parallel_scoring: defaults::DEFAULT_PARALLEL_SCORING,
            restore_checkpoint: defaults::DEFAULT_RESTORE_CHECKPOINT,
            rounds: defaults::DEFAULT_ROUNDS,
        }
    }
}
