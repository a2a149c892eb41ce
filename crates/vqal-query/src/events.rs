//! Structured log events for a selection round.
//!
//! Each function emits one `tracing` event with an `event` field, so rounds
//! can be followed in JSON logs by event name. Shared field names come
//! from `vqal_core::tracing::metrics`.

use vqal_core::tracing::metrics;

/// A round is about to score the unlabeled pool.
pub fn round_started(round: u32, budget: usize, unlabeled: usize) {
    tracing::info!(
        event = "round_started",
        { metrics::ROUND } = round,
        { metrics::BUDGET } = budget,
        unlabeled = unlabeled,
        "selection round started"
    );
}

/// No checkpoint yet: this is the first round, scoring with the untrained model.
pub fn checkpoint_missing(path: &str, model: &str) {
    tracing::warn!(
        event = "checkpoint_missing",
        path = %path,
        model = %model,
        "no checkpoint found, scoring with untrained model"
    );
}

pub fn checkpoint_restored(path: &str, model: &str) {
    tracing::info!(
        event = "checkpoint_restored",
        path = %path,
        model = %model,
        "scoring model restored"
    );
}

/// Log scoring completion.
pub fn scoring_completed(records: usize, batch_size: usize, elapsed_ms: u64) {
    tracing::info!(
        event = "scoring_completed",
        { metrics::RECORDS_SCORED } = records,
        batch_size = batch_size,
        { metrics::SCORING_TIME_MS } = elapsed_ms,
        "unlabeled pool scored"
    );
}

/// Log the selector's phase breakdown.
pub fn selection_completed(
    group_count: usize,
    quota: usize,
    primary: usize,
    overflow_filled: usize,
) {
    tracing::info!(
        event = "selection_completed",
        { metrics::GROUP_COUNT } = group_count,
        { metrics::QUOTA } = quota,
        { metrics::PRIMARY_SELECTED } = primary,
        { metrics::OVERFLOW_FILLED } = overflow_filled,
        "selection completed"
    );
}

pub fn pool_exhausted(round: u32, labeled: usize) {
    tracing::warn!(
        event = "pool_exhausted",
        { metrics::ROUND } = round,
        labeled = labeled,
        "unlabeled pool is empty, nothing to select"
    );
}

/// Log round completion.
pub fn round_completed(round: u32, selected: usize, labeled: usize, unlabeled: usize) {
    tracing::info!(
        event = "round_completed",
        { metrics::ROUND } = round,
        selected = selected,
        labeled = labeled,
        { metrics::UNLABELED_REMAINING } = unlabeled,
        "selection round completed"
    );
}
