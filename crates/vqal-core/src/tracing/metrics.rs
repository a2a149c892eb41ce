//! Structured span field definitions for VQAL metrics.
//!
//! These constants define the standard field names used in tracing spans
//! and events across the pipeline, so logs can be queried uniformly.

/// Round: 1-based round counter.
pub const ROUND: &str = "round";

/// Round: requested selection budget.
pub const BUDGET: &str = "budget";

/// Selector: per-code quota, `floor(budget / group_count)`.
pub const QUOTA: &str = "quota";

/// Selector: number of distinct codes observed.
pub const GROUP_COUNT: &str = "group_count";

/// Selector: indices taken by the quota phase.
pub const PRIMARY_SELECTED: &str = "primary_selected";

/// Selector: indices back-filled from the overflow pool.
pub const OVERFLOW_FILLED: &str = "overflow_filled";

/// Scorer: number of records produced.
pub const RECORDS_SCORED: &str = "records_scored";

/// Scorer: wall-clock scoring time in milliseconds.
pub const SCORING_TIME_MS: &str = "scoring_ms";

/// Pool: unlabeled indices left after the round.
pub const UNLABELED_REMAINING: &str = "unlabeled_remaining";
