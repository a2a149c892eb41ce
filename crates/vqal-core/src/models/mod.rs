pub mod checkpoint_status;
pub mod pool_snapshot;
pub mod round_outcome;
pub mod score_record;
pub mod selection_stats;

pub use checkpoint_status::CheckpointStatus;
pub use pool_snapshot::PoolSnapshot;
pub use round_outcome::{RoundOutcome, RoundStatus};
pub use score_record::{Code, CodeAssignment, SampleIndex, ScoreRecord};
pub use selection_stats::SelectionStats;
