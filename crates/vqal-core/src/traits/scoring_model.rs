use std::path::Path;

use crate::errors::{CheckpointError, VqalResult};
use crate::models::CodeAssignment;

/// A fitted latent model that assigns each sample a code and a distance.
///
/// The model is read-only while a round is scoring; `restore` is only
/// called between rounds.
pub trait IScoringModel: Send + Sync {
    /// Score a batch. Must return exactly one assignment per input sample,
    /// in input order.
    fn evaluate(&self, batch: &[Vec<f32>]) -> VqalResult<Vec<CodeAssignment>>;

    /// Replace the model state with the checkpoint at `path`.
    ///
    /// A missing checkpoint must be reported as `CheckpointError::NotFound`
    /// and leave the current state untouched.
    fn restore(&mut self, path: &Path) -> Result<(), CheckpointError>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}
