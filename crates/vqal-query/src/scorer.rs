//! Drives the scoring model over the unlabeled pool in batches.

use rayon::prelude::*;
use tracing::debug;

use vqal_core::errors::{ScoringError, VqalError, VqalResult};
use vqal_core::models::{SampleIndex, ScoreRecord};
use vqal_core::traits::{ISampleSource, IScoringModel};

use crate::pool::PoolState;

/// Batch scorer. Read-only with respect to the pool and the model.
///
/// Unlabeled indices are visited in ascending order and cut into
/// `batch_size` chunks. With `parallel` set, chunks are scored on the rayon
/// pool; results are re-attached to their absolute indices and returned in
/// chunk order either way, so the output does not depend on scheduling.
#[derive(Debug, Clone)]
pub struct Scorer {
    batch_size: usize,
    parallel: bool,
}

impl Scorer {
    pub fn new(batch_size: usize, parallel: bool) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Score the pool's current unlabeled set.
    pub fn score_pool(
        &self,
        pool: &PoolState,
        model: &dyn IScoringModel,
        source: &dyn ISampleSource,
    ) -> VqalResult<Vec<ScoreRecord>> {
        let unlabeled: Vec<SampleIndex> = pool.unlabeled().iter().copied().collect();
        self.score(&unlabeled, model, source)
    }

    /// Score every index in `unlabeled`. Any batch failure fails the call.
    pub fn score(
        &self,
        unlabeled: &[SampleIndex],
        model: &dyn IScoringModel,
        source: &dyn ISampleSource,
    ) -> VqalResult<Vec<ScoreRecord>> {
        let batches: Vec<&[SampleIndex]> = unlabeled.chunks(self.batch_size).collect();
        debug!(
            batches = batches.len(),
            batch_size = self.batch_size,
            parallel = self.parallel,
            model = model.name(),
            "scoring unlabeled pool"
        );

        let scored: Vec<Vec<ScoreRecord>> = if self.parallel {
            batches
                .par_iter()
                .enumerate()
                .map(|(batch_no, indices)| score_batch(batch_no, indices, model, source))
                .collect::<VqalResult<_>>()?
        } else {
            batches
                .iter()
                .enumerate()
                .map(|(batch_no, indices)| score_batch(batch_no, indices, model, source))
                .collect::<VqalResult<_>>()?
        };

        Ok(scored.into_iter().flatten().collect())
    }
}

/// Fetch, evaluate, and pair each result with its absolute index.
fn score_batch(
    batch_no: usize,
    indices: &[SampleIndex],
    model: &dyn IScoringModel,
    source: &dyn ISampleSource,
) -> VqalResult<Vec<ScoreRecord>> {
    let samples = source.fetch(indices)?;
    let assignments = model.evaluate(&samples)?;

    if assignments.len() != indices.len() {
        return Err(ScoringError::LengthMismatch {
            batch: batch_no,
            expected: indices.len(),
            actual: assignments.len(),
        }
        .into());
    }

    indices
        .iter()
        .zip(assignments)
        .map(|(&index, assignment)| {
            if !assignment.distance.is_finite() {
                return Err(VqalError::from(ScoringError::NonFiniteDistance {
                    index,
                    distance: assignment.distance,
                }));
            }
            Ok(ScoreRecord::new(assignment.code, assignment.distance, index))
        })
        .collect()
}
