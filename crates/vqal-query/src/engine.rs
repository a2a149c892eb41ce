//! Round orchestration: restore → score → select → apply.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::info_span;

use vqal_core::config::QueryConfig;
use vqal_core::constants::ROUND_SPAN;
use vqal_core::errors::{PoolError, VqalResult};
use vqal_core::models::{CheckpointStatus, RoundOutcome, RoundStatus};
use vqal_core::traits::{ISampleSource, IScoringModel};
use vqal_core::VqalConfig;

use crate::events;
use crate::pool::PoolState;
use crate::scorer::Scorer;
use crate::selector;

/// Runs selection rounds against a pool.
///
/// A round either applies its whole selection or leaves the pool untouched:
/// every fallible step runs before `PoolState::apply_selection`, and that
/// call validates its input before moving anything.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    config: QueryConfig,
    checkpoint_path: Option<PathBuf>,
    rounds_run: u32,
}

impl QueryEngine {
    /// Engine without a checkpoint; every round reports `Skipped`.
    pub fn new(config: QueryConfig) -> Self {
        Self {
            config,
            checkpoint_path: None,
            rounds_run: 0,
        }
    }

    pub fn with_checkpoint(config: QueryConfig, checkpoint_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            checkpoint_path: Some(checkpoint_path.into()),
            rounds_run: 0,
        }
    }

    pub fn from_config(config: &VqalConfig) -> Self {
        Self::with_checkpoint(config.query.clone(), config.paths.checkpoint_path())
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Rounds started by this engine, including failed ones.
    pub fn rounds_run(&self) -> u32 {
        self.rounds_run
    }

    /// Run one round and return what it labeled.
    ///
    /// A missing checkpoint is reported on the outcome and logged, not raised.
    /// An empty unlabeled pool yields `RoundStatus::PoolExhausted` with an
    /// empty selection.
    pub fn run_round(
        &mut self,
        pool: &mut PoolState,
        model: &mut dyn IScoringModel,
        source: &dyn ISampleSource,
    ) -> VqalResult<RoundOutcome> {
        self.rounds_run += 1;
        let round = self.rounds_run;
        let budget = self.config.budget;

        let span = info_span!(ROUND_SPAN, round, budget);
        let _guard = span.enter();

        if source.len() != pool.universe() {
            return Err(PoolError::PartitionBroken {
                reason: format!(
                    "source holds {} samples but the pool universe is {}",
                    source.len(),
                    pool.universe()
                ),
            }
            .into());
        }

        events::round_started(round, budget, pool.unlabeled_len());

        let checkpoint = self.restore(model)?;

        let scorer = Scorer::new(self.config.batch_size, self.config.parallel_scoring);
        let started = Instant::now();
        let records = scorer.score_pool(pool, &*model, source)?;
        events::scoring_completed(
            records.len(),
            scorer.batch_size(),
            started.elapsed().as_millis() as u64,
        );

        let selection = selector::select(&records, budget);
        events::selection_completed(
            selection.stats.group_count,
            selection.stats.quota,
            selection.stats.primary,
            selection.stats.overflow_filled,
        );

        pool.apply_selection(&selection.indices)?;

        let status = if records.is_empty() {
            events::pool_exhausted(round, pool.labeled_len());
            RoundStatus::PoolExhausted
        } else {
            RoundStatus::Completed
        };

        events::round_completed(
            round,
            selection.len(),
            pool.labeled_len(),
            pool.unlabeled_len(),
        );

        Ok(RoundOutcome {
            round,
            status,
            selected: selection.indices,
            checkpoint,
            stats: selection.stats,
            labeled_total: pool.labeled_len(),
            unlabeled_remaining: pool.unlabeled_len(),
            completed_at: Utc::now(),
        })
    }

    /// Run up to `rounds` rounds, stopping after the first exhausted one.
    pub fn run_rounds(
        &mut self,
        pool: &mut PoolState,
        model: &mut dyn IScoringModel,
        source: &dyn ISampleSource,
        rounds: u32,
    ) -> VqalResult<Vec<RoundOutcome>> {
        let mut outcomes = Vec::with_capacity(rounds as usize);
        for _ in 0..rounds {
            let outcome = self.run_round(pool, model, source)?;
            let exhausted = outcome.status == RoundStatus::PoolExhausted;
            outcomes.push(outcome);
            if exhausted {
                break;
            }
        }
        Ok(outcomes)
    }

    /// Run up to `rounds` rounds against the pool persisted at `pool_path`.
    ///
    /// The snapshot is loaded (or created over the source's universe) first
    /// and written back afterwards even when a round fails: a failed round
    /// never mutates the pool, so the file keeps every completed round.
    pub fn run_persisted(
        &mut self,
        pool_path: &Path,
        model: &mut dyn IScoringModel,
        source: &dyn ISampleSource,
        rounds: u32,
    ) -> VqalResult<Vec<RoundOutcome>> {
        let mut pool = PoolState::load_or_new(pool_path, source.len())?;
        let result = self.run_rounds(&mut pool, model, source, rounds);
        pool.save_json(pool_path)?;
        result
    }

    fn restore(&self, model: &mut dyn IScoringModel) -> VqalResult<CheckpointStatus> {
        let path = match &self.checkpoint_path {
            Some(path) if self.config.restore_checkpoint => path,
            _ => return Ok(CheckpointStatus::Skipped),
        };
        let display = path.display().to_string();

        match model.restore(path) {
            Ok(()) => {
                events::checkpoint_restored(&display, model.name());
                Ok(CheckpointStatus::Loaded { path: display })
            }
            Err(e) if e.is_not_found() => {
                events::checkpoint_missing(&display, model.name());
                Ok(CheckpointStatus::NotFound { path: display })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::InMemorySource;
    use crate::CodebookScorer;
    use vqal_core::config::{DistanceMetric, ModelConfig};

    fn scorer() -> CodebookScorer {
        CodebookScorer::from_embeddings(
            vec![vec![0.0, 0.0], vec![10.0, 10.0]],
            DistanceMetric::Euclidean,
        )
        .unwrap()
    }

    fn config(budget: usize) -> QueryConfig {
        QueryConfig {
            budget,
            batch_size: 2,
            ..Default::default()
        }
    }

    #[test]
    fn round_without_checkpoint_is_skipped() {
        let source = InMemorySource::new((0..6).map(|i| vec![i as f32, 0.0]).collect());
        let mut pool = PoolState::new(6);
        let mut engine = QueryEngine::new(config(4));
        let outcome = engine.run_round(&mut pool, &mut scorer(), &source).unwrap();
        assert_eq!(outcome.checkpoint, CheckpointStatus::Skipped);
        assert_eq!(outcome.status, RoundStatus::Completed);
        assert_eq!(outcome.selected.len(), 4);
        assert_eq!(pool.unlabeled_len(), 2);
        assert_eq!(engine.rounds_run(), 1);
    }

    #[test]
    fn source_universe_mismatch_is_rejected() {
        let source = InMemorySource::new(vec![vec![0.0, 0.0]; 3]);
        let mut pool = PoolState::new(4);
        let err = QueryEngine::new(config(2))
            .run_round(&mut pool, &mut scorer(), &source)
            .unwrap_err();
        assert!(matches!(
            err,
            vqal_core::VqalError::Pool(PoolError::PartitionBroken { .. })
        ));
        assert_eq!(pool, PoolState::new(4));
    }

    #[test]
    fn dimension_mismatch_leaves_pool_unchanged() {
        let source = InMemorySource::new(vec![vec![0.0; 3]; 4]);
        let mut pool = PoolState::new(4);
        let mut model = CodebookScorer::new(&ModelConfig {
            num_embeddings: 2,
            embedding_dim: 2,
            ..Default::default()
        });
        assert!(QueryEngine::new(config(2))
            .run_round(&mut pool, &mut model, &source)
            .is_err());
        assert_eq!(pool, PoolState::new(4));
    }
}
