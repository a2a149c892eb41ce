//! End-to-end round tests: checkpoint handling, atomicity, multi-round runs.

use std::path::Path;

use vqal_core::config::{DistanceMetric, ModelConfig, QueryConfig};
use vqal_core::errors::{CheckpointError, ScoringError, VqalErrorCode};
use vqal_core::models::{CheckpointStatus, CodeAssignment, RoundStatus};
use vqal_core::traits::{ISampleSource, IScoringModel};
use vqal_core::{VqalError, VqalResult};
use vqal_query::{
    BinaryFeatureSource, CodebookCheckpoint, CodebookScorer, InMemorySource, PoolState,
    QueryEngine,
};

/// Fails on every batch after `fail_after` successful ones.
struct FlakyModel {
    fail_after: usize,
    calls: std::sync::atomic::AtomicUsize,
}

impl IScoringModel for FlakyModel {
    fn evaluate(&self, batch: &[Vec<f32>]) -> VqalResult<Vec<CodeAssignment>> {
        let call = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if call >= self.fail_after {
            return Err(ScoringError::ModelFailed {
                batch: call,
                reason: "device lost".to_string(),
            }
            .into());
        }
        Ok(batch.iter().map(|_| CodeAssignment::new(0, 1.0)).collect())
    }

    fn restore(&mut self, path: &Path) -> Result<(), CheckpointError> {
        Err(CheckpointError::NotFound {
            path: path.display().to_string(),
        })
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn two_code_scorer() -> CodebookScorer {
    CodebookScorer::from_embeddings(
        vec![vec![0.0, 0.0], vec![10.0, 10.0]],
        DistanceMetric::Euclidean,
    )
    .unwrap()
}

fn query(budget: usize, batch_size: usize) -> QueryConfig {
    QueryConfig {
        budget,
        batch_size,
        ..Default::default()
    }
}

fn clustered_source() -> InMemorySource {
    InMemorySource::new(test_fixtures::clustered_rows(12, 2, 2))
}

#[test]
fn missing_checkpoint_is_reported_and_round_proceeds() {
    let dir = tempfile::tempdir().unwrap();
    let ckpt = dir.path().join("checkpoints").join("codebook.json");
    let source = clustered_source();
    let mut pool = PoolState::new(source.len());
    let mut engine = QueryEngine::with_checkpoint(query(4, 5), &ckpt);

    let outcome = engine
        .run_round(&mut pool, &mut two_code_scorer(), &source)
        .unwrap();

    assert_eq!(
        outcome.checkpoint,
        CheckpointStatus::NotFound {
            path: ckpt.display().to_string()
        }
    );
    assert_eq!(outcome.status, RoundStatus::Completed);
    // Two codes, quota 2: the two farthest rows of each cluster.
    assert_eq!(outcome.selected, vec![10, 8, 11, 9]);
    assert_eq!(outcome.stats.quota, 2);
    assert_eq!(outcome.labeled_total, 4);
    assert_eq!(outcome.unlabeled_remaining, 8);
    assert_eq!(pool.labeled(), &[10, 8, 11, 9]);
}

#[test]
fn restored_checkpoint_replaces_the_codebook() {
    let dir = tempfile::tempdir().unwrap();
    let ckpt = dir.path().join("codebook.json");
    CodebookCheckpoint {
        num_embeddings: 2,
        embedding_dim: 2,
        embeddings: vec![vec![10.0, 10.0], vec![0.0, 0.0]],
    }
    .save(&ckpt)
    .unwrap();

    let source = clustered_source();
    let mut pool = PoolState::new(source.len());
    let mut model = CodebookScorer::new(&ModelConfig {
        num_embeddings: 2,
        embedding_dim: 2,
        ..Default::default()
    });

    let outcome = QueryEngine::with_checkpoint(query(4, 3), &ckpt)
        .run_round(&mut pool, &mut model, &source)
        .unwrap();

    assert!(outcome.checkpoint.is_loaded());
    assert_eq!(model.embeddings()[0], vec![10.0, 10.0]);
    // Codes swapped, so the odd cluster now comes first.
    assert_eq!(outcome.selected, vec![11, 9, 10, 8]);
}

#[test]
fn corrupt_checkpoint_aborts_without_touching_the_pool() {
    let dir = tempfile::tempdir().unwrap();
    let ckpt = dir.path().join("codebook.json");
    std::fs::write(&ckpt, "not a checkpoint").unwrap();

    let source = clustered_source();
    let mut pool = PoolState::new(source.len());
    let err = QueryEngine::with_checkpoint(query(4, 3), &ckpt)
        .run_round(&mut pool, &mut two_code_scorer(), &source)
        .unwrap_err();

    assert_eq!(err.error_code(), "CHECKPOINT_ERROR");
    assert_eq!(pool, PoolState::new(12));
}

#[test]
fn disabled_restore_skips_the_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let config = QueryConfig {
        restore_checkpoint: false,
        ..query(2, 4)
    };
    let source = clustered_source();
    let mut pool = PoolState::new(source.len());
    let outcome = QueryEngine::with_checkpoint(config, dir.path().join("codebook.json"))
        .run_round(&mut pool, &mut two_code_scorer(), &source)
        .unwrap();
    assert_eq!(outcome.checkpoint, CheckpointStatus::Skipped);
}

#[test]
fn scoring_failure_leaves_the_pool_unmodified() {
    let source = InMemorySource::new(vec![vec![0.0]; 10]);
    let mut pool = PoolState::with_labeled(10, &[3]).unwrap();
    let before = pool.clone();
    let mut model = FlakyModel {
        fail_after: 2,
        calls: Default::default(),
    };

    let mut engine = QueryEngine::new(QueryConfig {
        parallel_scoring: false,
        ..query(5, 3)
    });
    let err = engine.run_round(&mut pool, &mut model, &source).unwrap_err();

    assert!(matches!(
        err,
        VqalError::Scoring(ScoringError::ModelFailed { .. })
    ));
    assert_eq!(err.error_code(), "SCORING_FAILURE");
    assert_eq!(pool, before);
    assert_eq!(engine.rounds_run(), 1);
}

#[test]
fn rounds_continue_until_the_pool_is_exhausted() {
    let source = clustered_source();
    let mut pool = PoolState::new(source.len());
    let mut engine = QueryEngine::new(query(4, 5));

    let outcomes = engine
        .run_rounds(&mut pool, &mut two_code_scorer(), &source, 10)
        .unwrap();

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[..3]
        .iter()
        .all(|o| o.status == RoundStatus::Completed && o.selected.len() == 4));
    let last = &outcomes[3];
    assert_eq!(last.status, RoundStatus::PoolExhausted);
    assert!(last.selected.is_empty());
    assert_eq!(last.round, 4);
    assert!(pool.is_exhausted());
    assert!(pool.check_invariants().is_ok());
    assert_eq!(engine.rounds_run(), 4);
}

#[test]
fn binary_feature_file_drives_a_round() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("features.bin");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        test_fixtures::encode_features(&test_fixtures::clustered_rows(12, 2, 2)),
    )
    .unwrap();

    let source = BinaryFeatureSource::open(&path).unwrap();
    let mut pool = PoolState::new(source.len());
    let outcome = QueryEngine::new(query(4, 4))
        .run_round(&mut pool, &mut two_code_scorer(), &source)
        .unwrap();
    assert_eq!(outcome.selected, vec![10, 8, 11, 9]);
}

#[test]
fn budget_larger_than_pool_selects_everything_left() {
    let source = clustered_source();
    let mut pool = PoolState::with_labeled(12, &[0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let outcome = QueryEngine::new(query(100, 2))
        .run_round(&mut pool, &mut two_code_scorer(), &source)
        .unwrap();
    assert_eq!(outcome.selected.len(), 3);
    assert_eq!(outcome.status, RoundStatus::Completed);
    assert!(pool.is_exhausted());
}

#[test]
fn outcome_serializes_with_tagged_checkpoint() {
    let source = clustered_source();
    let mut pool = PoolState::new(source.len());
    let outcome = QueryEngine::new(query(2, 4))
        .run_round(&mut pool, &mut two_code_scorer(), &source)
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "completed");
    assert_eq!(json["checkpoint"]["kind"], "skipped");
    assert_eq!(json["round"], 1);
}

#[test]
fn persisted_run_creates_the_snapshot_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let pool_path = dir.path().join("pool.json");
    let source = clustered_source();

    let outcomes = QueryEngine::new(query(4, 5))
        .run_persisted(&pool_path, &mut two_code_scorer(), &source, 1)
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    let saved = PoolState::load_json(&pool_path).unwrap();
    assert_eq!(saved.universe(), 12);
    assert_eq!(saved.labeled(), &[10, 8, 11, 9]);
}

#[test]
fn persisted_run_keeps_the_snapshot_after_a_failed_round() {
    let dir = tempfile::tempdir().unwrap();
    let pool_path = dir.path().join("state").join("pool.json");
    let source = InMemorySource::new(vec![vec![0.0]; 6]);
    PoolState::with_labeled(6, &[5, 2])
        .unwrap()
        .save_json(&pool_path)
        .unwrap();

    let mut failing = FlakyModel {
        fail_after: 0,
        calls: Default::default(),
    };
    let err = QueryEngine::new(query(3, 2))
        .run_persisted(&pool_path, &mut failing, &source, 2)
        .unwrap_err();

    assert_eq!(err.error_code(), "SCORING_FAILURE");
    let saved = PoolState::load_json(&pool_path).unwrap();
    assert_eq!(saved.labeled(), &[5, 2]);
    assert!(saved.check_invariants().is_ok());
}

#[test]
fn failed_first_round_still_writes_a_fresh_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let pool_path = dir.path().join("pool.json");
    let source = InMemorySource::new(vec![vec![0.0]; 4]);
    let mut failing = FlakyModel {
        fail_after: 0,
        calls: Default::default(),
    };

    assert!(QueryEngine::new(query(2, 2))
        .run_persisted(&pool_path, &mut failing, &source, 1)
        .is_err());

    assert_eq!(PoolState::load_json(&pool_path).unwrap(), PoolState::new(4));
}
