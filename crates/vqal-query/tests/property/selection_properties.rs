use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use vqal_core::models::{CodeAssignment, ScoreRecord};
use vqal_core::traits::IScoringModel;
use vqal_core::VqalResult;
use vqal_query::{select, InMemorySource, PoolState, Scorer};

/// Up to 200 records over up to 12 codes, unique indices.
fn records_strategy() -> impl Strategy<Value = Vec<ScoreRecord>> {
    prop::collection::vec((0u32..12, 0.0f32..100.0), 0..200).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(index, (code, distance))| ScoreRecord::new(code, distance, index))
            .collect()
    })
}

struct FeatureEcho;

impl IScoringModel for FeatureEcho {
    fn evaluate(&self, batch: &[Vec<f32>]) -> VqalResult<Vec<CodeAssignment>> {
        Ok(batch
            .iter()
            .map(|s| CodeAssignment::new(s[0] as u32, s[1]))
            .collect())
    }
    fn restore(
        &mut self,
        _path: &std::path::Path,
    ) -> Result<(), vqal_core::errors::CheckpointError> {
        Ok(())
    }
    fn name(&self) -> &str {
        "feature-echo"
    }
}

proptest! {
    #[test]
    fn selection_never_exceeds_budget(records in records_strategy(), budget in 0usize..300) {
        let selection = select(&records, budget);
        prop_assert!(selection.len() <= budget);
        prop_assert_eq!(selection.len(), budget.min(records.len()));
    }

    #[test]
    fn selection_has_no_duplicates(records in records_strategy(), budget in 0usize..300) {
        let selection = select(&records, budget);
        prop_assert_eq!(selection.as_set().len(), selection.len());
    }

    #[test]
    fn every_code_gets_its_quota(records in records_strategy(), budget in 1usize..300) {
        let selection = select(&records, budget);
        let mut sizes: BTreeMap<u32, usize> = BTreeMap::new();
        for r in &records {
            *sizes.entry(r.code).or_default() += 1;
        }
        if sizes.is_empty() {
            prop_assert!(selection.is_empty());
        } else {
            let quota = budget / sizes.len();
            let chosen = selection.as_set();
            for (code, size) in &sizes {
                let picked = records
                    .iter()
                    .filter(|r| r.code == *code && chosen.contains(&r.index))
                    .count();
                prop_assert!(picked >= quota.min(*size), "code {} got {} of quota {}", code, picked, quota);
            }
        }
    }

    #[test]
    fn apply_selection_keeps_partition(
        universe in 1usize..100,
        picks in prop::collection::vec(0usize..100, 0..40),
    ) {
        let mut pool = PoolState::new(universe);
        let valid: Vec<usize> = picks
            .iter()
            .copied()
            .filter(|&i| i < universe)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        pool.apply_selection(&valid).unwrap();
        prop_assert!(pool.check_invariants().is_ok());
        prop_assert_eq!(pool.labeled_len() + pool.unlabeled_len(), universe);

        // Replaying any already-labeled index must fail and change nothing.
        if let Some(&first) = valid.first() {
            let before = pool.clone();
            prop_assert!(pool.apply_selection(&[first]).is_err());
            prop_assert_eq!(pool, before);
        }
    }

    #[test]
    fn empty_records_select_nothing(budget in 0usize..1000) {
        prop_assert!(select(&[], budget).is_empty());
    }

    #[test]
    fn batch_size_does_not_change_the_selection(
        rows in prop::collection::vec((0u32..6, 0.0f32..50.0), 1..120),
        batch_a in 1usize..64,
        batch_b in 1usize..64,
        budget in 1usize..80,
    ) {
        let source = InMemorySource::new(
            rows.iter().map(|&(c, d)| vec![c as f32, d]).collect(),
        );
        let pool = PoolState::new(rows.len());

        let a = Scorer::new(batch_a, false).score_pool(&pool, &FeatureEcho, &source).unwrap();
        let b = Scorer::new(batch_b, true).score_pool(&pool, &FeatureEcho, &source).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(select(&a, budget).indices, select(&b, budget).indices);
    }
}
