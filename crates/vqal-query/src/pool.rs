//! Labeled/unlabeled partition of the dataset index universe.
//!
//! Invariants, checked on every mutation:
//! - `labeled ∩ unlabeled = ∅`
//! - `labeled ∪ unlabeled = 0..universe`
//! - `labeled` only grows, in selection order.

use std::collections::BTreeSet;
use std::path::Path;

use vqal_core::errors::PoolError;
use vqal_core::models::{PoolSnapshot, SampleIndex};

/// The partition a selection round reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    universe: usize,
    labeled: Vec<SampleIndex>,
    unlabeled: BTreeSet<SampleIndex>,
}

impl PoolState {
    /// Everything unlabeled.
    pub fn new(universe: usize) -> Self {
        Self {
            universe,
            labeled: Vec::new(),
            unlabeled: (0..universe).collect(),
        }
    }

    /// Start with `initial` already labeled, in the given order.
    pub fn with_labeled(universe: usize, initial: &[SampleIndex]) -> Result<Self, PoolError> {
        let mut pool = Self::new(universe);
        pool.apply_selection(initial)?;
        Ok(pool)
    }

    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Labeled indices in the order they were selected.
    pub fn labeled(&self) -> &[SampleIndex] {
        &self.labeled
    }

    pub fn unlabeled(&self) -> &BTreeSet<SampleIndex> {
        &self.unlabeled
    }

    pub fn labeled_len(&self) -> usize {
        self.labeled.len()
    }

    pub fn unlabeled_len(&self) -> usize {
        self.unlabeled.len()
    }

    /// True once every index has been labeled.
    pub fn is_exhausted(&self) -> bool {
        self.unlabeled.is_empty()
    }

    /// Move `selected` from unlabeled to labeled.
    ///
    /// The whole input is validated before anything moves: an index outside
    /// the universe, a repeated index, or an index that is not currently
    /// unlabeled fails the call and leaves the partition untouched.
    pub fn apply_selection(&mut self, selected: &[SampleIndex]) -> Result<(), PoolError> {
        let mut seen = BTreeSet::new();
        for &index in selected {
            if index >= self.universe {
                return Err(PoolError::IndexOutOfRange {
                    index,
                    universe: self.universe,
                });
            }
            if !seen.insert(index) {
                return Err(PoolError::DuplicateSelection { index });
            }
            if !self.unlabeled.contains(&index) {
                return Err(PoolError::NotUnlabeled { index });
            }
        }

        for &index in selected {
            self.unlabeled.remove(&index);
            self.labeled.push(index);
        }
        Ok(())
    }

    /// Re-check both partition invariants from scratch.
    pub fn check_invariants(&self) -> Result<(), PoolError> {
        let labeled: BTreeSet<SampleIndex> = self.labeled.iter().copied().collect();
        if labeled.len() != self.labeled.len() {
            return Err(PoolError::PartitionBroken {
                reason: "labeled contains duplicates".to_string(),
            });
        }
        if let Some(index) = labeled.intersection(&self.unlabeled).next() {
            return Err(PoolError::PartitionBroken {
                reason: format!("index {index} is both labeled and unlabeled"),
            });
        }
        if labeled.len() + self.unlabeled.len() != self.universe {
            return Err(PoolError::PartitionBroken {
                reason: format!(
                    "{} labeled + {} unlabeled does not cover universe of {}",
                    labeled.len(),
                    self.unlabeled.len(),
                    self.universe
                ),
            });
        }
        if let Some(&index) = labeled
            .iter()
            .chain(self.unlabeled.iter())
            .find(|&&i| i >= self.universe)
        {
            return Err(PoolError::IndexOutOfRange {
                index,
                universe: self.universe,
            });
        }
        Ok(())
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            universe: self.universe,
            labeled: self.labeled.clone(),
        }
    }

    /// Rebuild a pool from a snapshot, re-validating it.
    pub fn from_snapshot(snapshot: &PoolSnapshot) -> Result<Self, PoolError> {
        Self::with_labeled(snapshot.universe, &snapshot.labeled)
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<(), PoolError> {
        let persistence = |message: String| PoolError::Persistence {
            path: path.display().to_string(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| persistence(e.to_string()))?;
        }
        let json =
            serde_json::to_string_pretty(&self.snapshot()).map_err(|e| persistence(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| persistence(e.to_string()))
    }

    /// Read a snapshot written by [`PoolState::save_json`].
    pub fn load_json(path: &Path) -> Result<Self, PoolError> {
        let persistence = |message: String| PoolError::Persistence {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| persistence(e.to_string()))?;
        let snapshot: PoolSnapshot =
            serde_json::from_str(&content).map_err(|e| persistence(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Load the snapshot at `path`, or start fully unlabeled over
    /// `universe` when none exists yet.
    pub fn load_or_new(path: &Path, universe: usize) -> Result<Self, PoolError> {
        if path.exists() {
            return Self::load_json(path);
        }
        tracing::info!(
            path = %path.display(),
            universe,
            "no pool snapshot, starting fully unlabeled"
        );
        Ok(Self::new(universe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_is_all_unlabeled() {
        let pool = PoolState::new(5);
        assert_eq!(pool.labeled_len(), 0);
        assert_eq!(pool.unlabeled_len(), 5);
        assert!(pool.check_invariants().is_ok());
    }

    #[test]
    fn apply_selection_appends_in_given_order() {
        let mut pool = PoolState::new(6);
        pool.apply_selection(&[4, 1]).unwrap();
        pool.apply_selection(&[0]).unwrap();
        assert_eq!(pool.labeled(), &[4, 1, 0]);
        assert_eq!(pool.unlabeled().iter().copied().collect::<Vec<_>>(), vec![2, 3, 5]);
        assert!(pool.check_invariants().is_ok());
    }

    #[test]
    fn rejects_already_labeled_without_mutating() {
        let mut pool = PoolState::with_labeled(4, &[2]).unwrap();
        let before = pool.clone();
        let err = pool.apply_selection(&[0, 2]).unwrap_err();
        assert!(matches!(err, PoolError::NotUnlabeled { index: 2 }));
        assert_eq!(pool, before);
    }

    #[test]
    fn rejects_duplicates_and_out_of_range() {
        let mut pool = PoolState::new(3);
        assert!(matches!(
            pool.apply_selection(&[1, 1]),
            Err(PoolError::DuplicateSelection { index: 1 })
        ));
        assert!(matches!(
            pool.apply_selection(&[3]),
            Err(PoolError::IndexOutOfRange { index: 3, universe: 3 })
        ));
        assert_eq!(pool.unlabeled_len(), 3);
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let mut pool = PoolState::new(2);
        pool.apply_selection(&[]).unwrap();
        assert_eq!(pool, PoolState::new(2));
    }

    #[test]
    fn snapshot_round_trip_preserves_order() {
        let pool = PoolState::with_labeled(10, &[7, 3, 9]).unwrap();
        let restored = PoolState::from_snapshot(&pool.snapshot()).unwrap();
        assert_eq!(restored, pool);
    }

    #[test]
    fn corrupt_snapshot_is_rejected() {
        let snapshot = PoolSnapshot {
            universe: 3,
            labeled: vec![0, 0],
        };
        assert!(PoolState::from_snapshot(&snapshot).is_err());
    }
}
