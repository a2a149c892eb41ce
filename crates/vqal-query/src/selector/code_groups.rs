//! Per-round grouping of score records by assigned code.

use std::collections::BTreeMap;

use vqal_core::models::{Code, ScoreRecord};

/// Records keyed by code, rebuilt from scratch every round.
///
/// Codes iterate in ascending order; each group keeps its records in
/// priority order once [`CodeGroups::build`] returns.
#[derive(Debug, Clone, Default)]
pub struct CodeGroups {
    groups: BTreeMap<Code, Vec<ScoreRecord>>,
}

impl CodeGroups {
    /// Partition `records` by code and sort each group by priority
    /// (larger distance first, then smaller index).
    pub fn build(records: &[ScoreRecord]) -> Self {
        let mut groups: BTreeMap<Code, Vec<ScoreRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.code).or_default().push(*record);
        }
        for group in groups.values_mut() {
            group.sort_by(ScoreRecord::priority_cmp);
        }
        Self { groups }
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, code: Code) -> Option<&[ScoreRecord]> {
        self.groups.get(&code).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Code, &[ScoreRecord])> {
        self.groups.iter().map(|(&code, group)| (code, group.as_slice()))
    }
}
