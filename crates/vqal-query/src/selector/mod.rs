//! Budgeted, code-balanced selection.
//!
//! Two phases:
//! 1. Quota: every code gets `floor(budget / codes)` slots and fills them with
//!    its highest-distance records. Groups at or under quota give everything.
//! 2. Back-fill: records cut from over-quota groups compete globally, by
//!    distance, for whatever budget phase 1 left unspent.
//!
//! Both phases order by distance descending, then index ascending.

pub mod code_groups;
pub mod overflow;

use std::collections::{BTreeMap, BTreeSet};

use vqal_core::models::{SampleIndex, ScoreRecord, SelectionStats};

pub use code_groups::CodeGroups;
pub use overflow::OverflowPool;

/// Output of one selection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Quota picks in ascending code order, then back-fill picks in
    /// priority order. No repeats.
    pub indices: Vec<SampleIndex>,
    pub stats: SelectionStats,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_set(&self) -> BTreeSet<SampleIndex> {
        self.indices.iter().copied().collect()
    }
}

/// Pick at most `budget` distinct indices from `records`.
///
/// Returns an empty selection when `records` is empty (no codes means no
/// quota to compute). Returns fewer than `budget` indices only when fewer
/// than `budget` distinct indices exist. An index scored more than once
/// counts only with its highest-priority record.
pub fn select(records: &[ScoreRecord], budget: usize) -> Selection {
    let records = best_per_index(records);
    let groups = CodeGroups::build(&records);
    let mut stats = SelectionStats {
        budget,
        group_count: groups.len(),
        ..Default::default()
    };

    if groups.is_empty() {
        return Selection {
            indices: Vec::new(),
            stats,
        };
    }

    let quota = budget / groups.len();
    stats.quota = quota;

    let mut indices = Vec::with_capacity(budget.min(records.len()));
    let mut overflow = OverflowPool::default();

    for (code, group) in groups.iter() {
        let take = group.len().min(quota);
        let (kept, rest) = group.split_at(take);
        indices.extend(kept.iter().map(|r| r.index));
        overflow.extend_from(rest);
        if take > 0 {
            *stats.per_code.entry(code).or_default() += take;
        }
    }
    stats.primary = indices.len();

    let shortfall = budget.saturating_sub(indices.len());
    if shortfall > 0 && !overflow.is_empty() {
        for record in overflow.take_top(shortfall) {
            indices.push(record.index);
            *stats.per_code.entry(record.code).or_default() += 1;
        }
    }
    stats.overflow_filled = indices.len() - stats.primary;

    Selection { indices, stats }
}

fn best_per_index(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    let mut best: BTreeMap<SampleIndex, ScoreRecord> = BTreeMap::new();
    for record in records {
        best.entry(record.index)
            .and_modify(|kept| {
                if record.priority_cmp(kept).is_lt() {
                    *kept = *record;
                }
            })
            .or_insert(*record);
    }
    best.into_values().collect()
}
