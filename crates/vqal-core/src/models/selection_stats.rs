use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Code;

/// Bookkeeping for one selection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub budget: usize,
    /// Distinct codes observed among the scored records.
    pub group_count: usize,
    /// `floor(budget / group_count)`, or 0 for a degenerate round.
    pub quota: usize,
    /// Indices taken by the per-code quota phase.
    pub primary: usize,
    /// Indices back-filled from the overflow pool.
    pub overflow_filled: usize,
    /// Selected indices per code.
    pub per_code: BTreeMap<Code, usize>,
}

impl SelectionStats {
    pub fn selected(&self) -> usize {
        self.primary + self.overflow_filled
    }
}
