//! Leftovers from over-quota groups, drawn on to spend the rest of the budget.

use vqal_core::models::ScoreRecord;

#[derive(Debug, Clone, Default)]
pub struct OverflowPool {
    records: Vec<ScoreRecord>,
}

impl OverflowPool {
    pub fn extend_from(&mut self, remainder: &[ScoreRecord]) {
        self.records.extend_from_slice(remainder);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `n` highest-priority records across all groups.
    pub fn take_top(mut self, n: usize) -> Vec<ScoreRecord> {
        self.records.sort_by(ScoreRecord::priority_cmp);
        self.records.truncate(n);
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_top_orders_globally() {
        let mut pool = OverflowPool::default();
        pool.extend_from(&[ScoreRecord::new(0, 0.1, 0), ScoreRecord::new(0, 0.7, 1)]);
        pool.extend_from(&[ScoreRecord::new(4, 0.5, 2)]);
        let top: Vec<_> = pool.take_top(2).iter().map(|r| r.index).collect();
        assert_eq!(top, vec![1, 2]);
    }

    #[test]
    fn take_top_caps_at_pool_size() {
        let mut pool = OverflowPool::default();
        pool.extend_from(&[ScoreRecord::new(0, 0.1, 0)]);
        assert_eq!(pool.take_top(5).len(), 1);
    }
}
