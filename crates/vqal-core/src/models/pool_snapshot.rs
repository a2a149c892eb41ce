use serde::{Deserialize, Serialize};

use super::SampleIndex;

/// Serializable view of the labeled/unlabeled partition.
///
/// `unlabeled` is not stored: it is the complement of `labeled` in
/// `0..universe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub universe: usize,
    /// Labeled indices in selection order.
    pub labeled: Vec<SampleIndex>,
}
