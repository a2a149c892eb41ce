//! Labeled/unlabeled partition errors.

use super::error_code::{self, VqalErrorCode};

/// Errors raised by the pool partition.
///
/// All variants except `Persistence` are invariant violations: the caller
/// asked for a move that would break `labeled ∩ unlabeled = ∅` or
/// `labeled ∪ unlabeled = universe`.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("invariant violation: index {index} outside universe of {universe}")]
    IndexOutOfRange { index: usize, universe: usize },

    #[error("invariant violation: index {index} is not unlabeled")]
    NotUnlabeled { index: usize },

    #[error("invariant violation: index {index} appears more than once")]
    DuplicateSelection { index: usize },

    #[error("invariant violation: {reason}")]
    PartitionBroken { reason: String },

    #[error("pool persistence failed at {path}: {message}")]
    Persistence { path: String, message: String },
}

impl PoolError {
    /// True for every variant that signals a broken partition invariant.
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, Self::Persistence { .. })
    }
}

impl VqalErrorCode for PoolError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Persistence { .. } => error_code::POOL_PERSISTENCE,
            _ => error_code::INVARIANT_VIOLATION,
        }
    }
}
