//! Scoring-model checkpoint errors.

use super::error_code::{self, VqalErrorCode};

/// Errors raised while restoring a scoring model from a checkpoint.
///
/// `NotFound` is recoverable: the round proceeds with the untrained model.
/// Every other variant aborts the round.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("no checkpoint exists at {path}")]
    NotFound { path: String },

    #[error("checkpoint {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },

    #[error("checkpoint incompatible: {field} expected {expected}, found {found}")]
    Incompatible {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("checkpoint I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

impl CheckpointError {
    /// True for the "first round, nothing trained yet" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl VqalErrorCode for CheckpointError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::CHECKPOINT_NOT_FOUND,
            _ => error_code::CHECKPOINT_ERROR,
        }
    }
}
