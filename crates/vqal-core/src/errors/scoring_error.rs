//! Scoring errors. Always fatal to the round.

use super::error_code::{self, VqalErrorCode};

/// Errors raised while scoring the unlabeled pool.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring model failed on batch {batch}: {reason}")]
    ModelFailed { batch: usize, reason: String },

    #[error("batch {batch}: expected {expected} results, got {actual}")]
    LengthMismatch {
        batch: usize,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite distance {distance} for sample {index}")]
    NonFiniteDistance { index: usize, distance: f32 },

    #[error("sample dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl VqalErrorCode for ScoringError {
    fn error_code(&self) -> &'static str {
        error_code::SCORING_FAILURE
    }
}
