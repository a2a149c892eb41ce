//! Round-level error aggregating every subsystem error.

use super::error_code::VqalErrorCode;
use super::{CheckpointError, ConfigError, PoolError, ScoringError, SourceError};

/// Errors that abort a selection round.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum VqalError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

impl VqalErrorCode for VqalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Checkpoint(e) => e.error_code(),
            Self::Scoring(e) => e.error_code(),
            Self::Pool(e) => e.error_code(),
            Self::Source(e) => e.error_code(),
        }
    }
}

pub type VqalResult<T> = Result<T, VqalError>;
