//! Sample source errors.

use super::error_code::{self, VqalErrorCode};

/// Errors raised while fetching raw samples.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("sample index {index} out of range for source of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("source I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed feature file {path}: {message}")]
    Malformed { path: String, message: String },
}

impl VqalErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        error_code::SOURCE_ERROR
    }
}
