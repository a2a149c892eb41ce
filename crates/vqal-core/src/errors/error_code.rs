//! VqalErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human-readable message.
pub trait VqalErrorCode {
    /// Returns the error code string (e.g., "SCORING_FAILURE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CHECKPOINT_NOT_FOUND: &str = "CHECKPOINT_NOT_FOUND";
pub const CHECKPOINT_ERROR: &str = "CHECKPOINT_ERROR";
pub const SCORING_FAILURE: &str = "SCORING_FAILURE";
pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
pub const POOL_PERSISTENCE: &str = "POOL_PERSISTENCE";
pub const SOURCE_ERROR: &str = "SOURCE_ERROR";
