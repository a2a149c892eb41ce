//! Error handling for VQAL.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod checkpoint_error;
pub mod config_error;
pub mod error_code;
pub mod pool_error;
pub mod scoring_error;
pub mod source_error;
pub mod vqal_error;

pub use checkpoint_error::CheckpointError;
pub use config_error::ConfigError;
pub use error_code::VqalErrorCode;
pub use pool_error::PoolError;
pub use scoring_error::ScoringError;
pub use source_error::SourceError;
pub use vqal_error::{VqalError, VqalResult};
