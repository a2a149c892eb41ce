//! # vqal-core
//!
//! Foundation crate for the VQAL sample-selection pipeline.
//! Defines the types, traits, errors, config, tracing setup and constants
//! shared by the query engine and the CLI. Contains no selection logic.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::VqalConfig;
pub use errors::{VqalError, VqalResult};
pub use models::{Code, CodeAssignment, SampleIndex, ScoreRecord};
pub use traits::{ISampleSource, IScoringModel};
