//! Configuration system for VQAL.
//! TOML-based, 3-layer resolution: CLI > env > project > defaults.

pub mod defaults;
pub mod model_config;
pub mod observability_config;
pub mod paths_config;
pub mod query_config;
pub mod vqal_config;

pub use model_config::{DistanceMetric, ModelConfig};
pub use observability_config::ObservabilityConfig;
pub use paths_config::PathsConfig;
pub use query_config::QueryConfig;
pub use vqal_config::{CliOverrides, VqalConfig};
