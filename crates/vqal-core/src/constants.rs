/// VQAL version string.
pub const VQAL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the project-level config file looked up in the root path.
pub const PROJECT_CONFIG_FILE: &str = "vqal.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "VQAL_LOG";

/// Fallback tracing filter when `VQAL_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "vqal=info";

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "VQAL_";

/// Binary feature files: bytes taken by the `count` and `dims` header words.
pub const FEATURE_HEADER_BYTES: usize = 8;

/// Span name used for one selection round.
pub const ROUND_SPAN: &str = "vqal.round";
