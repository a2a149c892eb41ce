//! Top-level VQAL configuration with 3-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ModelConfig, ObservabilityConfig, PathsConfig, QueryConfig};
use crate::constants::{ENV_PREFIX, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`VQAL_*`)
/// 3. Project config (`vqal.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct VqalConfig {
    pub paths: PathsConfig,
    pub query: QueryConfig,
    pub model: ModelConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_path: Option<PathBuf>,
    pub budget: Option<usize>,
    pub batch_size: Option<usize>,
    pub rounds: Option<u32>,
    pub parallel_scoring: Option<bool>,
}

impl VqalConfig {
    /// Load configuration with 3-layer resolution rooted at `root`.
    ///
    /// A missing `vqal.toml` is not an error; a malformed one is.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        // The root the file was found in wins over a relative default.
        if config.paths.root_path.is_relative() {
            config.paths.root_path = root.join(&config.paths.root_path);
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a TOML file. Unknown keys are ignored.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &VqalConfig) -> Result<(), ConfigError> {
        if config.query.budget == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "query.budget".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.query.batch_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "query.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.query.rounds == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "query.rounds".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.model.num_embeddings == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "model.num_embeddings".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.model.embedding_dim == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "model.embedding_dim".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(0.0..1.0).contains(&config.model.decay) {
            return Err(ConfigError::ValidationFailed {
                field: "model.decay".to_string(),
                message: "must be in [0.0, 1.0)".to_string(),
            });
        }
        if !matches!(
            config.observability.log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("unknown level '{}'", config.observability.log_level),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `VQAL_BUDGET`, `VQAL_BATCH_SIZE`, etc. Unparseable values are skipped.
    ///
    /// `lookup` abstracts `std::env::var` so tests don't touch process state.
    pub fn apply_env_overrides<F>(config: &mut VqalConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(val) = var("ROOT_PATH") {
            config.paths.root_path = PathBuf::from(val);
        }
        if let Some(v) = var("BUDGET").and_then(|s| s.parse::<usize>().ok()) {
            config.query.budget = v;
        }
        if let Some(v) = var("BATCH_SIZE").and_then(|s| s.parse::<usize>().ok()) {
            config.query.batch_size = v;
        }
        if let Some(v) = var("PARALLEL_SCORING").and_then(|s| s.parse::<bool>().ok()) {
            config.query.parallel_scoring = v;
        }
        if let Some(v) = var("ROUNDS").and_then(|s| s.parse::<u32>().ok()) {
            config.query.rounds = v;
        }
        if let Some(val) = var("LOG_LEVEL") {
            config.observability.log_level = val;
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut VqalConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.root_path {
            config.paths.root_path = v.clone();
        }
        if let Some(v) = cli.budget {
            config.query.budget = v;
        }
        if let Some(v) = cli.batch_size {
            config.query.batch_size = v;
        }
        if let Some(v) = cli.rounds {
            config.query.rounds = v;
        }
        if let Some(v) = cli.parallel_scoring {
            config.query.parallel_scoring = v;
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
