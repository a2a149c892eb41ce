use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Filesystem layout: dataset features, scorer checkpoint and pool partition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory every other path is resolved against.
    pub root_path: PathBuf,
    /// Directory (under the root) holding the dataset features.
    pub data_directory: String,
    /// Binary feature file inside `data_directory`.
    pub features_file: String,
    /// Directory (under the root) holding scorer checkpoints.
    pub checkpoint_directory: String,
    /// Checkpoint file inside `checkpoint_directory`.
    pub checkpoint_file: String,
    /// Pool partition snapshot, stored directly under the root.
    pub pool_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(defaults::DEFAULT_ROOT_PATH),
            data_directory: defaults::DEFAULT_DATA_DIRECTORY.to_string(),
            features_file: defaults::DEFAULT_FEATURES_FILE.to_string(),
            checkpoint_directory: defaults::DEFAULT_CHECKPOINT_DIRECTORY.to_string(),
            checkpoint_file: defaults::DEFAULT_CHECKPOINT_FILE.to_string(),
            pool_file: defaults::DEFAULT_POOL_FILE.to_string(),
        }
    }
}

impl PathsConfig {
    /// `<root>/<checkpoint_directory>/<checkpoint_file>`.
    pub fn checkpoint_path(&self) -> PathBuf {
        self.root_path
            .join(&self.checkpoint_directory)
            .join(&self.checkpoint_file)
    }

    /// `<root>/<data_directory>/<features_file>`.
    pub fn features_path(&self) -> PathBuf {
        self.root_path
            .join(&self.data_directory)
            .join(&self.features_file)
    }

    /// `<root>/<pool_file>`.
    pub fn pool_path(&self) -> PathBuf {
        self.root_path.join(&self.pool_file)
    }
}
