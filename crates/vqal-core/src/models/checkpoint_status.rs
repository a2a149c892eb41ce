use serde::{Deserialize, Serialize};

/// What happened when the engine tried to restore the scoring model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckpointStatus {
    /// State restored from `path`.
    Loaded { path: String },
    /// No checkpoint at `path`; scored with the untrained model.
    NotFound { path: String },
    /// Restoring was disabled or no path was configured.
    Skipped,
}

impl CheckpointStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}
