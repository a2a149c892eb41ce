use serde::{Deserialize, Serialize};

use super::defaults;

/// Distance used between a latent vector and its nearest codebook entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Squared L2 distance.
    #[default]
    Euclidean,
    /// `1 - cosine similarity`.
    Cosine,
}

/// Scoring-model hyperparameters.
///
/// The selection core only reads `num_embeddings`, `embedding_dim` and
/// `distance`; the remaining fields are passed through to the training job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub num_hiddens: usize,
    pub num_residual_layers: usize,
    pub num_residual_hiddens: usize,
    /// Codebook size (number of discrete codes).
    pub num_embeddings: usize,
    /// Length of each codebook vector and of each latent sample.
    pub embedding_dim: usize,
    pub commitment_cost: f64,
    /// EMA decay for codebook updates. Must be in `[0, 1)`.
    pub decay: f64,
    pub distance: DistanceMetric,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            num_hiddens: defaults::DEFAULT_NUM_HIDDENS,
            num_residual_layers: defaults::DEFAULT_NUM_RESIDUAL_LAYERS,
            num_residual_hiddens: defaults::DEFAULT_NUM_RESIDUAL_HIDDENS,
            num_embeddings: defaults::DEFAULT_NUM_EMBEDDINGS,
            embedding_dim: defaults::DEFAULT_EMBEDDING_DIM,
            commitment_cost: defaults::DEFAULT_COMMITMENT_COST,
            decay: defaults::DEFAULT_DECAY,
            distance: DistanceMetric::default(),
        }
    }
}
