//! Vector-quantization scoring model.
//!
//! Samples are latent vectors already produced by an encoder. Each one is
//! assigned the nearest codebook entry (its code) and the distance to that
//! entry (how poorly the codebook represents it).

use std::path::Path;

use serde::{Deserialize, Serialize};

use vqal_core::config::{DistanceMetric, ModelConfig};
use vqal_core::errors::{CheckpointError, ScoringError, VqalResult};
use vqal_core::models::{Code, CodeAssignment};
use vqal_core::traits::IScoringModel;

/// Persisted codebook, written by the training job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodebookCheckpoint {
    pub num_embeddings: usize,
    pub embedding_dim: usize,
    pub embeddings: Vec<Vec<f32>>,
}

impl CodebookCheckpoint {
    /// Read a checkpoint. A missing file is `NotFound`; unparseable JSON is
    /// `Corrupt`.
    pub fn load(path: &Path) -> Result<Self, CheckpointError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CheckpointError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                CheckpointError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|e| CheckpointError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Write the checkpoint as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        let io = |e: std::io::Error| CheckpointError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        let json = serde_json::to_string(self).map_err(|e| CheckpointError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(io)
    }
}

/// Nearest-codebook scorer.
#[derive(Debug, Clone)]
pub struct CodebookScorer {
    embeddings: Vec<Vec<f32>>,
    embedding_dim: usize,
    metric: DistanceMetric,
}

impl CodebookScorer {
    /// Untrained scorer with a deterministic, hash-derived codebook.
    pub fn new(config: &ModelConfig) -> Self {
        let embeddings = (0..config.num_embeddings)
            .map(|code| seeded_vector(code, config.embedding_dim))
            .collect();
        Self {
            embeddings,
            embedding_dim: config.embedding_dim,
            metric: config.distance,
        }
    }

    /// Scorer over an explicit codebook. Rows must all have the same length.
    pub fn from_embeddings(
        embeddings: Vec<Vec<f32>>,
        metric: DistanceMetric,
    ) -> Result<Self, CheckpointError> {
        let embedding_dim = embeddings.first().map_or(0, Vec::len);
        check_rows(&embeddings, embedding_dim)?;
        Ok(Self {
            embeddings,
            embedding_dim,
            metric,
        })
    }

    pub fn num_embeddings(&self) -> usize {
        self.embeddings.len()
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Current codebook as a checkpoint.
    pub fn to_checkpoint(&self) -> CodebookCheckpoint {
        CodebookCheckpoint {
            num_embeddings: self.num_embeddings(),
            embedding_dim: self.embedding_dim,
            embeddings: self.embeddings.clone(),
        }
    }

    /// Nearest entry; the lowest code wins an exact tie.
    fn nearest(&self, sample: &[f32]) -> CodeAssignment {
        let mut best = CodeAssignment::new(0, f32::INFINITY);
        for (code, entry) in self.embeddings.iter().enumerate() {
            let distance = match self.metric {
                DistanceMetric::Euclidean => squared_euclidean(sample, entry),
                DistanceMetric::Cosine => cosine_distance(sample, entry),
            };
            if distance.is_nan() {
                return CodeAssignment::new(code as Code, distance);
            }
            if distance < best.distance {
                best = CodeAssignment::new(code as Code, distance);
            }
        }
        best
    }
}

impl IScoringModel for CodebookScorer {
    fn evaluate(&self, batch: &[Vec<f32>]) -> VqalResult<Vec<CodeAssignment>> {
        if let Some(sample) = batch.iter().find(|s| s.len() != self.embedding_dim) {
            return Err(ScoringError::DimensionMismatch {
                expected: self.embedding_dim,
                actual: sample.len(),
            }
            .into());
        }
        Ok(batch.iter().map(|sample| self.nearest(sample)).collect())
    }

    /// Load a codebook whose shape matches the configured one. On any error
    /// the current codebook is kept.
    fn restore(&mut self, path: &Path) -> Result<(), CheckpointError> {
        let checkpoint = CodebookCheckpoint::load(path)?;

        if checkpoint.num_embeddings != self.num_embeddings() {
            return Err(CheckpointError::Incompatible {
                field: "num_embeddings".to_string(),
                expected: self.num_embeddings(),
                found: checkpoint.num_embeddings,
            });
        }
        if checkpoint.embedding_dim != self.embedding_dim {
            return Err(CheckpointError::Incompatible {
                field: "embedding_dim".to_string(),
                expected: self.embedding_dim,
                found: checkpoint.embedding_dim,
            });
        }
        if checkpoint.embeddings.len() != checkpoint.num_embeddings {
            return Err(CheckpointError::Incompatible {
                field: "embeddings".to_string(),
                expected: checkpoint.num_embeddings,
                found: checkpoint.embeddings.len(),
            });
        }
        check_rows(&checkpoint.embeddings, self.embedding_dim)?;

        self.embeddings = checkpoint.embeddings;
        Ok(())
    }

    fn name(&self) -> &str {
        "codebook"
    }
}

fn check_rows(embeddings: &[Vec<f32>], dim: usize) -> Result<(), CheckpointError> {
    match embeddings.iter().find(|row| row.len() != dim) {
        Some(row) => Err(CheckpointError::Incompatible {
            field: "embedding row length".to_string(),
            expected: dim,
            found: row.len(),
        }),
        None => Ok(()),
    }
}

/// Values in [-1, 1] from the BLAKE3 XOF of the code number.
fn seeded_vector(code: usize, dim: usize) -> Vec<f32> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"vqal-codebook:");
    hasher.update(&(code as u64).to_le_bytes());
    let mut bytes = vec![0u8; dim];
    hasher.finalize_xof().fill(&mut bytes);
    bytes
        .into_iter()
        .map(|b| (b as f32 / 255.0) * 2.0 - 1.0)
        .collect()
}

fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// `1 - cos(a, b)`; a zero vector is maximally dissimilar to everything.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
