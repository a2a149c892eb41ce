use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Absolute position of a sample in the full dataset.
pub type SampleIndex = usize;

/// Discrete latent cluster assigned by the scoring model.
pub type Code = u32;

/// Per-sample output of a scoring model, before it is tied to an index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CodeAssignment {
    pub code: Code,
    /// Higher means the model represents the sample less well.
    pub distance: f32,
}

impl CodeAssignment {
    pub fn new(code: Code, distance: f32) -> Self {
        Self { code, distance }
    }
}

/// One scored sample for one round. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub code: Code,
    pub distance: f32,
    pub index: SampleIndex,
}

impl ScoreRecord {
    pub fn new(code: Code, distance: f32, index: SampleIndex) -> Self {
        Self {
            code,
            distance,
            index,
        }
    }

    /// Selection priority: larger distance first, then smaller index.
    ///
    /// Distances are finite by the time records reach the selector, so
    /// `total_cmp` agrees with the numeric order once `-0.0` is folded into
    /// `+0.0`.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        fold_zero(other.distance)
            .total_cmp(&fold_zero(self.distance))
            .then_with(|| self.index.cmp(&other.index))
    }
}

fn fold_zero(distance: f32) -> f32 {
    if distance == 0.0 {
        0.0
    } else {
        distance
    }
}
