use vqal_core::errors::{SourceError, VqalError, VqalResult};
use vqal_core::models::SampleIndex;
use vqal_core::traits::ISampleSource;

/// Samples held in memory, one feature vector per index.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    samples: Vec<Vec<f32>>,
}

impl InMemorySource {
    pub fn new(samples: Vec<Vec<f32>>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Vec<f32>] {
        &self.samples
    }
}

impl ISampleSource for InMemorySource {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn fetch(&self, indices: &[SampleIndex]) -> VqalResult<Vec<Vec<f32>>> {
        indices
            .iter()
            .map(|&index| {
                self.samples.get(index).cloned().ok_or_else(|| {
                    VqalError::from(SourceError::IndexOutOfRange {
                        index,
                        len: self.samples.len(),
                    })
                })
            })
            .collect()
    }
}
