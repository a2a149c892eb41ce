use crate::errors::VqalResult;
use crate::models::SampleIndex;

/// Random-access provider of raw samples, addressed by absolute index.
pub trait ISampleSource: Send + Sync {
    /// Size of the full index universe.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the samples at `indices`, in the same order.
    fn fetch(&self, indices: &[SampleIndex]) -> VqalResult<Vec<Vec<f32>>>;
}
