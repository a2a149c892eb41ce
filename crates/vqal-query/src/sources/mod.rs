//! Sample sources: where raw samples come from, addressed by absolute index.

pub mod binary_features;
pub mod in_memory;

pub use binary_features::BinaryFeatureSource;
pub use in_memory::InMemorySource;
