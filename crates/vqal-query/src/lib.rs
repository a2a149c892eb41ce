//! # vqal-query
//!
//! One selection round: score the unlabeled pool → group by code →
//! per-code quota cut → overflow back-fill → move the selection to labeled.
//! Ships a vector-quantization reference scorer and two sample sources.

pub mod codebook;
pub mod engine;
pub mod events;
pub mod pool;
pub mod scorer;
pub mod selector;
pub mod sources;

pub use codebook::{CodebookCheckpoint, CodebookScorer};
pub use engine::QueryEngine;
pub use pool::PoolState;
pub use scorer::Scorer;
pub use selector::{select, Selection};
pub use sources::{BinaryFeatureSource, InMemorySource};
