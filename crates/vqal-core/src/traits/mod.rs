pub mod sample_source;
pub mod scoring_model;

pub use sample_source::ISampleSource;
pub use scoring_model::IScoringModel;
