//! Skill-requirement matching and aggregation engine

pub mod aggregator;
pub mod dictionary;
pub mod scorer;
pub mod types;

pub use aggregator::RequirementAggregator;
pub use scorer::SimilarityScorer;
