pub mod candidates;
pub mod diversity;
pub mod filters;
pub mod presentation;
pub mod providers;
pub mod ranking;
pub mod recommendations;
pub mod rule_repository;
pub mod scorer;

pub use recommendations::RecommendationService;
pub use rule_repository::RuleRepository;
pub use scorer::{HybridScorer, NoopModelScorer, OutfitScorer};
