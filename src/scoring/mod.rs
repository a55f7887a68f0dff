pub mod config;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod factors;
pub mod validation;

pub use config::*;
pub use criteria::{ExperienceLevel, MatchCriteria, Timeline};
pub use engine::{
    FactorContribution, MatchResult, ScoringEngine, TrustBreakdown, TrustLevel, DEFAULT_MATCH_LIMIT,
};
pub use error::ScoringError;
pub use validation::validate_scoring;
