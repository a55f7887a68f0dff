pub mod filter;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

pub use filter::ProviderFilter;
pub use storage::{
    load_providers, read_provider_file, save_scored_providers, ProviderFile, RejectedRecord,
    ScoredProvider,
};
pub use store::{InMemoryProviderStore, ProviderStore};
pub use types::{Category, Provider, TrustScoreInputs};
pub use validation::validate_provider;
