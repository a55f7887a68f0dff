use thiserror::Error;

/// Errors raised while scoring or ranking providers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringError {
    /// A provider record carries an out-of-range or missing field.
    /// Only the offending provider is affected.
    #[error("invalid provider '{provider_id}': {reason}")]
    InvalidInput { provider_id: String, reason: String },

    /// The caller passed an argument the engine cannot work with.
    /// The whole call fails.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ScoringError {
    pub fn invalid_input(provider_id: &str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            provider_id: provider_id.to_string(),
            reason: reason.into(),
        }
    }
}
