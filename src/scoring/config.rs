use serde::{Deserialize, Serialize};

/// Data quality assumed for records whose ingestion did not supply one.
pub const DEFAULT_DATA_QUALITY: u8 = 70;

/// Main scoring configuration.
///
/// The weights themselves are fixed; only the clamp policy and the fallbacks
/// for incomplete records are configurable.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   use_estimation_floor: true
///   default_data_quality: 85
///   reference_year: 2025
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Clamp trust scores into 70..=95 instead of 0..=100.
    ///
    /// Only meant for synthetic or estimated records, where a plausible
    /// looking score is needed. It says nothing about actual trust.
    #[serde(default)]
    pub use_estimation_floor: bool,

    /// Data quality (0-100) used when a provider record carries none
    /// (default: 70)
    #[serde(default)]
    pub default_data_quality: Option<u8>,

    /// Year used to derive years in business (default: current UTC year)
    #[serde(default)]
    pub reference_year: Option<i32>,
}
