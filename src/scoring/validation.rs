use super::config::ScoringConfig;
use super::engine::MIN_FOUNDED_YEAR;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(quality) = config.default_data_quality {
        if quality > 100 {
            errors.push(format!(
                "scoring.default_data_quality: must be between 0 and 100, got {}",
                quality
            ));
        }
    }

    if let Some(year) = config.reference_year {
        if year < MIN_FOUNDED_YEAR {
            errors.push(format!(
                "scoring.reference_year: must be {} or later, got {}",
                MIN_FOUNDED_YEAR, year
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
