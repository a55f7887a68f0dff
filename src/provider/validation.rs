use super::types::Provider;
use crate::scoring::engine::MIN_FOUNDED_YEAR;

/// Check a provider record against the data model.
/// Returns all problems at once, each prefixed with the field name.
pub fn validate_provider(provider: &Provider, reference_year: i32) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if provider.id.trim().is_empty() {
        errors.push("id: must not be empty".to_string());
    }

    if provider.founded_year < MIN_FOUNDED_YEAR || provider.founded_year > reference_year {
        errors.push(format!(
            "founded_year: must be between {} and {}, got {}",
            MIN_FOUNDED_YEAR, reference_year, provider.founded_year
        ));
    }

    if let Some(rating) = provider.google_rating {
        if !(0.0..=5.0).contains(&rating) {
            errors.push(format!("google_rating: must be between 0 and 5, got {}", rating));
        }
    }

    // A rating exists exactly when there are reviews behind it
    match (provider.google_rating, provider.review_count) {
        (Some(_), 0) => {
            errors.push("google_rating: present but review_count is 0".to_string());
        }
        (None, n) if n > 0 => {
            errors.push(format!("review_count: {} reviews but no google_rating", n));
        }
        _ => {}
    }

    if !(0.0..=100.0).contains(&provider.response_rate_percent) {
        errors.push(format!(
            "response_rate_percent: must be between 0 and 100, got {}",
            provider.response_rate_percent
        ));
    }

    if provider.response_time_hours.is_nan() || provider.response_time_hours <= 0.0 {
        errors.push(format!(
            "response_time_hours: must be positive, got {}",
            provider.response_time_hours
        ));
    }

    if let Some(quality) = provider.trust_inputs.data_quality {
        if quality > 100 {
            errors.push(format!(
                "trust_inputs.data_quality: must be between 0 and 100, got {}",
                quality
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
