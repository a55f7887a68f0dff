use std::collections::HashSet;

/// Lower-bounded score band: values at or above `min` earn `points`.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub min: f64,
    pub points: f64,
}

/// Google rating bands, highest first.
pub const REVIEW_BANDS: [Band; 3] = [
    Band { min: 4.5, points: 20.0 },
    Band { min: 4.0, points: 15.0 },
    Band { min: 3.5, points: 10.0 },
];
pub const REVIEW_FLOOR_POINTS: f64 = 5.0;
/// Awarded when there are no reviews at all. Reflects missing data, not bad data.
pub const NO_REVIEWS_POINTS: f64 = 8.0;

/// Years-in-business bands, highest first.
pub const EXPERIENCE_BANDS: [Band; 3] = [
    Band { min: 10.0, points: 15.0 },
    Band { min: 5.0, points: 12.0 },
    Band { min: 2.0, points: 8.0 },
];
pub const EXPERIENCE_FLOOR_POINTS: f64 = 5.0;

pub const PROFILE_COMPLETE_POINTS: f64 = 20.0;
pub const LICENSE_POINTS: f64 = 15.0;
pub const LOCAL_DOMAIN_POINTS: f64 = 10.0;
pub const LOCAL_PHONE_POINTS: f64 = 5.0;
pub const CERTIFICATION_POINTS: f64 = 8.0;
pub const FREE_ZONE_POINTS: f64 = 5.0;
pub const SOCIAL_PROFILE_POINTS: f64 = 1.25;
pub const MAX_SOCIAL_PROFILES: usize = 4;

const LOCAL_TLD: &str = ".ae";
const LOCAL_CALLING_CODE: &str = "971";
const FREE_ZONE_SUFFIXES: [&str; 3] = ["FZE", "FZCO", "FZ-LLC"];

/// Return the points of the first band whose minimum `value` reaches,
/// or `floor` when none does. Bands must be ordered highest first.
pub fn band_points(value: f64, bands: &[Band], floor: f64) -> f64 {
    bands
        .iter()
        .find(|band| value >= band.min)
        .map(|band| band.points)
        .unwrap_or(floor)
}

/// Treat `None` and whitespace-only strings alike
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Check whether a website is registered under the local top-level domain.
///
/// Accepts bare hosts ("example.ae") as well as full URLs
/// ("https://www.example.ae/contact").
pub fn has_local_domain(website: &str) -> bool {
    let trimmed = website.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.to_ascii_lowercase().trim_end_matches('.').ends_with(LOCAL_TLD)
}

/// Check whether a phone number carries the local country calling code,
/// either as "+971..." or "00971...". Spaces, dashes and brackets are ignored.
pub fn has_local_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    let international = trimmed.starts_with('+');
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    if international {
        digits.starts_with(LOCAL_CALLING_CODE)
    } else {
        digits
            .strip_prefix("00")
            .is_some_and(|rest| rest.starts_with(LOCAL_CALLING_CODE))
    }
}

/// Check whether a legal form names a free-zone entity
pub fn is_free_zone(legal_form: &str) -> bool {
    let upper = legal_form.to_ascii_uppercase();
    if upper.contains("FREE ZONE") || upper.contains("FZ LLC") {
        return true;
    }
    upper
        .split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')')
        .any(|word| FREE_ZONE_SUFFIXES.contains(&word))
}

/// Count distinct, non-empty social profiles, capped at [`MAX_SOCIAL_PROFILES`]
pub fn distinct_social_profiles(profiles: &[String]) -> usize {
    let unique: HashSet<String> = profiles
        .iter()
        .map(|p| p.trim().trim_end_matches('/').to_ascii_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    unique.len().min(MAX_SOCIAL_PROFILES)
}
