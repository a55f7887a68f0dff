use chrono::{Datelike, Utc};
use serde::Serialize;

use super::config::{ScoringConfig, DEFAULT_DATA_QUALITY};
use super::criteria::{ExperienceLevel, MatchCriteria, Timeline};
use super::error::ScoringError;
use super::factors::{self, band_points, is_present};
use crate::provider::{Provider, ScoredProvider};

/// Number of matches returned when the caller does not ask for a specific count
pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Oldest founding year a record may carry
pub const MIN_FOUNDED_YEAR: i32 = 1900;

const AUTHORITATIVE_RANGE: (f64, f64) = (0.0, 100.0);
const ESTIMATION_RANGE: (f64, f64) = (70.0, 95.0);

const MAX_MATCH_SCORE: u32 = 100;
const CATEGORY_MATCH_BONUS: u32 = 10;
const SERVICE_MATCH_BONUS: u32 = 5;
const LANGUAGE_MATCH_BONUS: u32 = 5;
const URGENT_RESPONSE_BONUS: u32 = 10;
const URGENT_RESPONSE_MAX_HOURS: f64 = 2.0;
const SENIOR_BONUS: u32 = 8;
const SENIOR_MIN_YEARS: i32 = 10;
const EXPERIENCED_BONUS: u32 = 5;
const EXPERIENCED_MIN_YEARS: i32 = 5;
const VERIFIED_BONUS: u32 = 5;
const FEATURED_BONUS: u32 = 3;
const RESPONSE_RATE_BONUS: u32 = 3;
const RESPONSE_RATE_MIN_PERCENT: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Reviews", "Experience"
    pub description: String, // e.g. "rating 4.8 (120 reviews)"
    pub points: f64,
}

/// Every term of a trust score, the range it was clamped into and the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustBreakdown {
    pub factors: Vec<FactorContribution>,
    pub raw_total: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub score: u32,
}

impl TrustBreakdown {
    pub fn level(&self) -> TrustLevel {
        TrustLevel::from_score(self.score)
    }

    /// True when the clamp moved the raw total
    pub fn clamped(&self) -> bool {
        self.raw_total < self.floor || self.raw_total > self.ceiling
    }
}

/// Human-facing trust band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustLevel {
    Excellent,
    VeryGood,
    Good,
    Fair,
}

impl TrustLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => TrustLevel::Excellent,
            80..=89 => TrustLevel::VeryGood,
            70..=79 => TrustLevel::Good,
            _ => TrustLevel::Fair,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrustLevel::Excellent => "Excellent",
            TrustLevel::VeryGood => "Very Good",
            TrustLevel::Good => "Good",
            TrustLevel::Fair => "Fair",
        }
    }
}

/// A provider paired with how well it fits one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub provider: &'a Provider,
    pub match_score: u32,
}

/// Computes trust scores, match scores and rankings.
///
/// Holds no mutable state; a single engine can be shared across threads and
/// every call returns the same result for the same input.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    use_estimation_floor: bool,
    default_data_quality: u8,
    reference_year: i32,
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            use_estimation_floor: config.use_estimation_floor,
            default_data_quality: config.default_data_quality.unwrap_or(DEFAULT_DATA_QUALITY),
            reference_year: config.reference_year.unwrap_or_else(|| Utc::now().year()),
        }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn uses_estimation_floor(&self) -> bool {
        self.use_estimation_floor
    }

    /// Compute the trust score of a provider, in 0..=100
    /// (or 70..=95 with the estimation floor).
    pub fn compute_trust_score(&self, provider: &Provider) -> Result<u32, ScoringError> {
        Ok(self.trust_breakdown(provider)?.score)
    }

    /// Compute the trust score together with each term that went into it.
    pub fn trust_breakdown(&self, provider: &Provider) -> Result<TrustBreakdown, ScoringError> {
        let years = self.years_in_business(provider)?;
        Ok(self.breakdown_for_years(provider, years))
    }

    /// Scores from an already validated age, so callers that also need the
    /// age check the founding year once.
    fn breakdown_for_years(&self, provider: &Provider, years: i32) -> TrustBreakdown {
        let inputs = &provider.trust_inputs;
        let mut terms = Vec::with_capacity(10);

        // Profile completeness
        let complete = !provider.name.trim().is_empty()
            && is_present(inputs.email.as_deref())
            && is_present(inputs.website.as_deref());
        terms.push(FactorContribution {
            label: "Profile".to_string(),
            description: if complete {
                "name, email and website present".to_string()
            } else {
                "incomplete profile".to_string()
            },
            points: if complete { factors::PROFILE_COMPLETE_POINTS } else { 0.0 },
        });

        let licensed = is_present(inputs.license_number.as_deref());
        terms.push(FactorContribution {
            label: "License".to_string(),
            description: if licensed {
                "trade license on record".to_string()
            } else {
                "no trade license".to_string()
            },
            points: if licensed { factors::LICENSE_POINTS } else { 0.0 },
        });

        let local_domain = inputs
            .website
            .as_deref()
            .is_some_and(factors::has_local_domain);
        terms.push(FactorContribution {
            label: "Local domain".to_string(),
            description: if local_domain {
                ".ae website".to_string()
            } else {
                "no .ae website".to_string()
            },
            points: if local_domain { factors::LOCAL_DOMAIN_POINTS } else { 0.0 },
        });

        let local_phone = inputs.phone.as_deref().is_some_and(factors::has_local_phone);
        terms.push(FactorContribution {
            label: "Local phone".to_string(),
            description: if local_phone {
                "+971 phone number".to_string()
            } else {
                "no +971 phone number".to_string()
            },
            points: if local_phone { factors::LOCAL_PHONE_POINTS } else { 0.0 },
        });

        let (review_points, review_description) = match provider.google_rating {
            Some(rating) => (
                band_points(rating, &factors::REVIEW_BANDS, factors::REVIEW_FLOOR_POINTS),
                format!("rating {:.1} ({} reviews)", rating, provider.review_count),
            ),
            None => (factors::NO_REVIEWS_POINTS, "no reviews yet".to_string()),
        };
        terms.push(FactorContribution {
            label: "Reviews".to_string(),
            description: review_description,
            points: review_points,
        });

        terms.push(FactorContribution {
            label: "Experience".to_string(),
            description: format!("{} years in business", years),
            points: band_points(
                years as f64,
                &factors::EXPERIENCE_BANDS,
                factors::EXPERIENCE_FLOOR_POINTS,
            ),
        });

        let (data_quality, supplied) = match inputs.data_quality {
            Some(dq) => (dq.min(100), true),
            None => (self.default_data_quality.min(100), false),
        };
        terms.push(FactorContribution {
            label: "Data quality".to_string(),
            description: if supplied {
                format!("quality {}", data_quality)
            } else {
                format!("quality {} (default)", data_quality)
            },
            // Integer maths keeps floor(dq * 0.15) exact
            points: (u32::from(data_quality) * 15 / 100) as f64,
        });

        let certified = inputs.certifications.iter().any(|c| !c.trim().is_empty());
        terms.push(FactorContribution {
            label: "Certifications".to_string(),
            description: format!("{} listed", inputs.certifications.len()),
            points: if certified { factors::CERTIFICATION_POINTS } else { 0.0 },
        });

        let free_zone = inputs
            .legal_form
            .as_deref()
            .is_some_and(factors::is_free_zone);
        terms.push(FactorContribution {
            label: "Free zone".to_string(),
            description: inputs
                .legal_form
                .clone()
                .unwrap_or_else(|| "legal form unknown".to_string()),
            points: if free_zone { factors::FREE_ZONE_POINTS } else { 0.0 },
        });

        let profiles = factors::distinct_social_profiles(&inputs.social_profiles);
        terms.push(FactorContribution {
            label: "Network".to_string(),
            description: format!("{} social profiles", profiles),
            points: profiles as f64 * factors::SOCIAL_PROFILE_POINTS,
        });

        let raw_total: f64 = terms.iter().map(|f| f.points).sum();
        let (floor, ceiling) = if self.use_estimation_floor {
            ESTIMATION_RANGE
        } else {
            AUTHORITATIVE_RANGE
        };
        let score = raw_total.clamp(floor, ceiling).round() as u32;

        tracing::debug!(provider_id = %provider.id, raw_total, score, "computed trust score");

        TrustBreakdown {
            factors: terms,
            raw_total,
            floor,
            ceiling,
            score,
        }
    }

    /// Compute how well a provider fits the criteria, in 0..=100.
    pub fn compute_match_score(
        &self,
        provider: &Provider,
        criteria: &MatchCriteria,
    ) -> Result<u32, ScoringError> {
        let years = self.years_in_business(provider)?;
        let mut score = self.breakdown_for_years(provider, years).score;

        if criteria.category == Some(provider.category) {
            score += CATEGORY_MATCH_BONUS;
        }

        let overlapping = criteria
            .required_services
            .iter()
            .filter(|s| provider.offers(s))
            .count() as u32;
        score += SERVICE_MATCH_BONUS * overlapping;

        if criteria
            .language
            .as_deref()
            .is_some_and(|language| provider.speaks(language))
        {
            score += LANGUAGE_MATCH_BONUS;
        }

        if criteria.timeline == Timeline::Urgent
            && provider.response_time_hours <= URGENT_RESPONSE_MAX_HOURS
        {
            score += URGENT_RESPONSE_BONUS;
        }

        // Senior is checked first; only an "experienced" search falls through
        match criteria.experience_level {
            ExperienceLevel::Senior if years >= SENIOR_MIN_YEARS => score += SENIOR_BONUS,
            ExperienceLevel::Experienced if years >= EXPERIENCED_MIN_YEARS => {
                score += EXPERIENCED_BONUS
            }
            _ => {}
        }

        if provider.is_verified {
            score += VERIFIED_BONUS;
        }
        if provider.is_featured {
            score += FEATURED_BONUS;
        }
        if provider.response_rate_percent >= RESPONSE_RATE_MIN_PERCENT {
            score += RESPONSE_RATE_BONUS;
        }

        Ok(score.min(MAX_MATCH_SCORE))
    }

    /// Rank providers for a search, best match first.
    ///
    /// Equal scores are ordered by provider id so the output is a total order.
    /// A provider that cannot be scored is logged and left out; it does not
    /// fail the ranking.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidArgument`] when `limit` is zero.
    pub fn rank_matches<'a, I>(
        &self,
        providers: I,
        criteria: &MatchCriteria,
        limit: usize,
    ) -> Result<Vec<MatchResult<'a>>, ScoringError>
    where
        I: IntoIterator<Item = &'a Provider>,
    {
        if limit == 0 {
            return Err(ScoringError::InvalidArgument(
                "limit must be greater than zero".to_string(),
            ));
        }

        let mut matches: Vec<MatchResult<'a>> = providers
            .into_iter()
            .filter_map(|provider| match self.compute_match_score(provider, criteria) {
                Ok(match_score) => Some(MatchResult {
                    provider,
                    match_score,
                }),
                Err(e) => {
                    tracing::warn!(provider_id = %provider.id, error = %e, "skipping provider");
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| a.provider.id.cmp(&b.provider.id))
        });
        matches.truncate(limit);

        Ok(matches)
    }

    /// Pair providers with their trust scores, most trusted first.
    ///
    /// Ties are ordered by provider id. Providers that cannot be scored are
    /// logged and left out.
    pub fn score_providers<'a, I>(&self, providers: I) -> Vec<ScoredProvider<'a>>
    where
        I: IntoIterator<Item = &'a Provider>,
    {
        let mut scored: Vec<ScoredProvider<'a>> = providers
            .into_iter()
            .filter_map(|provider| match self.compute_trust_score(provider) {
                Ok(trust_score) => Some(ScoredProvider {
                    provider,
                    trust_score,
                    trust_level: TrustLevel::from_score(trust_score),
                }),
                Err(e) => {
                    tracing::warn!(provider_id = %provider.id, error = %e, "skipping provider");
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.trust_score
                .cmp(&a.trust_score)
                .then_with(|| a.provider.id.cmp(&b.provider.id))
        });

        scored
    }

    fn years_in_business(&self, provider: &Provider) -> Result<i32, ScoringError> {
        if provider.founded_year < MIN_FOUNDED_YEAR {
            return Err(ScoringError::invalid_input(
                &provider.id,
                format!(
                    "founded_year {} is before {}",
                    provider.founded_year, MIN_FOUNDED_YEAR
                ),
            ));
        }
        if provider.founded_year > self.reference_year {
            return Err(ScoringError::invalid_input(
                &provider.id,
                format!(
                    "founded_year {} is in the future (reference year {})",
                    provider.founded_year, self.reference_year
                ),
            ));
        }
        Ok(provider.years_in_business(self.reference_year))
    }
}
