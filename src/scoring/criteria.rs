use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::ScoringError;
use crate::provider::Category;

/// How quickly the searcher needs a provider to respond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeline {
    Urgent,
    Fast,
    #[default]
    Normal,
    Flexible,
}

impl FromStr for Timeline {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Ok(Timeline::Urgent),
            "fast" => Ok(Timeline::Fast),
            "normal" => Ok(Timeline::Normal),
            "flexible" => Ok(Timeline::Flexible),
            other => Err(ScoringError::InvalidArgument(format!(
                "unknown timeline '{}' (expected urgent, fast, normal or flexible)",
                other
            ))),
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeline::Urgent => "urgent",
            Timeline::Fast => "fast",
            Timeline::Normal => "normal",
            Timeline::Flexible => "flexible",
        };
        f.write_str(s)
    }
}

/// Minimum tenure the searcher expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    #[default]
    Any,
    Experienced,
    Senior,
}

impl FromStr for ExperienceLevel {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(ExperienceLevel::Any),
            "experienced" => Ok(ExperienceLevel::Experienced),
            "senior" => Ok(ExperienceLevel::Senior),
            other => Err(ScoringError::InvalidArgument(format!(
                "unknown experience level '{}' (expected any, experienced or senior)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExperienceLevel::Any => "any",
            ExperienceLevel::Experienced => "experienced",
            ExperienceLevel::Senior => "senior",
        };
        f.write_str(s)
    }
}

/// What a single search is looking for. Built per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchCriteria {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub required_services: BTreeSet<String>,
    /// Preferred language, matched against the provider's languages
    /// ignoring ASCII case (see [`Provider::speaks`](crate::provider::Provider::speaks))
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
}
