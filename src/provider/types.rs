use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Service categories offered in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    CompanyFormation,
    LegalConsulting,
    Accounting,
    Insurance,
    Banking,
    Relocation,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::CompanyFormation,
        Category::LegalConsulting,
        Category::Accounting,
        Category::Insurance,
        Category::Banking,
        Category::Relocation,
    ];

    /// Kebab-case identifier, as used in JSON and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CompanyFormation => "company-formation",
            Category::LegalConsulting => "legal-consulting",
            Category::Accounting => "accounting",
            Category::Insurance => "insurance",
            Category::Banking => "banking",
            Category::Relocation => "relocation",
        }
    }

    /// Map a free-text category label from scraped source data
    /// (e.g. "Business Formation Services", "VAT Registration") onto a category.
    pub fn from_source_label(label: &str) -> Option<Category> {
        let label = label.trim().to_ascii_lowercase();
        let category = match label.as_str() {
            "business formation" | "company formation" | "business formation services" => {
                Category::CompanyFormation
            }
            "legal services" | "legal consultation" | "corporate law" => Category::LegalConsulting,
            "vat registration" | "tax consulting" | "accounting services" | "bookkeeping" => {
                Category::Accounting
            }
            "insurance services" => Category::Insurance,
            "banking services" => Category::Banking,
            "relocation services" => Category::Relocation,
            other => return other.parse().ok(),
        };
        Some(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Raw signals the trust score is computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreInputs {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Trade license or registration number
    #[serde(default)]
    pub license_number: Option<String>,
    /// Legal form, e.g. "LLC" or "Free Zone Company"
    #[serde(default)]
    pub legal_form: Option<String>,
    /// Completeness score (0-100) supplied by ingestion
    #[serde(default)]
    pub data_quality: Option<u8>,
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Social network profile URLs
    #[serde(default)]
    pub social_profiles: Vec<String>,
}

/// A provider record as delivered by ingestion. Never mutated by scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub services: BTreeSet<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    pub founded_year: i32,
    pub response_time_hours: f64,
    pub response_rate_percent: f64,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_featured: bool,
    /// None means "no reviews yet"
    #[serde(default)]
    pub google_rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub trust_inputs: TrustScoreInputs,
}

impl Provider {
    /// Whole years between founding and `reference_year`.
    /// Negative when the founding year lies in the future.
    pub fn years_in_business(&self, reference_year: i32) -> i32 {
        reference_year - self.founded_year
    }

    /// True when `language` is one of the provider's languages. The
    /// comparison ignores ASCII case and surrounding whitespace, so "arabic"
    /// matches "Arabic".
    pub fn speaks(&self, language: &str) -> bool {
        let language = language.trim();
        self.languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language))
    }

    pub fn offers(&self, service: &str) -> bool {
        self.services.contains(service)
    }
}
