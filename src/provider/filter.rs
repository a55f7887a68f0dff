use super::types::{Category, Provider};

/// Simple predicate over provider records, as used by directory listings.
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderFilter {
    pub category: Option<Category>,
    pub language: Option<String>,
    pub verified_only: bool,
    pub featured_only: bool,
    /// Case-insensitive substring over name, id and service identifiers
    pub search: Option<String>,
    /// Lowest trust score to keep. Needs a computed score, so it is checked
    /// by [`ProviderFilter::admits_trust_score`] rather than `matches`.
    pub min_trust_score: Option<u32>,
}

impl ProviderFilter {
    pub fn matches(&self, provider: &Provider) -> bool {
        if self.category.is_some_and(|c| c != provider.category) {
            return false;
        }
        if self.verified_only && !provider.is_verified {
            return false;
        }
        if self.featured_only && !provider.is_featured {
            return false;
        }
        if let Some(ref language) = self.language {
            if !provider.speaks(language) {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let found = provider.name.to_lowercase().contains(&needle)
                    || provider.id.to_lowercase().contains(&needle)
                    || provider
                        .services
                        .iter()
                        .any(|s| s.to_lowercase().contains(&needle));
                if !found {
                    return false;
                }
            }
        }
        true
    }

    pub fn admits_trust_score(&self, trust_score: u32) -> bool {
        self.min_trust_score.map_or(true, |min| trust_score >= min)
    }
}

/// Keep only providers matching the filter, preserving order
pub fn filter_providers<'a, I>(providers: I, filter: &ProviderFilter) -> Vec<&'a Provider>
where
    I: IntoIterator<Item = &'a Provider>,
{
    providers.into_iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::TrustScoreInputs;

    fn create_test_provider(id: &str, name: &str, category: Category) -> Provider {
        Provider {
            id: id.to_string(),
            name: name.to_string(),
            category,
            services: ["srv_trade_license".to_string()].into_iter().collect(),
            languages: ["English".to_string(), "Arabic".to_string()].into_iter().collect(),
            founded_year: 2015,
            response_time_hours: 4.0,
            response_rate_percent: 90.0,
            is_verified: false,
            is_featured: false,
            google_rating: None,
            review_count: 0,
            trust_inputs: TrustScoreInputs::default(),
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let provider = create_test_provider("a", "Alpha", Category::Banking);
        assert!(ProviderFilter::default().matches(&provider));
    }

    #[test]
    fn test_filter_by_category() {
        let providers = vec![
            create_test_provider("a", "Alpha", Category::Banking),
            create_test_provider("b", "Beta", Category::Insurance),
        ];
        let filter = ProviderFilter {
            category: Some(Category::Insurance),
            ..ProviderFilter::default()
        };
        let found = filter_providers(&providers, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b");
    }

    #[test]
    fn test_filter_verified_and_featured() {
        let mut verified = create_test_provider("v", "Verified", Category::Banking);
        verified.is_verified = true;
        let mut featured = create_test_provider("f", "Featured", Category::Banking);
        featured.is_featured = true;
        featured.is_verified = true;
        let plain = create_test_provider("p", "Plain", Category::Banking);
        let providers = vec![verified, featured, plain];

        let filter = ProviderFilter {
            verified_only: true,
            ..ProviderFilter::default()
        };
        assert_eq!(filter_providers(&providers, &filter).len(), 2);

        let filter = ProviderFilter {
            verified_only: true,
            featured_only: true,
            ..ProviderFilter::default()
        };
        let found = filter_providers(&providers, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "f");
    }

    #[test]
    fn test_filter_by_language() {
        let provider = create_test_provider("a", "Alpha", Category::Banking);
        let filter = ProviderFilter {
            language: Some("arabic".to_string()),
            ..ProviderFilter::default()
        };
        assert!(filter.matches(&provider));

        let filter = ProviderFilter {
            language: Some("German".to_string()),
            ..ProviderFilter::default()
        };
        assert!(!filter.matches(&provider));
    }

    #[test]
    fn test_filter_search_name_and_services() {
        let provider = create_test_provider("prov_7", "Gulf Setup Partners", Category::CompanyFormation);

        let by_name = ProviderFilter {
            search: Some("setup".to_string()),
            ..ProviderFilter::default()
        };
        assert!(by_name.matches(&provider));

        let by_service = ProviderFilter {
            search: Some("TRADE_LICENSE".to_string()),
            ..ProviderFilter::default()
        };
        assert!(by_service.matches(&provider));

        let miss = ProviderFilter {
            search: Some("yacht".to_string()),
            ..ProviderFilter::default()
        };
        assert!(!miss.matches(&provider));
    }

    #[test]
    fn test_blank_search_matches_all() {
        let provider = create_test_provider("a", "Alpha", Category::Banking);
        let filter = ProviderFilter {
            search: Some("   ".to_string()),
            ..ProviderFilter::default()
        };
        assert!(filter.matches(&provider));
    }

    #[test]
    fn test_min_trust_score() {
        let filter = ProviderFilter {
            min_trust_score: Some(80),
            ..ProviderFilter::default()
        };
        assert!(filter.admits_trust_score(80));
        assert!(filter.admits_trust_score(95));
        assert!(!filter.admits_trust_score(79));

        // Unset admits everything, including zero
        assert!(ProviderFilter::default().admits_trust_score(0));
    }
}
