use std::collections::HashSet;

use super::filter::{filter_providers, ProviderFilter};
use super::types::{Category, Provider};

/// Read-only source of provider records.
pub trait ProviderStore {
    fn get_by_id(&self, id: &str) -> Option<&Provider>;

    fn list_by_category(&self, category: Category) -> Vec<&Provider>;

    fn list_all(&self) -> Vec<&Provider>;

    fn filter(&self, filter: &ProviderFilter) -> Vec<&Provider> {
        filter_providers(self.list_all(), filter)
    }

    /// Number of providers in every category, in category order.
    /// Categories without providers are reported with zero.
    fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.list_by_category(category).len()))
            .collect()
    }
}

/// Provider store backed by a vector loaded up front.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderStore {
    providers: Vec<Provider>,
}

impl InMemoryProviderStore {
    /// Build a store, dropping records whose id was already seen.
    /// The first record for an id wins and input order is kept.
    pub fn new(providers: Vec<Provider>) -> Self {
        let mut seen_ids = HashSet::new();
        let providers: Vec<Provider> = providers
            .into_iter()
            .filter(|p| {
                let fresh = seen_ids.insert(p.id.clone());
                if !fresh {
                    tracing::warn!(provider_id = %p.id, "dropping duplicate provider record");
                }
                fresh
            })
            .collect();
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ProviderStore for InMemoryProviderStore {
    fn get_by_id(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    fn list_by_category(&self, category: Category) -> Vec<&Provider> {
        self.providers
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    fn list_all(&self) -> Vec<&Provider> {
        self.providers.iter().collect()
    }
}
