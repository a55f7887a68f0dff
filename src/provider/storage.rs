use super::types::Provider;
use crate::scoring::TrustLevel;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// A provider written out together with its computed trust score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredProvider<'a> {
    #[serde(flatten)]
    pub provider: &'a Provider,
    pub trust_score: u32,
    pub trust_level: TrustLevel,
}

/// A record in a provider file that could not be read as a provider
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position in the JSON array, starting at 0
    pub index: usize,
    pub id: Option<String>,
    pub error: String,
}

/// Everything read from a provider file: usable records and the ones skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderFile {
    pub providers: Vec<Provider>,
    pub rejected: Vec<RejectedRecord>,
}

/// Read a JSON array of provider records record by record.
///
/// The file as a whole must be a JSON array. A record that does not fit the
/// provider model (unknown category, missing field, wrong type) is reported
/// in `rejected` and does not affect the others.
pub fn read_provider_file(path: &Path) -> Result<ProviderFile> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open provider file at {}", path.display()))?;

    let records: Vec<Value> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse providers: invalid JSON in {}", path.display()))?;

    let mut loaded = ProviderFile::default();
    for (index, record) in records.into_iter().enumerate() {
        let id = record.get("id").and_then(Value::as_str).map(str::to_string);
        match serde_json::from_value::<Provider>(record) {
            Ok(provider) => loaded.providers.push(provider),
            Err(e) => loaded.rejected.push(RejectedRecord {
                index,
                id,
                error: e.to_string(),
            }),
        }
    }

    Ok(loaded)
}

/// Load provider records from a JSON file, logging and skipping any record
/// that cannot be read
pub fn load_providers(path: &Path) -> Result<Vec<Provider>> {
    let loaded = read_provider_file(path)?;
    for rejected in &loaded.rejected {
        tracing::warn!(
            index = rejected.index,
            provider_id = rejected.id.as_deref().unwrap_or("-"),
            error = %rejected.error,
            "skipping unreadable provider record"
        );
    }
    Ok(loaded.providers)
}

/// Save scored providers to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if
/// it doesn't exist.
pub fn save_scored_providers(path: &Path, scored: &[ScoredProvider]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, scored).context("Failed to serialize scored providers")?;

    file.commit().context("Failed to save scored providers")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Category, TrustScoreInputs};
    use std::env;

    fn sample_provider(id: &str) -> Provider {
        Provider {
            id: id.to_string(),
            name: "Gulf Setup".to_string(),
            category: Category::CompanyFormation,
            services: ["srv_company_formation".to_string()].into_iter().collect(),
            languages: ["English".to_string()].into_iter().collect(),
            founded_year: 2016,
            response_time_hours: 2.0,
            response_rate_percent: 97.0,
            is_verified: true,
            is_featured: true,
            google_rating: Some(4.6),
            review_count: 88,
            trust_inputs: TrustScoreInputs {
                website: Some("gulfsetup.ae".to_string()),
                ..TrustScoreInputs::default()
            },
        }
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_path = env::temp_dir().join("trustup24_test_missing_providers.json");
        let _ = std::fs::remove_file(&temp_path);

        let err = load_providers(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Failed to open provider file"));
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let temp_path = env::temp_dir().join("trustup24_test_invalid_providers.json");
        std::fs::write(&temp_path, "{ not json").unwrap();

        let err = load_providers(&temp_path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_not_an_array_fails() {
        let temp_path = env::temp_dir().join("trustup24_test_object_providers.json");
        std::fs::write(&temp_path, r#"{"id": "prov_1"}"#).unwrap();

        let err = load_providers(&temp_path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_bad_record_does_not_drop_good_ones() {
        let temp_path = env::temp_dir().join("trustup24_test_mixed_providers.json");
        let good = serde_json::to_value(sample_provider("prov_1")).unwrap();
        let contents = serde_json::json!([
            good,
            {
                "id": "prov_plumber",
                "name": "Pipe Works",
                "category": "plumbing",
                "founded_year": 2010,
                "response_time_hours": 2.0,
                "response_rate_percent": 90.0
            },
            {
                "id": "prov_no_year",
                "name": "Ageless",
                "category": "banking",
                "response_time_hours": 2.0,
                "response_rate_percent": 90.0
            },
            "not a record"
        ]);
        std::fs::write(&temp_path, contents.to_string()).unwrap();

        let loaded = read_provider_file(&temp_path).unwrap();
        assert_eq!(loaded.providers, vec![sample_provider("prov_1")]);

        let rejected: Vec<(usize, Option<&str>)> = loaded
            .rejected
            .iter()
            .map(|r| (r.index, r.id.as_deref()))
            .collect();
        assert_eq!(
            rejected,
            vec![(1, Some("prov_plumber")), (2, Some("prov_no_year")), (3, None)]
        );
        assert!(loaded.rejected[0].error.contains("plumbing"));
        assert!(loaded.rejected[1].error.contains("founded_year"));

        let providers = load_providers(&temp_path).unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].id, "prov_1");

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("trustup24_test_scored_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let providers = vec![sample_provider("prov_1"), sample_provider("prov_2")];
        let scored: Vec<ScoredProvider> = providers
            .iter()
            .map(|provider| ScoredProvider {
                provider,
                trust_score: 88,
                trust_level: TrustLevel::VeryGood,
            })
            .collect();

        save_scored_providers(&temp_path, &scored).unwrap();

        // Scored output stays loadable as plain provider records
        let loaded = load_providers(&temp_path).unwrap();
        assert_eq!(loaded, providers);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&temp_path).unwrap()).unwrap();
        assert_eq!(raw[0]["trust_score"], 88);
        assert_eq!(raw[0]["trust_level"], "very-good");

        let _ = std::fs::remove_file(&temp_path);
    }
}
