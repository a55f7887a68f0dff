use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Provider JSON file used when `--providers` is not given
    #[serde(default)]
    pub providers: Option<PathBuf>,

    /// Number of matches shown by `rank` (default: 10)
    #[serde(default)]
    pub default_limit: Option<usize>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
providers: /var/lib/trustup24/providers.json
default_limit: 5
scoring:
  use_estimation_floor: true
  default_data_quality: 85
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(
            config.providers,
            Some(PathBuf::from("/var/lib/trustup24/providers.json"))
        );
        assert_eq!(config.default_limit, Some(5));
        let scoring = config.scoring.unwrap();
        assert!(scoring.use_estimation_floor);
        assert_eq!(scoring.default_data_quality, Some(85));
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(result.is_err());
    }
}
