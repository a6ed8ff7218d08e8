use crate::error::{CheatsheetError, Result};
use crate::models::{SearchCapabilities, SearchStrategy};

use super::env::{parse_enabled_default_true, parse_unit_f64, read_raw_env};

const ENV_SEARCH_STRATEGY: &str = "CHEATSHEET_SEARCH_STRATEGY";
const ENV_FUZZY_THRESHOLD: &str = "CHEATSHEET_FUZZY_THRESHOLD";
const ENV_TFIDF: &str = "CHEATSHEET_TFIDF";

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub default_strategy: SearchStrategy,
    pub fuzzy_threshold: f64,
    pub tfidf_enabled: bool,
}

impl SearchConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(read_raw_env)
    }

    /// Builds the config from an arbitrary variable source. Unset variables
    /// take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            default_strategy: parse_strategy(lookup(ENV_SEARCH_STRATEGY).as_deref())?,
            fuzzy_threshold: parse_unit_f64(lookup(ENV_FUZZY_THRESHOLD).as_deref())
                .unwrap_or(DEFAULT_FUZZY_THRESHOLD),
            tfidf_enabled: parse_enabled_default_true(lookup(ENV_TFIDF).as_deref()),
        })
    }

    /// Compiled capabilities narrowed by the runtime flag.
    #[must_use]
    pub const fn capabilities(&self) -> SearchCapabilities {
        SearchCapabilities {
            tfidf: SearchCapabilities::compiled().tfidf && self.tfidf_enabled,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_strategy: SearchStrategy::Substring,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            tfidf_enabled: true,
        }
    }
}

fn parse_strategy(raw: Option<&str>) -> Result<SearchStrategy> {
    match raw {
        None => Ok(SearchStrategy::default()),
        Some(value) => value.parse::<SearchStrategy>().map_err(|_| {
            CheatsheetError::Validation(format!(
                "invalid {ENV_SEARCH_STRATEGY}: {} (expected basic|fulltext|fuzzy|semantic)",
                value.trim()
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn search_config_defaults_when_unset() {
        let config = SearchConfig::from_lookup(lookup_from(&[])).expect("default config");
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.default_strategy, SearchStrategy::Substring);
        assert!(config.tfidf_enabled);
    }

    #[test]
    fn search_config_reads_every_variable() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            (ENV_SEARCH_STRATEGY, "semantic"),
            (ENV_FUZZY_THRESHOLD, "0.6"),
            (ENV_TFIDF, "off"),
        ]))
        .expect("config");
        assert_eq!(config.default_strategy, SearchStrategy::TfIdf);
        assert!((config.fuzzy_threshold - 0.6).abs() < f64::EPSILON);
        assert!(!config.tfidf_enabled);
        assert!(!config.capabilities().tfidf);
    }

    #[test]
    fn search_config_rejects_unknown_strategy() {
        let err = SearchConfig::from_lookup(lookup_from(&[(ENV_SEARCH_STRATEGY, "bm25")]))
            .expect_err("unknown strategy");
        assert_eq!(err.code(), "VALIDATION_FAILED");
        assert!(err.to_string().contains(ENV_SEARCH_STRATEGY));
    }

    #[test]
    fn search_config_ignores_out_of_range_threshold() {
        let config = SearchConfig::from_lookup(lookup_from(&[(ENV_FUZZY_THRESHOLD, "7")]))
            .expect("config");
        assert!((config.fuzzy_threshold - DEFAULT_FUZZY_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn capabilities_follow_compiled_features_when_enabled() {
        assert_eq!(
            SearchConfig::default().capabilities(),
            SearchCapabilities::compiled()
        );
    }
}
