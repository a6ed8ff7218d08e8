use std::cmp::Ordering;

use serde::Serialize;

use crate::search::similarity_ratio;

use super::Taxonomy;

pub const DEFAULT_SUGGESTION_RATIO: f64 = 0.3;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// A taxonomy path whose last keyword resembles a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSuggestion {
    pub path: Vec<String>,
    pub score: f64,
}

impl Taxonomy {
    /// Every path whose last keyword scores at least `min_ratio` against
    /// `query`, case-insensitively. Best first; ties keep pre-order.
    #[must_use]
    pub fn search_keywords(&self, query: &str, min_ratio: f64) -> Vec<PathSuggestion> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut matches = self
            .all_paths()
            .into_iter()
            .filter_map(|path| {
                let keyword = path.last()?.to_lowercase();
                let score = similarity_ratio(&query, &keyword);
                (score >= min_ratio).then_some(PathSuggestion { path, score })
            })
            .collect::<Vec<_>>();
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        matches
    }

    /// Completion candidates for a partially typed keyword: at most `limit`
    /// of [`Self::search_keywords`].
    #[must_use]
    pub fn suggest_paths(&self, query: &str, min_ratio: f64, limit: usize) -> Vec<Vec<String>> {
        self.search_keywords(query, min_ratio)
            .into_iter()
            .take(limit)
            .map(|suggestion| suggestion.path)
            .collect()
    }
}
