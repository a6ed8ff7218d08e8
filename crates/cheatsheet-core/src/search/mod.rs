//! Retrieval strategies over a borrowed [`SheetCollection`].
//!
//! Every call is a pure function of the collection snapshot. The inverted
//! index and the TF-IDF vectorizer are rebuilt per call; nothing is cached.
//! "No match" and "nothing to search" both come back as an empty list.

use tracing::{debug, warn};

use crate::collection::SheetCollection;
use crate::config::{DEFAULT_FUZZY_THRESHOLD, SearchConfig};
#[cfg(feature = "tfidf")]
use crate::index::build_weighted_text;
use crate::index::{InvertedIndex, fuzzy_fields, indexed_fields};
use crate::models::{
    ScoredSheet, SearchCapabilities, SearchOutcome, SearchStrategy, Sheet, StrategyResolution,
};
use crate::text::{contains_ignore_case, tokenize};

mod fuzzy;
mod rank;
#[cfg(feature = "tfidf")]
mod tfidf;


pub use fuzzy::similarity_ratio;

use rank::{into_sheets, rank};
#[cfg(feature = "tfidf")]
use tfidf::{TfidfVectorizer, cosine};

#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    collection: &'a SheetCollection,
    capabilities: SearchCapabilities,
    fuzzy_threshold: f64,
    default_strategy: SearchStrategy,
}

impl<'a> SearchEngine<'a> {
    #[must_use]
    pub fn new(collection: &'a SheetCollection) -> Self {
        Self {
            collection,
            capabilities: SearchCapabilities::compiled(),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            default_strategy: SearchStrategy::Substring,
        }
    }

    #[must_use]
    pub fn with_config(collection: &'a SheetCollection, config: &SearchConfig) -> Self {
        Self {
            collection,
            capabilities: config.capabilities(),
            fuzzy_threshold: config.fuzzy_threshold,
            default_strategy: config.default_strategy,
        }
    }

    /// Narrows to what this build supports; a TF-IDF request on a build
    /// without the `tfidf` feature stays disabled.
    #[must_use]
    pub const fn with_capabilities(mut self, capabilities: SearchCapabilities) -> Self {
        self.capabilities = SearchCapabilities {
            tfidf: capabilities.tfidf && SearchCapabilities::compiled().tfidf,
        };
        self
    }

    #[must_use]
    pub const fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_default_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    #[must_use]
    pub const fn capabilities(&self) -> SearchCapabilities {
        self.capabilities
    }

    #[must_use]
    pub const fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    #[must_use]
    pub const fn default_strategy(&self) -> SearchStrategy {
        self.default_strategy
    }

    /// Maps a requested strategy onto one this engine can run. TF-IDF without
    /// the capability fails closed to substring search.
    #[must_use]
    pub const fn resolve_strategy(&self, requested: SearchStrategy) -> StrategyResolution {
        if self.capabilities.supports(requested) {
            StrategyResolution::Native {
                strategy: requested,
            }
        } else {
            StrategyResolution::Fallback {
                requested,
                used: SearchStrategy::Substring,
            }
        }
    }

    pub fn search(
        &self,
        strategy: SearchStrategy,
        query: &str,
        path_filter: Option<&[String]>,
    ) -> SearchOutcome<'a> {
        let resolution = self.resolve_strategy(strategy);
        if let Some(message) = resolution.warning() {
            warn!(requested = %strategy, used = %resolution.strategy(), "{message}");
        }
        let sheets = match resolution.strategy() {
            SearchStrategy::Substring => self.basic_search(query, path_filter),
            SearchStrategy::FullText => self.full_text_search(query, path_filter),
            SearchStrategy::Fuzzy => into_sheets(self.fuzzy_search_scored(
                query,
                self.fuzzy_threshold,
                path_filter,
            )),
            SearchStrategy::TfIdf => self.semantic_search(query, path_filter),
        };
        SearchOutcome { resolution, sheets }
    }

    /// Runs the configured default strategy.
    pub fn search_default(&self, query: &str, path_filter: Option<&[String]>) -> SearchOutcome<'a> {
        self.search(self.default_strategy, query, path_filter)
    }

    /// Case-insensitive containment against name, categories, keyword path
    /// segments, description and content. Each sheet appears at most once.
    pub fn basic_search(&self, query: &str, path_filter: Option<&[String]>) -> Vec<&'a Sheet> {
        let needle = query.to_lowercase();
        if needle.trim().is_empty() {
            return Vec::new();
        }
        let hits = self
            .candidates(path_filter)
            .filter(|sheet| indexed_fields(sheet).any(|field| contains_ignore_case(field, &needle)))
            .collect::<Vec<_>>();
        trace_hits(SearchStrategy::Substring, query, hits.len());
        hits
    }

    /// Sheets containing every query token in at least one indexed field, in
    /// collection order.
    pub fn full_text_search(&self, query: &str, path_filter: Option<&[String]>) -> Vec<&'a Sheet> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        let sheets = self.collection.sheets();
        let index = InvertedIndex::build(sheets);
        let filter = active_filter(path_filter);
        let hits = index
            .intersect(&tokens)
            .into_iter()
            .filter_map(|ordinal| sheets.get(ordinal))
            .filter(|sheet| filter.is_none_or(|prefix| sheet.is_under(prefix)))
            .collect::<Vec<_>>();
        debug!(
            strategy = %SearchStrategy::FullText,
            terms = index.term_count(),
            query_tokens = tokens.len(),
            hits = hits.len(),
            "search completed"
        );
        hits
    }

    /// Sheets whose name, a category or a keyword path segment is at least
    /// `threshold` similar to the query, best match first.
    pub fn fuzzy_search(&self, query: &str, threshold: f64) -> Vec<&'a Sheet> {
        into_sheets(self.fuzzy_search_scored(query, threshold, None))
    }

    pub fn fuzzy_search_scored(
        &self,
        query: &str,
        threshold: f64,
        path_filter: Option<&[String]>,
    ) -> Vec<ScoredSheet<'a>> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();
        let scored = self
            .candidates(path_filter)
            .filter_map(|sheet| {
                let score = fuzzy_fields(sheet)
                    .map(|field| similarity_ratio(&query, &field.to_lowercase()))
                    .fold(0.0f64, f64::max);
                (score >= threshold).then_some(ScoredSheet { sheet, score })
            })
            .collect::<Vec<_>>();
        let ranked = rank(scored);
        trace_hits(SearchStrategy::Fuzzy, &query, ranked.len());
        ranked
    }

    /// TF-IDF ranking over the candidates. Falls back to substring search
    /// when the capability is unavailable.
    pub fn semantic_search(&self, query: &str, path_filter: Option<&[String]>) -> Vec<&'a Sheet> {
        #[cfg(feature = "tfidf")]
        if self.capabilities.tfidf {
            return into_sheets(self.semantic_search_scored(query, path_filter));
        }
        if let Some(message) = self.resolve_strategy(SearchStrategy::TfIdf).warning() {
            warn!("{message}");
        }
        self.basic_search(query, path_filter)
    }

    /// Scored TF-IDF ranking. Zero-similarity sheets are dropped.
    #[cfg(feature = "tfidf")]
    pub fn semantic_search_scored(
        &self,
        query: &str,
        path_filter: Option<&[String]>,
    ) -> Vec<ScoredSheet<'a>> {
        let candidates = self.candidates(path_filter).collect::<Vec<_>>();
        if candidates.is_empty() {
            return Vec::new();
        }
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let corpus = candidates
            .iter()
            .map(|sheet| build_weighted_text(sheet))
            .collect::<Vec<_>>();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&corpus);
        let query_vector = vectorizer.transform(&query_tokens.join(" "));

        let scored = candidates
            .into_iter()
            .zip(&vectors)
            .map(|(sheet, vector)| ScoredSheet {
                sheet,
                score: cosine(&query_vector, vector),
            })
            .filter(|hit| hit.score != 0.0)
            .collect::<Vec<_>>();
        let ranked = rank(scored);
        debug!(
            strategy = %SearchStrategy::TfIdf,
            corpus = corpus.len(),
            hits = ranked.len(),
            "search completed"
        );
        ranked
    }

    /// Sheets under the filter prefix, or every sheet when there is no
    /// filter. An empty filter counts as no filter.
    fn candidates(
        &self,
        path_filter: Option<&[String]>,
    ) -> impl Iterator<Item = &'a Sheet> + use<'a> {
        let filter = active_filter(path_filter).map(<[String]>::to_vec);
        self.collection
            .sheets()
            .iter()
            .filter(move |sheet| filter.as_deref().is_none_or(|prefix| sheet.is_under(prefix)))
    }
}

fn active_filter(path_filter: Option<&[String]>) -> Option<&[String]> {
    path_filter.filter(|prefix| !prefix.is_empty())
}

fn trace_hits(strategy: SearchStrategy, query: &str, hits: usize) {
    debug!(strategy = %strategy, query_len = query.chars().count(), hits, "search completed");
}
