// Public fallible APIs in this crate share one concrete error contract (`CheatsheetError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod collection;
pub(crate) mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod search;
pub mod taxonomy;
pub(crate) mod text;

pub use collection::SheetCollection;
pub use config::{DEFAULT_FUZZY_THRESHOLD, SearchConfig};
pub use error::{CheatsheetError, ErrorPayload, Result};
pub use models::{
    KeywordEntry, ScoredSheet, SearchCapabilities, SearchOutcome, SearchStrategy, Sheet,
    StrategyResolution,
};
pub use search::{SearchEngine, similarity_ratio};
pub use taxonomy::{
    DEFAULT_SUGGESTION_LIMIT, DEFAULT_SUGGESTION_RATIO, NodeId, PathSuggestion, Taxonomy,
    is_prefix,
};
pub use text::tokenize;
