use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CheatsheetError;

use super::Sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    #[default]
    Substring,
    FullText,
    Fuzzy,
    TfIdf,
}

impl SearchStrategy {
    pub const ALL: [Self; 4] = [Self::Substring, Self::FullText, Self::Fuzzy, Self::TfIdf];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::FullText => "full-text",
            Self::Fuzzy => "fuzzy",
            Self::TfIdf => "tf-idf",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = CheatsheetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "basic" | "substring" => Ok(Self::Substring),
            "fulltext" | "full-text" | "full_text" | "index" => Ok(Self::FullText),
            "fuzzy" => Ok(Self::Fuzzy),
            "semantic" | "tfidf" | "tf-idf" => Ok(Self::TfIdf),
            other => Err(CheatsheetError::Validation(format!(
                "unknown search strategy: {other} (expected basic|fulltext|fuzzy|semantic)"
            ))),
        }
    }
}

/// Optional retrieval capabilities, resolved once when an engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchCapabilities {
    pub tfidf: bool,
}

impl SearchCapabilities {
    /// What this build supports, before any configuration is applied.
    #[must_use]
    pub const fn compiled() -> Self {
        Self {
            tfidf: cfg!(feature = "tfidf"),
        }
    }

    #[must_use]
    pub const fn without_tfidf() -> Self {
        Self { tfidf: false }
    }

    #[must_use]
    pub const fn supports(self, strategy: SearchStrategy) -> bool {
        match strategy {
            SearchStrategy::TfIdf => self.tfidf,
            SearchStrategy::Substring | SearchStrategy::FullText | SearchStrategy::Fuzzy => true,
        }
    }
}

impl Default for SearchCapabilities {
    fn default() -> Self {
        Self::compiled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StrategyResolution {
    Native {
        strategy: SearchStrategy,
    },
    Fallback {
        requested: SearchStrategy,
        used: SearchStrategy,
    },
}

impl StrategyResolution {
    #[must_use]
    pub const fn strategy(self) -> SearchStrategy {
        match self {
            Self::Native { strategy } => strategy,
            Self::Fallback { used, .. } => used,
        }
    }

    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// User-facing warning text for a fallback, `None` otherwise.
    #[must_use]
    pub fn warning(self) -> Option<String> {
        match self {
            Self::Native { .. } => None,
            Self::Fallback { requested, used } => Some(format!(
                "{requested} search is not available, falling back to {used} search"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredSheet<'a> {
    pub sheet: &'a Sheet,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    pub resolution: StrategyResolution,
    pub sheets: Vec<&'a Sheet>,
}

impl<'a> SearchOutcome<'a> {
    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        self.resolution.strategy()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_count: Option<usize>,
}
