use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::taxonomy::is_prefix;

/// A single cheat sheet.
///
/// `name` is the identity of a sheet inside a collection. `keyword_path` is
/// root-first and, when present, never empty; sheets without one are legacy
/// entries that only carry flat `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_path: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Sheet {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now();
        Self {
            name: name.into(),
            content: content.into(),
            categories: Vec::new(),
            keyword_path: None,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_keyword_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword_path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn keyword_path(&self) -> Option<&[String]> {
        self.keyword_path.as_deref()
    }

    /// Sheets without a keyword path never match, not even the empty prefix.
    #[must_use]
    pub fn is_under(&self, prefix: &[String]) -> bool {
        self.keyword_path()
            .is_some_and(|path| is_prefix(prefix, path))
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = now();
    }
}

/// Local wall-clock time at microsecond precision, the finest the stored
/// timestamp format carries.
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

#[must_use]
pub fn is_valid_sheet_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
