//! Inverted index over a sheet slice.
//!
//! Built fresh for each full-text query and thrown away afterwards, so it
//! never goes stale. Posting lists hold sheet ordinals (positions in the
//! slice the index was built from) in ascending order.

use std::collections::HashMap;

use crate::models::Sheet;
use crate::text::tokenize;

mod text_assembly;

#[cfg(feature = "tfidf")]
pub(crate) use text_assembly::build_weighted_text;
pub(crate) use text_assembly::{fuzzy_fields, indexed_fields};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    ordinals: Vec<usize>,
}

impl PostingList {
    fn add(&mut self, ordinal: usize) {
        // Ordinals arrive in ascending order; repeats come from one sheet.
        if self.ordinals.last() != Some(&ordinal) {
            self.ordinals.push(ordinal);
        }
    }

    #[must_use]
    pub fn ordinals(&self) -> &[usize] {
        &self.ordinals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    #[must_use]
    pub fn contains(&self, ordinal: usize) -> bool {
        self.ordinals.binary_search(&ordinal).is_ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, PostingList>,
    total_docs: usize,
}

impl InvertedIndex {
    /// Indexes name, categories, keyword path segments, description and
    /// content of every sheet with the same tokenizer and no field weights.
    #[must_use]
    pub fn build(sheets: &[Sheet]) -> Self {
        let mut postings = HashMap::<String, PostingList>::new();
        for (ordinal, sheet) in sheets.iter().enumerate() {
            for field in indexed_fields(sheet) {
                for token in tokenize(field) {
                    postings.entry(token).or_default().add(ordinal);
                }
            }
        }
        Self {
            postings,
            total_docs: sheets.len(),
        }
    }

    #[must_use]
    pub fn lookup(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    #[must_use]
    pub fn doc_freq(&self, term: &str) -> usize {
        self.lookup(term).map_or(0, PostingList::len)
    }

    #[must_use]
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    #[must_use]
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Ordinals of sheets containing every term, ascending.
    ///
    /// Empty as soon as one term is missing from the index, and empty for an
    /// empty term list.
    #[must_use]
    pub fn intersect<S: AsRef<str>>(&self, terms: &[S]) -> Vec<usize> {
        let mut lists = Vec::with_capacity(terms.len());
        for term in terms {
            let Some(list) = self.lookup(term.as_ref()) else {
                return Vec::new();
            };
            lists.push(list);
        }
        lists.sort_by_key(|list| list.len());
        let Some((smallest, rest)) = lists.split_first() else {
            return Vec::new();
        };
        smallest
            .ordinals()
            .iter()
            .copied()
            .filter(|ordinal| rest.iter().all(|list| list.contains(*ordinal)))
            .collect()
    }
}
