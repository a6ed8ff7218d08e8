use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CheatsheetError, Result, display_path};
use crate::models::{KeywordEntry, Sheet, is_valid_sheet_name};
use crate::taxonomy::{NodeId, Taxonomy, is_prefix, trim_keyword};

/// Ordered sheets plus the keyword taxonomy they are filed under.
///
/// Every sheet with a keyword path resolves to a chain of taxonomy nodes.
/// Deserializing repairs stored data that breaks this by adding the missing
/// paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCollection")]
pub struct SheetCollection {
    cheatsheets: Vec<Sheet>,
    keyword_taxonomy: Taxonomy,
}

#[derive(Deserialize)]
struct StoredCollection {
    #[serde(default)]
    cheatsheets: Vec<Sheet>,
    #[serde(default)]
    keyword_taxonomy: Taxonomy,
}

impl From<StoredCollection> for SheetCollection {
    fn from(stored: StoredCollection) -> Self {
        Self::from_parts(stored.cheatsheets, stored.keyword_taxonomy)
    }
}

impl SheetCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parts(cheatsheets: Vec<Sheet>, mut keyword_taxonomy: Taxonomy) -> Self {
        for path in cheatsheets.iter().filter_map(Sheet::keyword_path) {
            keyword_taxonomy.ensure_path_exists(path);
        }
        Self {
            cheatsheets,
            keyword_taxonomy,
        }
    }

    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.cheatsheets
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.keyword_taxonomy
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sheet> {
        self.cheatsheets.iter().find(|sheet| sheet.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cheatsheets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cheatsheets.is_empty()
    }

    /// Appends `sheet`, filing its keyword path into the taxonomy. Keyword
    /// segments are trimmed the same way [`Self::rename_keyword`] trims the
    /// new keyword.
    pub fn insert(&mut self, mut sheet: Sheet) -> Result<()> {
        if !is_valid_sheet_name(&sheet.name) {
            return Err(CheatsheetError::InvalidName(sheet.name));
        }
        if self.get(&sheet.name).is_some() {
            return Err(CheatsheetError::Conflict(format!(
                "sheet {} already exists",
                sheet.name
            )));
        }
        if let Some(path) = sheet.keyword_path.as_mut() {
            for segment in path.iter_mut() {
                *segment = trim_keyword(segment);
            }
        }
        if let Some(path) = sheet.keyword_path() {
            if path.is_empty() {
                return Err(CheatsheetError::Validation(format!(
                    "sheet {} has an empty keyword path",
                    sheet.name
                )));
            }
            if path.iter().any(String::is_empty) {
                return Err(CheatsheetError::Validation(format!(
                    "sheet {} has a blank keyword in {}",
                    sheet.name,
                    display_path(path)
                )));
            }
            self.keyword_taxonomy.ensure_path_exists(path);
        }
        self.cheatsheets.push(sheet);
        Ok(())
    }

    /// Removes and returns the named sheet. Keywords it used stay in the
    /// taxonomy.
    pub fn remove(&mut self, name: &str) -> Result<Sheet> {
        let position = self
            .cheatsheets
            .iter()
            .position(|sheet| sheet.name == name)
            .ok_or_else(|| CheatsheetError::NotFound(format!("sheet {name}")))?;
        Ok(self.cheatsheets.remove(position))
    }

    pub fn ensure_path_exists<S: AsRef<str>>(&mut self, path: &[S]) -> NodeId {
        let path = path
            .iter()
            .map(|segment| trim_keyword(segment.as_ref()))
            .collect::<Vec<_>>();
        self.keyword_taxonomy.ensure_path_exists(&path)
    }

    #[must_use]
    pub fn get_keyword_children<S: AsRef<str>>(&self, path: &[S]) -> Vec<String> {
        self.keyword_taxonomy.get_children(path)
    }

    /// Child keywords of `path`, optionally with the number of sheets filed
    /// at or below each child.
    #[must_use]
    pub fn list_keywords<S: AsRef<str>>(&self, path: &[S], with_counts: bool) -> Vec<KeywordEntry> {
        let base = path
            .iter()
            .map(|segment| segment.as_ref().to_string())
            .collect::<Vec<_>>();
        self.keyword_taxonomy
            .get_children(&base)
            .into_iter()
            .map(|keyword| {
                let sheet_count = with_counts.then(|| {
                    let mut child_path = base.clone();
                    child_path.push(keyword.clone());
                    self.cheatsheets
                        .iter()
                        .filter(|sheet| sheet.is_under(&child_path))
                        .count()
                });
                KeywordEntry {
                    keyword,
                    sheet_count,
                }
            })
            .collect()
    }

    /// Sheets filed exactly at `path`, or at or below it when `exact` is false.
    #[must_use]
    pub fn search_by_keyword_path<S: AsRef<str>>(&self, path: &[S], exact: bool) -> Vec<&Sheet> {
        self.cheatsheets
            .iter()
            .filter(|sheet| {
                sheet.keyword_path().is_some_and(|own| {
                    if exact {
                        own.len() == path.len() && is_prefix(path, own)
                    } else {
                        is_prefix(path, own)
                    }
                })
            })
            .collect()
    }

    /// Renames the keyword at `path` and rewrites the matching segment of
    /// every sheet filed under it. Returns the number of sheets rewritten.
    pub fn rename_keyword<S: AsRef<str>>(&mut self, path: &[S], new_keyword: &str) -> Result<usize> {
        let path = path
            .iter()
            .map(|segment| segment.as_ref().to_string())
            .collect::<Vec<_>>();
        self.keyword_taxonomy.rename_node(&path, new_keyword)?;
        let new_keyword = trim_keyword(new_keyword);
        let depth = path.len() - 1;
        if path[depth] == new_keyword {
            return Ok(0);
        }

        let mut rewritten = 0;
        for sheet in &mut self.cheatsheets {
            if let Some(own) = sheet.keyword_path.as_mut()
                && is_prefix(&path, own.as_slice())
            {
                own[depth].clone_from(&new_keyword);
                sheet.touch();
                rewritten += 1;
            }
        }
        info!(
            path = %display_path(&path),
            new_keyword = %new_keyword,
            rewritten,
            "keyword renamed"
        );
        Ok(rewritten)
    }

    /// Merges the keyword at `source` into `target` and refiles every sheet
    /// under `source`. Returns the number of sheets rewritten.
    pub fn merge_keywords<A, B>(&mut self, source: &[A], target: &[B]) -> Result<usize>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let source = source
            .iter()
            .map(|segment| segment.as_ref().to_string())
            .collect::<Vec<_>>();
        let target = target
            .iter()
            .map(|segment| segment.as_ref().to_string())
            .collect::<Vec<_>>();
        self.keyword_taxonomy.merge_nodes(&source, &target)?;

        let mut rewritten = 0;
        for sheet in &mut self.cheatsheets {
            if let Some(own) = sheet.keyword_path.as_mut()
                && is_prefix(&source, own.as_slice())
            {
                let mut refiled = target.clone();
                refiled.extend_from_slice(&own[source.len()..]);
                *own = refiled;
                sheet.touch();
                rewritten += 1;
            }
        }
        for path in self.cheatsheets.iter().filter_map(Sheet::keyword_path) {
            self.keyword_taxonomy.ensure_path_exists(path);
        }
        info!(
            source = %display_path(&source),
            target = %display_path(&target),
            rewritten,
            "keyword merged"
        );
        Ok(rewritten)
    }
}
