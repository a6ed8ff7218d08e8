use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{ScoredSheet, Sheet};

/// Descending by score. Incomparable scores count as equal so the stable
/// sort keeps enumeration order for them.
pub(super) fn score_ordering(a: &ScoredSheet<'_>, b: &ScoredSheet<'_>) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Stable descending sort; the first (best) entry per sheet name wins.
pub(super) fn rank(mut scored: Vec<ScoredSheet<'_>>) -> Vec<ScoredSheet<'_>> {
    scored.sort_by(score_ordering);
    let mut seen = HashSet::with_capacity(scored.len());
    scored.retain(|hit| seen.insert(hit.sheet.name.as_str()));
    scored
}

pub(super) fn into_sheets<'a>(scored: Vec<ScoredSheet<'a>>) -> Vec<&'a Sheet> {
    scored.into_iter().map(|hit| hit.sheet).collect()
}
