//! TF-IDF vectorizer fitted per query over the candidate corpus.
//!
//! Terms are runs of two or more word characters. Weights are raw counts
//! times the smoothed idf `ln((1 + n) / (1 + df)) + 1`, and every vector is
//! L2-normalised so a dot product is the cosine similarity.

use std::collections::{BTreeMap, HashMap};

use crate::text::is_word_char;

pub(crate) type SparseVector = BTreeMap<usize, f64>;

#[derive(Debug, Clone, Default)]
pub(crate) struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns vocabulary and idf from `corpus` and returns the document
    /// vectors in corpus order.
    pub(crate) fn fit_transform<S: AsRef<str>>(corpus: &[S]) -> (Self, Vec<SparseVector>) {
        let analyzed = corpus
            .iter()
            .map(|doc| analyze(doc.as_ref()))
            .collect::<Vec<_>>();

        let mut vocabulary = HashMap::<String, usize>::new();
        let mut doc_freqs = Vec::<usize>::new();
        for terms in &analyzed {
            let mut seen = Vec::<usize>::new();
            for term in terms {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term.clone()).or_insert(next_id);
                if id == doc_freqs.len() {
                    doc_freqs.push(0);
                }
                if !seen.contains(&id) {
                    seen.push(id);
                    doc_freqs[id] += 1;
                }
            }
        }

        let n = usize_to_f64(corpus.len());
        let idf = doc_freqs
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + usize_to_f64(*df))).ln() + 1.0)
            .collect();
        let vectorizer = Self { vocabulary, idf };
        let vectors = analyzed
            .iter()
            .map(|terms| vectorizer.weigh(terms))
            .collect();
        (vectorizer, vectors)
    }

    /// Projects `text` onto the fitted vocabulary. Unknown terms are ignored.
    pub(crate) fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text))
    }

    #[cfg(test)]
    pub(crate) fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut vector = SparseVector::new();
        for term in terms {
            if let Some(id) = self.vocabulary.get(term) {
                *vector.entry(*id).or_insert(0.0) += 1.0;
            }
        }
        for (id, weight) in &mut vector {
            *weight *= self.idf[*id];
        }
        normalize(&mut vector);
        vector
    }
}

pub(crate) fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(id, weight)| large.get(id).map(|other| weight * other))
        .sum()
}

fn analyze(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|term| term.chars().nth(1).is_some())
        .map(ToString::to_string)
        .collect()
}

fn normalize(vector: &mut SparseVector) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "corpus sizes stay far below f64 mantissa precision"
)]
const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}
