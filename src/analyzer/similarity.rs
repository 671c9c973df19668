//! Similarity Engine
//!
//! TF-IDF vectors over a single file's comment corpus and pairwise cosine
//! similarity between them. Every call builds its own vocabulary and IDF
//! table from the texts it is given; nothing is shared between calls.
//!
//! Weighting:
//! - tokens are runs of two or more word characters
//! - `tf` is the raw term count
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
//! - each vector is L2-normalized, so cosine similarity is a dot product

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::types::DuplicatePair;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Sparse, L2-normalized term vector sorted by term index
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF representation of a corpus.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    rows: Vec<SparseVector>,
}

impl TfIdfMatrix {
    /// Fit the vocabulary and IDF weights on `texts` and vectorize them.
    ///
    /// Returns `None` when no text contains a single token, since such a
    /// corpus carries no similarity information.
    pub fn fit_transform<S: AsRef<str>>(texts: &[S]) -> Option<Self> {
        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t.as_ref())).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for tokens in &tokenized {
            let mut seen: Vec<usize> = Vec::with_capacity(tokens.len());
            for token in tokens {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(token.clone()).or_insert(next);
                if idx == doc_freq.len() {
                    doc_freq.push(0);
                }
                if !seen.contains(&idx) {
                    seen.push(idx);
                    doc_freq[idx] += 1;
                }
            }
        }

        if vocabulary.is_empty() {
            return None;
        }

        let n = tokenized.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
                for token in tokens {
                    if let Some(&idx) = vocabulary.get(token) {
                        *counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
                let mut row: SparseVector = counts
                    .into_iter()
                    .map(|(idx, tf)| (idx, tf * idf[idx]))
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        Some(Self { rows })
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cosine similarity between documents `i` and `j`
    pub fn cosine(&self, i: usize, j: usize) -> f64 {
        match (self.rows.get(i), self.rows.get(j)) {
            (Some(a), Some(b)) => sparse_dot(a, b),
            _ => 0.0,
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

fn l2_normalize(row: &mut SparseVector) {
    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= norm;
        }
    }
}

fn sparse_dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    dot
}

/// Duplicate decision for one similarity score (strictly greater than).
#[inline]
pub fn exceeds_threshold(similarity: f64, threshold: f64) -> bool {
    similarity > threshold
}

/// Index pairs `(i, j)`, `i < j`, whose texts are near-duplicates.
///
/// Corpora of zero or one text are never vectorized.
pub fn find_duplicate_indices<S: AsRef<str>>(normalized: &[S], threshold: f64) -> Vec<(usize, usize)> {
    if normalized.len() < 2 {
        return Vec::new();
    }

    let Some(matrix) = TfIdfMatrix::fit_transform(normalized) else {
        tracing::debug!(
            "No tokens in {} comments, skipping similarity",
            normalized.len()
        );
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for i in 0..matrix.len() {
        for j in (i + 1)..matrix.len() {
            if exceeds_threshold(matrix.cosine(i, j), threshold) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Near-duplicate pairs reported with their original texts.
///
/// `originals[k]` must be the source text whose normalized form is
/// `normalized[k]`.
pub fn find_duplicates<O, N>(originals: &[O], normalized: &[N], threshold: f64) -> Vec<DuplicatePair>
where
    O: AsRef<str>,
    N: AsRef<str>,
{
    debug_assert_eq!(originals.len(), normalized.len());

    find_duplicate_indices(normalized, threshold)
        .into_iter()
        .filter_map(|(i, j)| {
            let a = originals.get(i)?;
            let b = originals.get(j)?;
            Some(DuplicatePair::new(a.as_ref(), b.as_ref()))
        })
        .collect()
}
