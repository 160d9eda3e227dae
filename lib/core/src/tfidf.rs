//! TF-IDF vector space
//!
//! A [`TfidfVectorizer`] is fitted on one corpus and holds the vocabulary and
//! idf weights for that corpus only. Callers build a fresh one per query; the
//! vocabulary depends on both the query strings and the candidate texts.
//!
//! Weighting:
//! - tf is the raw term count in the document
//! - `idf = ln((1 + n) / (1 + df)) + 1`
//! - each document vector is L2-normalized, so cosine similarity reduces to a
//!   dot product

use crate::text::analyze;
use crate::vector::SparseVector;
use ahash::{AHashMap, AHashSet};
use thiserror::Error;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("empty vocabulary; documents contain only stop words or no tokens")]
    EmptyVocabulary,

    #[error("max_features must be positive")]
    ZeroMaxFeatures,
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term -> dimension, dimensions assigned in lexicographic term order
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit a vocabulary and idf weights on `documents`.
    ///
    /// Keeps at most `max_features` terms, chosen by total count across the
    /// corpus; equal counts are resolved in lexicographic term order.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Result<Self, VectorizeError> {
        if max_features == 0 {
            return Err(VectorizeError::ZeroMaxFeatures);
        }

        let n = documents.len() as f64;
        let mut term_counts: AHashMap<String, u64> = AHashMap::new();
        let mut doc_freq: AHashMap<String, u64> = AHashMap::new();

        for doc in documents {
            let terms = analyze(doc.as_ref());
            let mut seen: AHashSet<&str> = AHashSet::new();
            for term in &terms {
                *term_counts.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let mut ranked: Vec<(String, u64)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(dim, term)| (term, dim))
            .collect();

        Ok(Self { vocabulary, idf })
    }

    /// L2-normalized tf-idf vector for `text`. Out-of-vocabulary terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut tf: AHashMap<usize, f64> = AHashMap::new();
        for term in analyze(text) {
            if let Some(&dim) = self.vocabulary.get(&term) {
                *tf.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let entries = tf
            .into_iter()
            .map(|(dim, count)| (dim, count * self.idf[dim]))
            .collect();
        SparseVector::new(entries).normalized()
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    #[inline]
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    pub fn dimension_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.dimension_of(term).map(|dim| self.idf[dim])
    }
}

/// Cosine similarity matrix between `queries` and `documents`.
///
/// Fits one vector space over the union of both lists (queries first) and
/// returns a `queries.len() x documents.len()` matrix. Empty inputs yield an
/// empty matrix.
pub fn similarity_matrix<Q: AsRef<str>, D: AsRef<str>>(
    queries: &[Q],
    documents: &[D],
    max_features: usize,
) -> Result<Vec<Vec<f64>>, VectorizeError> {
    if queries.is_empty() || documents.is_empty() {
        return Ok(Vec::new());
    }

    let corpus: Vec<&str> = queries
        .iter()
        .map(AsRef::as_ref)
        .chain(documents.iter().map(AsRef::as_ref))
        .collect();
    let vectorizer = TfidfVectorizer::fit(&corpus, max_features)?;

    let query_vectors = vectorizer.transform_all(queries);
    let doc_vectors = vectorizer.transform_all(documents);

    Ok(query_vectors
        .iter()
        .map(|q| doc_vectors.iter().map(|d| q.dot(d).clamp(0.0, 1.0)).collect())
        .collect())
}
