//! Capability to feature matching
//!
//! Scores every requested capability against every candidate feature row in a
//! TF-IDF space built for that call, and keeps the pairs at or above the
//! similarity threshold.

use serde::Serialize;
use std::borrow::Borrow;
use tracing::{debug, info, warn};
use vendorq_core::{similarity_matrix, FlattenedFeatureRow, DEFAULT_MAX_FEATURES};

/// Text used for a feature with neither name nor description
pub const EMPTY_FEATURE_PLACEHOLDER: &str = "unknown feature";

/// A capability matched to one feature row
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureMatch {
    #[serde(rename = "matched_capability")]
    pub capability: String,
    #[serde(flatten)]
    pub row: FlattenedFeatureRow,
    pub similarity_score: f64,
    pub feature_text: String,
}

/// Document text for a feature row: the name twice, then the description
pub fn feature_text(name: &str, description: &str) -> String {
    let combined = format!("{} {} {}", name, name, description);
    let combined = combined.trim();
    if combined.is_empty() {
        EMPTY_FEATURE_PLACEHOLDER.to_string()
    } else {
        combined.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FeatureMatcher {
    similarity_threshold: f64,
    max_features: usize,
}

impl FeatureMatcher {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    #[inline]
    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    /// Similarity matrix of shape `capabilities x feature_texts`.
    ///
    /// Returns an empty matrix when either side is empty. If the vector space
    /// cannot be built the matrix is all zeros.
    pub fn compute_similarity_matrix<C: AsRef<str>, F: AsRef<str>>(
        &self,
        capabilities: &[C],
        feature_texts: &[F],
    ) -> Vec<Vec<f64>> {
        match similarity_matrix(capabilities, feature_texts, self.max_features) {
            Ok(matrix) => matrix,
            Err(e) => {
                warn!("Error computing similarity matrix: {}", e);
                vec![vec![0.0; feature_texts.len()]; capabilities.len()]
            }
        }
    }

    /// Find feature rows matching the capabilities at or above the threshold.
    ///
    /// Matches are sorted by similarity descending; equal scores keep
    /// capability-major, row-minor order.
    pub fn find_matching_features<C, R>(&self, capabilities: &[C], rows: &[R]) -> Vec<FeatureMatch>
    where
        C: AsRef<str>,
        R: Borrow<FlattenedFeatureRow>,
    {
        if capabilities.is_empty() || rows.is_empty() {
            return Vec::new();
        }

        let texts: Vec<String> = rows
            .iter()
            .map(|r| {
                let row = r.borrow();
                feature_text(&row.feature_name, &row.feature_description)
            })
            .collect();

        let matrix = self.compute_similarity_matrix(capabilities, &texts);
        debug!(
            capabilities = capabilities.len(),
            rows = rows.len(),
            "computed similarity matrix"
        );

        let mut matches = Vec::new();
        for (capability, scores) in capabilities.iter().zip(&matrix) {
            for ((row, text), &score) in rows.iter().zip(&texts).zip(scores) {
                if score >= self.similarity_threshold {
                    matches.push(FeatureMatch {
                        capability: capability.as_ref().to_string(),
                        row: row.borrow().clone(),
                        similarity_score: score,
                        feature_text: text.clone(),
                    });
                }
            }
        }

        matches.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

        info!(
            "Found {} feature matches above threshold {}",
            matches.len(),
            self.similarity_threshold
        );
        matches
    }
}

/// Match capabilities against rows with the default vocabulary cap
pub fn match_features<C, R>(capabilities: &[C], rows: &[R], threshold: f64) -> Vec<FeatureMatch>
where
    C: AsRef<str>,
    R: Borrow<FlattenedFeatureRow>,
{
    FeatureMatcher::new(threshold).find_matching_features(capabilities, rows)
}
