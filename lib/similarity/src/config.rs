//! Pipeline configuration
//!
//! Defaults for matching and ranking. Individual queries may override the
//! threshold and result count; weights and the vocabulary cap are fixed per
//! process.

use serde::{Deserialize, Serialize};
use vendorq_core::DEFAULT_MAX_FEATURES;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Minimum cosine similarity for a capability-feature match (inclusive)
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,

    /// Weight of the averaged similarity in the rank score
    #[serde(default = "default_feature_weight")]
    pub feature_weight: f64,

    /// Weight of the normalized rating in the rank score
    #[serde(default = "default_rating_weight")]
    pub rating_weight: f64,

    /// Vocabulary cap of the TF-IDF space
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_feature_weight() -> f64 {
    0.7
}

fn default_rating_weight() -> f64 {
    0.3
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

fn default_top_n() -> usize {
    10
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_threshold(),
            feature_weight: default_feature_weight(),
            rating_weight: default_rating_weight(),
            max_features: default_max_features(),
            top_n: default_top_n(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration.
    ///
    /// Weights must be finite and non-negative but need not sum to 1; they are
    /// never re-normalized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.similarity_threshold)?;

        for (name, weight) in [("feature_weight", self.feature_weight), ("rating_weight", self.rating_weight)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight(name, weight));
            }
        }

        if self.max_features == 0 {
            return Err(ConfigError::ZeroMaxFeatures);
        }
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }

        Ok(())
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), ConfigError> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange(threshold))
    }
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Similarity threshold {0} must be within [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("Weight '{0}' must be finite and non-negative, got {1}")]
    InvalidWeight(&'static str, f64),

    #[error("max_features must be positive")]
    ZeroMaxFeatures,

    #[error("top_n must be positive")]
    ZeroTopN,
}

impl From<ConfigError> for vendorq_core::Error {
    fn from(e: ConfigError) -> Self {
        vendorq_core::Error::InvalidConfig(e.to_string())
    }
}
