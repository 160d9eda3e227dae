//! End-to-end vendor qualification
//!
//! Category filter, capability matching, per-vendor aggregation, rating
//! lookup, ranking and reporting, run in that order against one catalog
//! snapshot. Everything a request computes is local to that request.

use crate::aggregate::aggregate;
use crate::config::{validate_threshold, PipelineConfig};
use crate::explain::RankingSummary;
use crate::matcher::{FeatureMatch, FeatureMatcher};
use crate::rank::{RankedVendor, Ranker};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vendorq_core::{Catalog, CategoryFilter, Error, Result};

/// Maximum number of raw matches echoed back with explanations
pub const DETAILED_MATCHES_LIMIT: usize = 50;

/// A vendor qualification request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualificationQuery {
    /// Case-insensitive substring of `main_category`; empty or `"all"` keeps every row
    pub software_category: String,
    pub capabilities: Vec<String>,
    /// Overrides the configured threshold for this request only
    #[serde(default)]
    pub similarity_threshold: Option<f64>,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub include_explanations: bool,
}

impl QualificationQuery {
    pub fn new<S: Into<String>>(software_category: impl Into<String>, capabilities: Vec<S>) -> Self {
        Self {
            software_category: software_category.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            similarity_threshold: None,
            top_n: None,
            include_explanations: false,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    #[must_use]
    pub fn with_explanations(mut self, include: bool) -> Self {
        self.include_explanations = include;
        self
    }
}

/// Query parameters after defaults are applied
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedQuery {
    pub software_category: String,
    pub capabilities: Vec<String>,
    pub similarity_threshold: f64,
    pub top_n: usize,
    pub include_explanations: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QualifiedVendors {
    pub ranked_vendors: Vec<RankedVendor>,
    pub total_qualified_vendors: usize,
    pub returned_vendors: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchingAnalysis {
    pub total_feature_matches: usize,
    pub capabilities_searched: Vec<String>,
    pub category_searched: String,
    pub similarity_threshold_used: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimilarityMethodology {
    pub description: String,
    pub threshold: f64,
    pub text_processing: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingFormula {
    pub description: String,
    pub formula: String,
}

/// Parameters used, echoed for auditability
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Methodology {
    pub similarity_matching: SimilarityMethodology,
    pub ranking: RankingFormula,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QualificationReport {
    pub query: ResolvedQuery,
    pub results: QualifiedVendors,
    pub matching_analysis: MatchingAnalysis,
    pub ranking_summary: RankingSummary,
    pub methodology: Methodology,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_matches: Option<Vec<FeatureMatch>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoResultAnalysis {
    pub threshold_impact: String,
    pub suggestions: Vec<String>,
}

/// Nothing qualified. Not an error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoResultReport {
    pub query: ResolvedQuery,
    pub message: String,
    pub matching_analysis: MatchingAnalysis,
    pub analysis: NoResultAnalysis,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QualificationOutcome {
    Qualified(QualificationReport),
    NoResult(NoResultReport),
}

impl QualificationOutcome {
    pub fn is_qualified(&self) -> bool {
        matches!(self, QualificationOutcome::Qualified(_))
    }

    /// Ranked vendors, empty for a no-result outcome
    pub fn ranked_vendors(&self) -> &[RankedVendor] {
        match self {
            QualificationOutcome::Qualified(report) => &report.results.ranked_vendors,
            QualificationOutcome::NoResult(_) => &[],
        }
    }
}

/// Runs qualification queries with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct VendorQualifier {
    config: PipelineConfig,
}

impl VendorQualifier {
    /// Create a qualifier after validating `config`
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn ranker(&self) -> Ranker {
        Ranker::new(self.config.feature_weight, self.config.rating_weight)
    }

    /// Apply defaults and validate the per-request overrides
    pub fn resolve(&self, query: &QualificationQuery) -> Result<ResolvedQuery> {
        let similarity_threshold = query
            .similarity_threshold
            .unwrap_or(self.config.similarity_threshold);
        validate_threshold(similarity_threshold).map_err(|e| Error::InvalidQuery(e.to_string()))?;

        let top_n = query.top_n.unwrap_or(self.config.top_n);
        if top_n == 0 {
            return Err(Error::InvalidQuery("top_n must be at least 1".to_string()));
        }

        Ok(ResolvedQuery {
            software_category: query.software_category.clone(),
            capabilities: query.capabilities.clone(),
            similarity_threshold,
            top_n,
            include_explanations: query.include_explanations,
        })
    }

    /// Qualify vendors in `catalog` against `query`.
    ///
    /// Returns `Err` only for an invalid query; finding nothing is
    /// [`QualificationOutcome::NoResult`].
    pub fn qualify(&self, catalog: &Catalog, query: &QualificationQuery) -> Result<QualificationOutcome> {
        let query = self.resolve(query)?;
        info!(
            "Processing vendor qualification query: category '{}', {} capabilities, threshold {}",
            query.software_category,
            query.capabilities.len(),
            query.similarity_threshold
        );

        let filter = CategoryFilter::new(&query.software_category);
        let rows = catalog.rows_in_category(&filter);
        debug!(rows = rows.len(), "category filter applied");

        let matcher = FeatureMatcher::new(query.similarity_threshold)
            .with_max_features(self.config.max_features);
        let matches = matcher.find_matching_features(&query.capabilities, &rows);

        let matching_analysis = MatchingAnalysis {
            total_feature_matches: matches.len(),
            capabilities_searched: query.capabilities.clone(),
            category_searched: query.software_category.clone(),
            similarity_threshold_used: matcher.similarity_threshold(),
        };

        let mut vendors = aggregate(&matches);
        if vendors.is_empty() {
            info!("No vendors qualified");
            return Ok(QualificationOutcome::NoResult(no_result(query, matching_analysis)));
        }

        vendors.attach_ratings(catalog);
        let total_qualified_vendors = vendors.len();

        let ranker = self.ranker();
        let mut ranked = ranker.rank_vendors(vendors, query.top_n);
        if query.include_explanations {
            ranker.add_ranking_explanation(&mut ranked);
        }
        let ranking_summary = RankingSummary::compute(&ranked, &ranker);

        let detailed_matches = if query.include_explanations {
            Some(matches.into_iter().take(DETAILED_MATCHES_LIMIT).collect())
        } else {
            None
        };

        info!("Successfully processed query, returning {} vendors", ranked.len());

        Ok(QualificationOutcome::Qualified(QualificationReport {
            methodology: self.methodology(query.similarity_threshold),
            results: QualifiedVendors {
                returned_vendors: ranked.len(),
                ranked_vendors: ranked,
                total_qualified_vendors,
            },
            query,
            matching_analysis,
            ranking_summary,
            detailed_matches,
        }))
    }

    fn methodology(&self, threshold: f64) -> Methodology {
        Methodology {
            similarity_matching: SimilarityMethodology {
                description: "TF-IDF vectorization and cosine similarity between capabilities and feature descriptions".to_string(),
                threshold,
                text_processing: "Feature name weighted twice plus description; English stop words removed; unigrams and bigrams".to_string(),
            },
            ranking: RankingFormula {
                description: format!(
                    "Weighted combination of similarity score ({}) and vendor rating ({})",
                    self.config.feature_weight, self.config.rating_weight
                ),
                formula: "rank_score = feature_weight * avg_similarity_score + rating_weight * normalized_rating".to_string(),
            },
        }
    }
}

fn no_result(query: ResolvedQuery, matching_analysis: MatchingAnalysis) -> NoResultReport {
    NoResultReport {
        message: format!(
            "No vendors found matching capabilities {:?} in category '{}' with similarity threshold {}",
            query.capabilities, query.software_category, query.similarity_threshold
        ),
        analysis: NoResultAnalysis {
            threshold_impact: format!(
                "Consider lowering similarity threshold (currently {}) to find more matches",
                query.similarity_threshold
            ),
            suggestions: vec![
                "Try broader capability terms".to_string(),
                "Check if the software category exists in the catalog".to_string(),
                "Lower the similarity threshold to 0.4-0.5".to_string(),
            ],
        },
        query,
        matching_analysis,
    }
}
