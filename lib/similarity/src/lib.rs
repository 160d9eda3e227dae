//! # vendorq Similarity
//!
//! Capability matching and vendor ranking on top of `vendorq-core`.
//!
//! ## Features
//!
//! - **Feature Matching**: TF-IDF cosine similarity between requested capabilities and catalog features
//! - **Vendor Aggregation**: Per-vendor match statistics in first-match order
//! - **Weighted Ranking**: Similarity and rating combined with configurable weights
//! - **Explainability**: Score breakdowns and ranking summaries
//!
//! ## Example
//!
//! ```rust
//! use vendorq_core::Catalog;
//! use vendorq_similarity::{QualificationQuery, VendorQualifier};
//!
//! let catalog = Catalog::new(Vec::new());
//! let qualifier = VendorQualifier::default();
//! let query = QualificationQuery::new("CRM", vec!["Lead Management"]);
//!
//! let outcome = qualifier.qualify(&catalog, &query).unwrap();
//! assert!(!outcome.is_qualified());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Category   │────>│   Matcher   │────>│  Aggregate  │
//! │   Filter    │     │  (TF-IDF)   │     │ (per vendor)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐           │
//!                      │   Ranker    │<──────────┘
//!                      │ (weights)   │
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │  Explain    │
//!                      │  (summary)  │
//!                      └─────────────┘
//! ```

pub mod aggregate;
pub mod config;
pub mod explain;
pub mod matcher;
pub mod pipeline;
pub mod rank;

// Re-export main types for convenience
pub use aggregate::{aggregate, MatchedFeature, VendorAggregate, VendorAggregates, VendorKey};
pub use config::{ConfigError, PipelineConfig};
pub use explain::{RankingExplanation, RankingMethodology, RankingSummary, ScoreRange, TopVendor};
pub use matcher::{feature_text, match_features, FeatureMatch, FeatureMatcher};
pub use pipeline::{
    NoResultReport,
    QualificationOutcome,
    QualificationQuery,
    QualificationReport,
    ResolvedQuery,
    VendorQualifier,
};
pub use rank::{rank, RankedVendor, Ranker};
