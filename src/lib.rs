//! # vendorq
//!
//! Vendor qualification: match requested capabilities against a catalog of
//! product features and rank the vendors that offer them.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! vendorq --catalog data/catalog.json --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use vendorq::prelude::*;
//!
//! let store = CatalogStore::load("data/catalog.json").unwrap();
//! let catalog = store.snapshot().unwrap();
//!
//! let qualifier = VendorQualifier::new(PipelineConfig::default()).unwrap();
//! let query = QualificationQuery::new("CRM Software", vec!["Lead Management", "Email Marketing"])
//!     .with_top_n(5);
//!
//! for vendor in qualifier.qualify(&catalog, &query).unwrap().ranked_vendors() {
//!     println!("{} {:.3}", vendor.vendor_key, vendor.rank_score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `vendorq-core` - Catalog model, flattening, category filter, TF-IDF vectors
//! - `vendorq-similarity` - Capability matching, vendor aggregation, ranking, explanations
//! - `vendorq-storage` - Catalog file loading and snapshot reloads
//! - `vendorq-api` - REST API

// Re-export core types
pub use vendorq_core::{
    flatten, similarity_matrix,
    Catalog, CategoryFilter, Filter, FlattenedFeatureRow,
    FeaturePayload, ProductRecord, RatingLookup,
    TfidfVectorizer,
    Error, Result,
};

// Re-export the pipeline
pub use vendorq_similarity::{
    aggregate, match_features, rank,
    FeatureMatch, FeatureMatcher,
    PipelineConfig, QualificationOutcome, QualificationQuery, VendorQualifier,
    RankedVendor, Ranker, RankingSummary,
    VendorAggregate, VendorAggregates, VendorKey,
};

// Re-export storage
pub use vendorq_storage::CatalogStore;

// Re-export API
pub use vendorq_api::{ApiState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CategoryFilter, ProductRecord,
        Error, Result,
        PipelineConfig, QualificationOutcome, QualificationQuery, VendorQualifier,
        RankedVendor,
        CatalogStore,
        ApiState, RestApi,
    };
}
