//! # vendorq Core
//!
//! Core library for the vendorq vendor qualification engine.
//!
//! This crate provides the catalog data model and the text machinery the
//! matcher runs on:
//!
//! - [`ProductRecord`] - A vendor product with its nested feature payload
//! - [`flatten`] - One row per (product, feature) pair
//! - [`Catalog`] - Immutable snapshot of products and flattened rows
//! - [`TfidfVectorizer`] - Per-query TF-IDF vector space
//! - [`CategoryFilter`] - Case-insensitive category filtering
//!
//! ## Example
//!
//! ```rust
//! use vendorq_core::{similarity_matrix, DEFAULT_MAX_FEATURES};
//!
//! let matrix = similarity_matrix(
//!     &["Lead Management"],
//!     &["Lead Management Lead Management Track and qualify leads"],
//!     DEFAULT_MAX_FEATURES,
//! ).unwrap();
//! assert!(matrix[0][0] > 0.5);
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod product;
pub mod text;
pub mod tfidf;
pub mod vector;

pub use catalog::{Catalog, CategoryCount, CommonFeatures, FeatureCount, RatingLookup, VendorListing};
pub use error::{Error, Result};
pub use filter::{CategoryFilter, Filter};
pub use flatten::{flatten, FlattenedFeatureRow};
pub use product::{FeatureGroup, FeaturePayload, FeatureRecord, ProductRecord};
pub use tfidf::{similarity_matrix, TfidfVectorizer, VectorizeError, DEFAULT_MAX_FEATURES};
pub use vector::SparseVector;
