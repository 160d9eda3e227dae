//! Per-vendor aggregation of feature matches
//!
//! Vendors are kept in the order their first match arrives. That order is the
//! tie-break the ranker preserves, so the container is an explicit
//! `Vec` plus a key index rather than a hash map.

use crate::matcher::FeatureMatch;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;
use tracing::info;
use vendorq_core::RatingLookup;

/// Separator of the legacy string form of a vendor key
pub const VENDOR_KEY_SEPARATOR: &str = "_";

/// Vendor identity: product name plus seller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VendorKey {
    pub product_name: String,
    pub seller: String,
}

impl VendorKey {
    pub fn new(product_name: impl Into<String>, seller: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            seller: seller.into(),
        }
    }
}

/// Legacy string form `product_name + "_" + seller`
impl fmt::Display for VendorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.product_name, VENDOR_KEY_SEPARATOR, self.seller)
    }
}

/// Feature details kept for a vendor match
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchedFeature {
    pub feature_category: String,
    pub feature_name: String,
    pub feature_description: String,
    pub feature_percent: f64,
    pub feature_review_count: f64,
    pub matched_capability: String,
    pub similarity_score: f64,
}

impl From<&FeatureMatch> for MatchedFeature {
    fn from(m: &FeatureMatch) -> Self {
        Self {
            feature_category: m.row.feature_category.clone(),
            feature_name: m.row.feature_name.clone(),
            feature_description: m.row.feature_description.clone(),
            feature_percent: m.row.feature_percent,
            feature_review_count: m.row.feature_review_count,
            matched_capability: m.capability.clone(),
            similarity_score: m.similarity_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VendorAggregate {
    pub product_name: String,
    #[serde(rename = "vendor")]
    pub seller: String,
    pub main_category: String,
    pub matching_features: Vec<MatchedFeature>,
    /// Distinct capabilities, in first-matched order
    pub matched_capabilities: Vec<String>,
    pub max_similarity_score: f64,
    /// Mean over all matching features, not per capability
    pub avg_similarity_score: f64,
    pub total_matches: usize,
    pub rating: f64,
}

impl VendorAggregate {
    fn from_first_match(m: &FeatureMatch) -> Self {
        Self {
            product_name: m.row.product_name.clone(),
            seller: m.row.seller.clone(),
            main_category: m.row.main_category.clone(),
            matching_features: Vec::new(),
            matched_capabilities: Vec::new(),
            max_similarity_score: 0.0,
            avg_similarity_score: 0.0,
            total_matches: 0,
            rating: 0.0,
        }
    }

    fn add(&mut self, m: &FeatureMatch) {
        self.matching_features.push(MatchedFeature::from(m));
        if !self.matched_capabilities.contains(&m.capability) {
            self.matched_capabilities.push(m.capability.clone());
        }
        self.max_similarity_score = self.max_similarity_score.max(m.similarity_score);
        self.total_matches += 1;
    }

    fn finish(&mut self) {
        if self.total_matches > 0 {
            let sum: f64 = self.matching_features.iter().map(|f| f.similarity_score).sum();
            self.avg_similarity_score = sum / self.total_matches as f64;
        }
    }

    pub fn key(&self) -> VendorKey {
        VendorKey::new(self.product_name.clone(), self.seller.clone())
    }
}

/// Insertion-ordered vendor aggregates
#[derive(Debug, Clone, Default)]
pub struct VendorAggregates {
    vendors: Vec<VendorAggregate>,
    index: AHashMap<VendorKey, usize>,
}

impl VendorAggregates {
    #[inline]
    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn get(&self, key: &VendorKey) -> Option<&VendorAggregate> {
        self.index.get(key).map(|&i| &self.vendors[i])
    }

    /// Vendors in first-match order
    pub fn iter(&self) -> impl Iterator<Item = &VendorAggregate> {
        self.vendors.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = VendorKey> + '_ {
        self.vendors.iter().map(VendorAggregate::key)
    }

    /// Attach ratings, one lookup per vendor
    pub fn attach_ratings<L: RatingLookup + ?Sized>(&mut self, lookup: &L) {
        for vendor in &mut self.vendors {
            vendor.rating = lookup.rating(&vendor.product_name, &vendor.seller);
        }
    }

    pub fn into_vec(self) -> Vec<VendorAggregate> {
        self.vendors
    }
}

impl<'a> IntoIterator for &'a VendorAggregates {
    type Item = &'a VendorAggregate;
    type IntoIter = std::slice::Iter<'a, VendorAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.vendors.iter()
    }
}

/// Fold feature matches into per-vendor summaries.
///
/// Only vendors with at least one match appear.
pub fn aggregate(matches: &[FeatureMatch]) -> VendorAggregates {
    let mut result = VendorAggregates::default();

    for m in matches {
        let key = VendorKey::new(m.row.product_name.clone(), m.row.seller.clone());
        let slot = match result.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = result.vendors.len();
                result.vendors.push(VendorAggregate::from_first_match(m));
                result.index.insert(key, i);
                i
            }
        };
        result.vendors[slot].add(m);
    }

    for vendor in &mut result.vendors {
        vendor.finish();
    }

    info!("Selected {} vendors with matching features", result.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendorq_core::FlattenedFeatureRow;

    fn feature_match(product: &str, seller: &str, capability: &str, feature: &str, score: f64) -> FeatureMatch {
        FeatureMatch {
            capability: capability.to_string(),
            row: FlattenedFeatureRow {
                product_name: product.to_string(),
                seller: seller.to_string(),
                main_category: "CRM Software".to_string(),
                feature_name: feature.to_string(),
                ..Default::default()
            },
            similarity_score: score,
            feature_text: feature.to_string(),
        }
    }

    #[test]
    fn test_two_features_same_capability() {
        let matches = vec![
            feature_match("Alpha", "Alpha Co", "Lead Management", "Leads", 0.8),
            feature_match("Alpha", "Alpha Co", "Lead Management", "Lead Tracking", 0.6),
        ];

        let vendors = aggregate(&matches);
        assert_eq!(vendors.len(), 1);

        let alpha = vendors.get(&VendorKey::new("Alpha", "Alpha Co")).unwrap();
        assert!((alpha.avg_similarity_score - 0.7).abs() < 1e-12);
        assert_eq!(alpha.max_similarity_score, 0.8);
        assert_eq!(alpha.total_matches, 2);
        assert_eq!(alpha.matched_capabilities, vec!["Lead Management"]);
        assert_eq!(alpha.matching_features[0].feature_name, "Leads");
    }

    #[test]
    fn test_average_over_matches_not_capabilities() {
        let matches = vec![
            feature_match("Alpha", "Alpha Co", "Lead Management", "a", 0.9),
            feature_match("Alpha", "Alpha Co", "Lead Management", "b", 0.9),
            feature_match("Alpha", "Alpha Co", "Email Marketing", "c", 0.3),
        ];

        let alpha = aggregate(&matches).into_vec().remove(0);
        assert!((alpha.avg_similarity_score - 0.7).abs() < 1e-12);
        assert_eq!(alpha.matched_capabilities.len(), 2);
    }

    #[test]
    fn test_vendor_identity_includes_seller() {
        let matches = vec![
            feature_match("Alpha", "Seller A", "x", "f", 0.9),
            feature_match("Beta", "Beta Co", "x", "f", 0.8),
            feature_match("Alpha", "Seller B", "x", "f", 0.7),
            feature_match("Alpha", "Seller A", "x", "g", 0.6),
        ];

        let vendors = aggregate(&matches);
        let keys: Vec<String> = vendors.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["Alpha_Seller A", "Beta_Beta Co", "Alpha_Seller B"]);
        assert_eq!(vendors.get(&VendorKey::new("Alpha", "Seller A")).unwrap().total_matches, 2);
    }

    #[test]
    fn test_empty_matches() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_attach_ratings() {
        struct Fixed;
        impl RatingLookup for Fixed {
            fn rating(&self, product_name: &str, _seller: &str) -> f64 {
                if product_name == "Alpha" { 4.0 } else { 0.0 }
            }
        }

        let mut vendors = aggregate(&[
            feature_match("Alpha", "Alpha Co", "x", "f", 0.9),
            feature_match("Beta", "Beta Co", "x", "f", 0.8),
        ]);
        vendors.attach_ratings(&Fixed);

        let ratings: Vec<f64> = vendors.iter().map(|v| v.rating).collect();
        assert_eq!(ratings, vec![4.0, 0.0]);
    }
}
