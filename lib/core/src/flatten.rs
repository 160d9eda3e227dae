//! Catalog flattening
//!
//! Turns one row per product into one row per (product, feature) pair. Row
//! order follows the depth-first (product, group, feature) traversal of the
//! input so repeated runs over the same catalog produce the same table.

use crate::product::{FeaturePayload, ProductRecord};
use serde::Serialize;
use tracing::debug;

/// Denormalized join of a product with one of its features
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FlattenedFeatureRow {
    pub product_name: String,
    pub seller: String,
    pub main_category: String,
    pub rating: f64,
    pub feature_category: String,
    pub feature_name: String,
    pub feature_description: String,
    pub feature_percent: f64,
    pub feature_review_count: f64,
}

/// Flatten products into feature rows.
///
/// Products without a usable payload and groups without features contribute
/// no rows.
pub fn flatten(products: &[ProductRecord]) -> Vec<FlattenedFeatureRow> {
    let mut rows = Vec::new();
    let mut malformed = 0usize;

    for product in products {
        if matches!(product.features, FeaturePayload::Malformed) {
            malformed += 1;
        }
        for group in product.features.groups() {
            for feature in &group.features {
                rows.push(FlattenedFeatureRow {
                    product_name: product.product_name.clone(),
                    seller: product.seller.clone(),
                    main_category: product.main_category.clone(),
                    rating: product.rating,
                    feature_category: group.category.clone(),
                    feature_name: feature.name.clone(),
                    feature_description: feature.description.clone(),
                    feature_percent: feature.percent,
                    feature_review_count: feature.review_count,
                });
            }
        }
    }

    debug!(
        products = products.len(),
        rows = rows.len(),
        malformed,
        "flattened catalog"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{FeatureGroup, FeatureRecord};

    fn feature(name: &str) -> FeatureRecord {
        FeatureRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn product(name: &str, features: FeaturePayload) -> ProductRecord {
        ProductRecord {
            product_name: name.to_string(),
            seller: format!("{} Inc", name),
            main_category: "CRM Software".to_string(),
            rating: 4.0,
            features,
        }
    }

    #[test]
    fn test_flatten_depth_first_order() {
        let products = vec![
            product("Alpha", FeaturePayload::Present(vec![
                FeatureGroup { category: "Sales".into(), features: vec![feature("a1"), feature("a2")] },
                FeatureGroup { category: "Support".into(), features: vec![feature("a3")] },
            ])),
            product("Beta", FeaturePayload::Present(vec![
                FeatureGroup { category: "Sales".into(), features: vec![feature("b1")] },
            ])),
        ];

        let rows = flatten(&products);
        let names: Vec<&str> = rows.iter().map(|r| r.feature_name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "a3", "b1"]);
        assert_eq!(rows[2].feature_category, "Support");
        assert_eq!(rows[3].seller, "Beta Inc");
        assert_eq!(rows[3].rating, 4.0);
    }

    #[test]
    fn test_flatten_skips_missing_payloads() {
        let products = vec![
            product("Absent", FeaturePayload::Absent),
            product("Broken", FeaturePayload::Malformed),
            product("Empty", FeaturePayload::Present(vec![FeatureGroup::default()])),
            product("Kept", FeaturePayload::Present(vec![
                FeatureGroup { category: String::new(), features: vec![feature("k")] },
            ])),
        ];

        let rows = flatten(&products);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Kept");
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let products = vec![product("Alpha", FeaturePayload::Present(vec![
            FeatureGroup { category: "Sales".into(), features: vec![feature("x"), feature("y")] },
        ]))];

        assert_eq!(flatten(&products), flatten(&products));
        assert!(flatten(&[]).is_empty());
    }
}
