//! Immutable catalog snapshot
//!
//! Holds the product table as loaded and the feature table flattened from it.
//! A `Catalog` is never mutated after construction; reloads build a new one.

use crate::filter::{CategoryFilter, Filter};
use crate::flatten::{flatten, FlattenedFeatureRow};
use crate::product::ProductRecord;
use ahash::{AHashMap, AHashSet};
use serde::Serialize;

/// Source of vendor ratings, queried once per vendor after aggregation
pub trait RatingLookup {
    /// Best-known rating for a product, 0 when unknown
    fn rating(&self, product_name: &str, seller: &str) -> f64;
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductRecord>,
    rows: Vec<FlattenedFeatureRow>,
}

/// Count of products per `main_category`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Distinct vendor listing entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VendorListing {
    pub product_name: String,
    pub seller: String,
    pub rating: f64,
    pub main_category: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureCount {
    pub feature_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommonFeatures {
    pub common_features: Vec<FeatureCount>,
    pub total_unique_features: usize,
}

impl Catalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        let rows = flatten(&products);
        Self { products, rows }
    }

    #[inline]
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    #[inline]
    pub fn rows(&self) -> &[FlattenedFeatureRow] {
        &self.rows
    }

    #[inline]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn feature_count(&self) -> usize {
        self.rows.len()
    }

    /// Feature rows in the given category, in catalog order
    pub fn rows_in_category(&self, filter: &CategoryFilter) -> Vec<&FlattenedFeatureRow> {
        filter.apply(&self.rows)
    }

    /// Product counts per category, most frequent first
    pub fn categories(&self) -> Vec<CategoryCount> {
        count_by_first_seen(self.products.iter().map(|p| p.main_category.as_str()))
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect()
    }

    /// Distinct vendors, optionally restricted to a category.
    ///
    /// One listing per `(product_name, seller)` in catalog order; a repeated
    /// vendor keeps the rating and category of its first row.
    pub fn vendors(&self, filter: &CategoryFilter) -> Vec<VendorListing> {
        let mut seen: AHashSet<(&str, &str)> = AHashSet::new();
        let mut listings: Vec<VendorListing> = Vec::new();
        for product in self.products.iter().filter(|p| filter.matches(*p)) {
            if seen.insert((product.product_name.as_str(), product.seller.as_str())) {
                listings.push(VendorListing {
                    product_name: product.product_name.clone(),
                    seller: product.seller.clone(),
                    rating: product.rating,
                    main_category: product.main_category.clone(),
                });
            }
        }
        listings
    }

    /// Most frequent feature names among the rows in a category
    pub fn common_features(&self, filter: &CategoryFilter, limit: usize) -> CommonFeatures {
        let mut counts = count_by_first_seen(
            self.rows_in_category(filter)
                .into_iter()
                .map(|r| r.feature_name.as_str()),
        );
        let total_unique_features = counts.len();
        counts.truncate(limit);

        CommonFeatures {
            common_features: counts
                .into_iter()
                .map(|(feature_name, count)| FeatureCount { feature_name, count })
                .collect(),
            total_unique_features,
        }
    }
}

impl RatingLookup for Catalog {
    fn rating(&self, product_name: &str, seller: &str) -> f64 {
        let exact = self
            .products
            .iter()
            .find(|p| p.product_name == product_name && p.seller == seller);
        exact
            .or_else(|| self.products.iter().find(|p| p.product_name == product_name))
            .map(|p| p.rating)
            .filter(|r| r.is_finite())
            .unwrap_or(0.0)
    }
}

/// Value counts sorted by count descending; equal counts keep first-seen order
fn count_by_first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: AHashMap<&'a str, usize> = AHashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{FeatureGroup, FeaturePayload, FeatureRecord};

    fn product(name: &str, seller: &str, category: &str, rating: f64, features: &[&str]) -> ProductRecord {
        ProductRecord {
            product_name: name.to_string(),
            seller: seller.to_string(),
            main_category: category.to_string(),
            rating,
            features: FeaturePayload::Present(vec![FeatureGroup {
                category: "General".to_string(),
                features: features
                    .iter()
                    .map(|f| FeatureRecord { name: f.to_string(), ..Default::default() })
                    .collect(),
            }]),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            product("Alpha", "Alpha Co", "CRM Software", 4.5, &["Lead Management", "Reporting"]),
            product("Beta", "Beta Co", "Marketing Software", 4.0, &["Email Marketing"]),
            product("Gamma", "Gamma Co", "CRM Software", 3.5, &["Lead Management"]),
            product("Alpha", "Other Co", "CRM Software", 2.0, &[]),
        ])
    }

    #[test]
    fn test_catalog_counts() {
        let catalog = sample();
        assert_eq!(catalog.product_count(), 4);
        assert_eq!(catalog.feature_count(), 4);
    }

    #[test]
    fn test_categories_sorted_by_count() {
        let categories = sample().categories();
        assert_eq!(categories[0], CategoryCount { category: "CRM Software".into(), count: 3 });
        assert_eq!(categories[1].count, 1);
    }

    #[test]
    fn test_vendors_filtered() {
        let catalog = sample();
        let vendors = catalog.vendors(&CategoryFilter::new("crm"));
        assert_eq!(vendors.len(), 3);
        assert_eq!(vendors[0].product_name, "Alpha");
        assert_eq!(vendors[2].seller, "Other Co");
        assert_eq!(catalog.vendors(&CategoryFilter::All).len(), 4);
    }

    #[test]
    fn test_vendors_deduplicated_by_identity() {
        let catalog = Catalog::new(vec![
            product("Alpha", "Alpha Co", "CRM Software", 4.5, &["Lead Management"]),
            product("Alpha", "Alpha Co", "Sales CRM", 3.0, &["Reporting"]),
            product("Alpha", "Other Co", "CRM Software", 2.0, &[]),
            product("Alpha", "Alpha Co", "CRM Software", 4.5, &[]),
        ]);

        let vendors = catalog.vendors(&CategoryFilter::All);
        let keys: Vec<(&str, &str)> = vendors
            .iter()
            .map(|v| (v.product_name.as_str(), v.seller.as_str()))
            .collect();
        assert_eq!(keys, vec![("Alpha", "Alpha Co"), ("Alpha", "Other Co")]);
        assert_eq!(vendors[0].rating, 4.5);
        assert_eq!(vendors[0].main_category, "CRM Software");

        let sales = catalog.vendors(&CategoryFilter::new("sales"));
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].rating, 3.0);
    }

    #[test]
    fn test_common_features() {
        let catalog = sample();
        let common = catalog.common_features(&CategoryFilter::new("CRM"), 1);
        assert_eq!(common.total_unique_features, 2);
        assert_eq!(common.common_features.len(), 1);
        assert_eq!(common.common_features[0].feature_name, "Lead Management");
        assert_eq!(common.common_features[0].count, 2);
    }

    #[test]
    fn test_rating_lookup_prefers_exact_vendor() {
        let catalog = sample();
        assert_eq!(catalog.rating("Alpha", "Other Co"), 2.0);
        assert_eq!(catalog.rating("Alpha", "Unknown"), 4.5);
        assert_eq!(catalog.rating("Missing", "Nobody"), 0.0);
    }
}
