//! Vendor ranking
//!
//! Combines a vendor's averaged match similarity with its normalized rating:
//!
//! ```text
//! rank_score = feature_weight * clamp(avg_similarity, 0, 1)
//!            + rating_weight  * clamp(rating / 5, 0, 1)
//! ```
//!
//! Weights are used as given. Sorting is stable, so vendors with equal scores
//! keep the order the aggregator emitted them in.

use crate::aggregate::{VendorAggregate, VendorAggregates};
use crate::explain::RankingExplanation;
use serde::Serialize;
use tracing::info;

/// Upper bound of the rating scale
pub const MAX_RATING: f64 = 5.0;

/// A ranked vendor with its score and optional breakdown
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedVendor {
    pub vendor_key: String,
    #[serde(flatten)]
    pub vendor: VendorAggregate,
    pub rank_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_explanation: Option<RankingExplanation>,
}

/// Ranker holding the score weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranker {
    feature_weight: f64,
    rating_weight: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(0.7, 0.3)
    }
}

impl Ranker {
    pub fn new(feature_weight: f64, rating_weight: f64) -> Self {
        Self {
            feature_weight,
            rating_weight,
        }
    }

    #[inline]
    pub fn feature_weight(&self) -> f64 {
        self.feature_weight
    }

    #[inline]
    pub fn rating_weight(&self) -> f64 {
        self.rating_weight
    }

    /// Similarity clamped into [0, 1]
    #[inline]
    pub fn similarity_term(vendor: &VendorAggregate) -> f64 {
        vendor.avg_similarity_score.clamp(0.0, 1.0)
    }

    /// Rating scaled to [0, 1]; zero, negative and NaN ratings count as 0
    #[inline]
    pub fn normalized_rating(rating: f64) -> f64 {
        if rating > 0.0 {
            (rating / MAX_RATING).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn compute_rank_score(&self, vendor: &VendorAggregate) -> f64 {
        self.feature_weight * Self::similarity_term(vendor)
            + Self::normalized_rating(vendor.rating) * self.rating_weight
    }

    /// Score every vendor, sort by score descending and keep the first `top_n`
    pub fn rank_vendors(&self, vendors: VendorAggregates, top_n: usize) -> Vec<RankedVendor> {
        let total = vendors.len();
        let mut ranked: Vec<RankedVendor> = vendors
            .into_vec()
            .into_iter()
            .map(|vendor| RankedVendor {
                vendor_key: vendor.key().to_string(),
                rank_score: self.compute_rank_score(&vendor),
                vendor,
                ranking_explanation: None,
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));
        ranked.truncate(top_n);

        info!("Ranked {} vendors, returning top {}", total, ranked.len());
        ranked
    }

    /// Attach the weighted components and the score arithmetic to each vendor
    pub fn add_ranking_explanation(&self, ranked: &mut [RankedVendor]) {
        for vendor in ranked.iter_mut() {
            vendor.ranking_explanation = Some(RankingExplanation::compute(
                self,
                &vendor.vendor,
                vendor.rank_score,
            ));
        }
    }
}

/// Rank aggregated vendors with explicit weights
pub fn rank(
    vendors: VendorAggregates,
    feature_weight: f64,
    rating_weight: f64,
    top_n: usize,
) -> Vec<RankedVendor> {
    Ranker::new(feature_weight, rating_weight).rank_vendors(vendors, top_n)
}
