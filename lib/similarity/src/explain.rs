//! Explainability for ranked vendors
//!
//! Per-vendor score breakdowns and summary statistics over a ranked list.
//! Everything here is derived from already-ranked results and never changes
//! their order.

use crate::aggregate::VendorAggregate;
use crate::rank::{RankedVendor, Ranker};
use serde::Serialize;

/// Weighted components of one vendor's rank score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingMethodology {
    pub feature_weight: f64,
    pub rating_weight: f64,
    pub similarity_component: f64,
    pub rating_component: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingExplanation {
    pub ranking_methodology: RankingMethodology,
    /// Human-readable form of the score arithmetic
    pub score_breakdown: String,
}

impl RankingExplanation {
    pub fn compute(ranker: &Ranker, vendor: &VendorAggregate, rank_score: f64) -> Self {
        let sim = Ranker::similarity_term(vendor);
        let rating_norm = Ranker::normalized_rating(vendor.rating);
        let (fw, rw) = (ranker.feature_weight(), ranker.rating_weight());

        Self {
            ranking_methodology: RankingMethodology {
                feature_weight: fw,
                rating_weight: rw,
                similarity_component: fw * sim,
                rating_component: rw * rating_norm,
                final_score: rank_score,
            },
            score_breakdown: format!(
                "Rank Score = ({} * {:.3}) + ({} * {:.3}) = {:.3}",
                fw, sim, rw, rating_norm, rank_score
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryMethodology {
    pub feature_weight: f64,
    pub rating_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopVendor {
    pub name: String,
    pub score: f64,
}

/// Summary statistics for a ranked vendor list
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingSummary {
    pub total_vendors: usize,
    pub score_range: ScoreRange,
    pub avg_score: f64,
    pub methodology: SummaryMethodology,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_vendor: Option<TopVendor>,
}

impl RankingSummary {
    /// Compute stats from the returned (already truncated) ranked list
    pub fn compute(ranked: &[RankedVendor], ranker: &Ranker) -> Self {
        let (fw, rw) = (ranker.feature_weight(), ranker.rating_weight());

        if ranked.is_empty() {
            return Self {
                total_vendors: 0,
                score_range: ScoreRange { min: 0.0, max: 0.0 },
                avg_score: 0.0,
                methodology: SummaryMethodology {
                    feature_weight: fw,
                    rating_weight: rw,
                    description: None,
                },
                top_vendor: None,
            };
        }

        let scores: Vec<f64> = ranked.iter().map(|r| r.rank_score).collect();
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg_score = scores.iter().sum::<f64>() / scores.len() as f64;

        // Results are sorted
        let top = &ranked[0];

        Self {
            total_vendors: ranked.len(),
            score_range: ScoreRange { min, max },
            avg_score,
            methodology: SummaryMethodology {
                feature_weight: fw,
                rating_weight: rw,
                description: Some(format!(
                    "Final score = {} * avg_similarity_score + {} * normalized_rating",
                    fw, rw
                )),
            },
            top_vendor: Some(TopVendor {
                name: top.vendor.product_name.clone(),
                score: top.rank_score,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(name: &str, avg: f64, rating: f64) -> VendorAggregate {
        VendorAggregate {
            product_name: name.to_string(),
            seller: format!("{} Co", name),
            main_category: "CRM Software".to_string(),
            matching_features: Vec::new(),
            matched_capabilities: vec!["Lead Management".to_string()],
            max_similarity_score: avg,
            avg_similarity_score: avg,
            total_matches: 1,
            rating,
        }
    }

    fn ranked(name: &str, avg: f64, rating: f64) -> RankedVendor {
        let ranker = Ranker::default();
        let vendor = vendor(name, avg, rating);
        RankedVendor {
            vendor_key: vendor.key().to_string(),
            rank_score: ranker.compute_rank_score(&vendor),
            vendor,
            ranking_explanation: None,
        }
    }

    #[test]
    fn test_explanation_components() {
        let ranker = Ranker::default();
        let v = vendor("Alpha", 0.8, 4.0);
        let explanation = RankingExplanation::compute(&ranker, &v, ranker.compute_rank_score(&v));

        let m = &explanation.ranking_methodology;
        assert!((m.similarity_component - 0.56).abs() < 1e-12);
        assert!((m.rating_component - 0.24).abs() < 1e-12);
        assert!((m.similarity_component + m.rating_component - m.final_score).abs() < 1e-12);
        assert_eq!(explanation.score_breakdown, "Rank Score = (0.7 * 0.800) + (0.3 * 0.800) = 0.800");
    }

    #[test]
    fn test_explanation_uses_clamped_similarity() {
        let ranker = Ranker::new(1.0, 0.0);
        let v = vendor("Alpha", 1.2, 0.0);
        let explanation = RankingExplanation::compute(&ranker, &v, ranker.compute_rank_score(&v));
        assert_eq!(explanation.ranking_methodology.similarity_component, 1.0);
        assert_eq!(explanation.ranking_methodology.final_score, 1.0);
    }

    #[test]
    fn test_summary() {
        let list = vec![ranked("A", 0.9, 5.0), ranked("B", 0.6, 0.0)];
        let summary = RankingSummary::compute(&list, &Ranker::default());

        assert_eq!(summary.total_vendors, 2);
        assert_eq!(summary.score_range.max, list[0].rank_score);
        assert_eq!(summary.score_range.min, list[1].rank_score);
        assert!((summary.avg_score - (list[0].rank_score + list[1].rank_score) / 2.0).abs() < 1e-12);
        assert_eq!(summary.top_vendor.as_ref().unwrap().name, "A");
        assert!(summary.methodology.description.is_some());
    }

    #[test]
    fn test_empty_summary() {
        let summary = RankingSummary::compute(&[], &Ranker::default());
        assert_eq!(summary.total_vendors, 0);
        assert_eq!(summary.score_range, ScoreRange { min: 0.0, max: 0.0 });
        assert!(summary.top_vendor.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("top_vendor").is_none());
    }
}
