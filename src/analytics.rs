//! Batch analytics over already-scored events. Pure aggregation: no re-scoring.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scored::{ConfidenceLevel, ScoredEvent};

const TOP_FACTOR_LIMIT: usize = 10;

/// Bucket boundaries: `high >= high_relevance`, `medium >= medium_relevance`, rest low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceBands {
    pub medium: f64,
    pub high: f64,
}

impl Default for RelevanceBands {
    fn default() -> Self {
        Self {
            medium: 0.4,
            high: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl LevelCounts {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorCount {
    pub factor: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringAnalytics {
    pub total_events: usize,
    pub average_score: f64,
    pub score_distribution: LevelCounts,
    pub confidence_distribution: LevelCounts,
    /// Occurrences of each factor name across all contributing factors.
    pub factor_frequency: BTreeMap<String, usize>,
    /// Most frequent factor names; ties ordered by name.
    pub top_factors: Vec<FactorCount>,
}

pub fn scoring_analytics(scored: &[ScoredEvent], bands: RelevanceBands) -> ScoringAnalytics {
    let mut out = ScoringAnalytics {
        total_events: scored.len(),
        ..Default::default()
    };
    if scored.is_empty() {
        return out;
    }

    let mut sum = 0.0;
    for s in scored {
        let score = s.relevance_score();
        sum += score;

        if score >= bands.high {
            out.score_distribution.high += 1;
        } else if score >= bands.medium {
            out.score_distribution.medium += 1;
        } else {
            out.score_distribution.low += 1;
        }

        match s.confidence_level() {
            ConfidenceLevel::High => out.confidence_distribution.high += 1,
            ConfidenceLevel::Medium => out.confidence_distribution.medium += 1,
            ConfidenceLevel::Low => out.confidence_distribution.low += 1,
        }

        for f in s.contributing_factors() {
            *out.factor_frequency.entry(f.factor.clone()).or_insert(0) += 1;
        }
    }
    out.average_score = sum / scored.len() as f64;

    let mut ranked: Vec<FactorCount> = out
        .factor_frequency
        .iter()
        .map(|(factor, &count)| FactorCount {
            factor: factor.clone(),
            count,
        })
        .collect();
    // BTreeMap order is by name already; a stable sort keeps it for equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_FACTOR_LIMIT);
    out.top_factors = ranked;

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Event;
    use crate::scored::{FactorDraft, ScoredEventBuilder};
    use chrono::Utc;

    fn scored(score: f64, factors: &[&str]) -> ScoredEvent {
        let ev = Event::default();
        ScoredEventBuilder::new(&ev, Utc::now())
            .factors(factors.iter().map(|n| FactorDraft::new(*n, 0.1, *n)))
            .build(score)
    }

    #[test]
    fn empty_batch() {
        let a = scoring_analytics(&[], RelevanceBands::default());
        assert_eq!(a.total_events, 0);
        assert_eq!(a.average_score, 0.0);
        assert!(a.top_factors.is_empty());
    }

    #[test]
    fn buckets_and_histogram() {
        let batch = vec![
            scored(0.9, &["industry_geopolitical", "direct_match_regions"]),
            scored(0.7, &["industry_geopolitical"]),
            scored(0.4, &["geographic_related_regions"]),
            scored(0.1, &["industry_geopolitical"]),
        ];
        let a = scoring_analytics(&batch, RelevanceBands::default());

        assert_eq!(a.total_events, 4);
        assert_eq!(
            a.score_distribution,
            LevelCounts {
                high: 2,
                medium: 1,
                low: 1
            }
        );
        assert_eq!(a.score_distribution.total(), 4);
        assert_eq!(a.confidence_distribution.total(), 4);
        assert_eq!(a.confidence_distribution.medium, 1);
        assert_eq!(a.factor_frequency["industry_geopolitical"], 3);
        assert_eq!(a.top_factors[0].factor, "industry_geopolitical");
        assert_eq!(a.top_factors[1].factor, "direct_match_regions");
        assert!((a.average_score - 0.525).abs() < 1e-9);
    }
}
