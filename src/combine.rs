//! # Combine, boost, filter
//! Pure arithmetic between the component scorers and the final score:
//! 1. weighted sum of the raw component scores (no per-component clamp)
//! 2. severity × recency multipliers, clamped to [0, 1]
//! 3. engine floor (`minimum_score`)

use crate::config::{BoostConfig, ComponentWeights};
use crate::model::{Severity, Timeframe};
use crate::scorers::Component;

/// Raw scores for the five components, as produced by the scorers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComponentScores {
    pub direct_match: f64,
    pub industry: f64,
    pub geographic: f64,
    pub business_unit: f64,
    pub risk_correlation: f64,
}

impl ComponentScores {
    pub fn set(&mut self, component: Component, score: f64) {
        match component {
            Component::DirectMatch => self.direct_match = score,
            Component::Industry => self.industry = score,
            Component::Geographic => self.geographic = score,
            Component::BusinessUnit => self.business_unit = score,
            Component::RiskCorrelation => self.risk_correlation = score,
        }
    }
}

/// Σ component × global weight. May exceed 1.0 when multi-match scorers accumulate.
pub fn combine(scores: &ComponentScores, weights: &ComponentWeights) -> f64 {
    scores.direct_match * weights.direct_match
        + scores.industry * weights.industry
        + scores.geographic * weights.geographic
        + scores.business_unit * weights.business_unit
        + scores.risk_correlation * weights.risk_correlation
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boosted {
    pub score: f64,
    pub severity_multiplier: f64,
    pub recency_multiplier: f64,
}

/// Apply severity and recency multipliers, then clamp to [0, 1].
pub fn boost(
    combined: f64,
    severity: Option<Severity>,
    timeframe: Option<Timeframe>,
    boosts: &BoostConfig,
) -> Boosted {
    let severity_multiplier = boosts.severity_multiplier(severity);
    let recency_multiplier = boosts.recency_multiplier(timeframe);
    Boosted {
        score: clamp01(combined * severity_multiplier * recency_multiplier),
        severity_multiplier,
        recency_multiplier,
    }
}

/// Threshold filter: keep when `score >= minimum_score`.
pub fn passes_threshold(score: f64, minimum_score: f64) -> bool {
    score >= minimum_score
}

/// Clamp to [0.0, 1.0]; non-finite input collapses to 0.0.
fn clamp01(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
