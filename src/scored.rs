//! Engine output: scored events, contributing factors, confidence.
//!
//! A `ScoredEvent` is assembled through `ScoredEventBuilder` and frozen on `build()`;
//! its fields are read through accessors only. Rationale and confidence are derived
//! from the factor list at build time, so they never drift from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::explain::{confidence_level, rationale};
use crate::model::Event;

/// Qualitative confidence, from how many independent strategies contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// One named, weighted, human-described reason a component scored above zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    pub factor: String,
    pub weight: f64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Factor as produced by a scorer, before it is stamped with the scoring time.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorDraft {
    pub name: String,
    pub weight: f64,
    pub description: String,
}

impl FactorDraft {
    pub fn new(name: impl Into<String>, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            description: description.into(),
        }
    }
}

/// Audit trail behind `relevance_score`: raw component scores and multipliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub direct_match: f64,
    pub industry: f64,
    pub geographic: f64,
    pub business_unit: f64,
    pub risk_correlation: f64,
    /// Weighted sum before boosting (may exceed 1.0).
    pub combined: f64,
    pub severity_multiplier: f64,
    pub recency_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEvent {
    event: Event,
    relevance_score: f64,
    contributing_factors: Vec<ContributingFactor>,
    confidence_level: ConfidenceLevel,
    rationale: String,
    last_updated: DateTime<Utc>,
    #[serde(default)]
    breakdown: ScoreBreakdown,
}

impl ScoredEvent {
    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
    }

    pub fn contributing_factors(&self) -> &[ContributingFactor] {
        &self.contributing_factors
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }
}

/// Accumulates factors for one event, then freezes into a `ScoredEvent`.
#[derive(Debug)]
pub struct ScoredEventBuilder<'a> {
    event: &'a Event,
    at: DateTime<Utc>,
    factors: Vec<ContributingFactor>,
    breakdown: ScoreBreakdown,
}

impl<'a> ScoredEventBuilder<'a> {
    pub fn new(event: &'a Event, at: DateTime<Utc>) -> Self {
        Self {
            event,
            at,
            factors: Vec::new(),
            breakdown: ScoreBreakdown::default(),
        }
    }

    pub fn factor(mut self, draft: FactorDraft) -> Self {
        self.push(draft);
        self
    }

    pub fn factors(mut self, drafts: impl IntoIterator<Item = FactorDraft>) -> Self {
        for d in drafts {
            self.push(d);
        }
        self
    }

    pub fn breakdown(mut self, breakdown: ScoreBreakdown) -> Self {
        self.breakdown = breakdown;
        self
    }

    fn push(&mut self, draft: FactorDraft) {
        self.factors.push(ContributingFactor {
            factor: draft.name,
            weight: draft.weight,
            description: draft.description,
            timestamp: self.at,
        });
    }

    /// Freeze with the final (boosted, clamped) score.
    pub fn build(self, relevance_score: f64) -> ScoredEvent {
        let confidence_level = confidence_level(&self.factors);
        let rationale = rationale(relevance_score, &self.factors);
        ScoredEvent {
            event: self.event.clone(),
            relevance_score,
            contributing_factors: self.factors,
            confidence_level,
            rationale,
            last_updated: self.at,
            breakdown: self.breakdown,
        }
    }
}
