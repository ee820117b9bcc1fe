// src/scorers/mod.rs
//! Component scorers: five independent strategies that each look at one kind of
//! evidence linking a profile to an event.
//!
//! | scorer            | evidence                                      | factor prefix       |
//! |-------------------|-----------------------------------------------|---------------------|
//! | `direct`          | literal overlap of units/concerns/regions     | `direct_match_`     |
//! | `industry`        | industry table keywords in event text         | `industry_`         |
//! | `geographic`      | region table keywords in event text           | `geographic_`       |
//! | `business_unit`   | business-unit table categories and keywords   | `business_unit_`    |
//! | `correlation`     | risk-category table vs concerns and industry  | `risk_correlation_` |
//!
//! Scores are NOT clamped per component. Multi-match scorers accumulate, and only the
//! booster clamps the final value.
//!
//! `ComponentScorer` is the hook point for additional strategies (e.g. embedding
//! similarity); the engine combines whatever the registered scorers return.

pub mod business_unit;
pub mod correlation;
pub mod direct;
pub mod geographic;
pub mod industry;

use crate::intelligence::IntelligenceTables;
use crate::model::{Event, Profile};
use crate::scored::FactorDraft;
use crate::text::{EventText, KeywordMatcher};

pub use business_unit::BusinessUnitScorer;
pub use correlation::RiskCorrelationScorer;
pub use direct::DirectMatchScorer;
pub use geographic::GeographicScorer;
pub use industry::IndustryScorer;

/// The five built-in strategies, in combination order.
pub static BUILTIN_SCORERS: [&dyn ComponentScorer; 5] = [
    &DirectMatchScorer,
    &IndustryScorer,
    &GeographicScorer,
    &BusinessUnitScorer,
    &RiskCorrelationScorer,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    DirectMatch,
    Industry,
    Geographic,
    BusinessUnit,
    RiskCorrelation,
}

/// Everything a scorer may read. Nothing in here is mutable.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub profile: &'a Profile,
    pub event: &'a Event,
    pub text: &'a EventText,
    pub tables: &'a IntelligenceTables,
    pub matcher: KeywordMatcher,
}

/// Raw component score plus one factor per non-zero contribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentScore {
    pub score: f64,
    pub factors: Vec<FactorDraft>,
}

impl ComponentScore {
    /// Add a sub-score; zero (or negative) contributions leave no factor behind.
    pub(crate) fn add(&mut self, name: &str, value: f64, description: String) {
        if value > 0.0 {
            self.score += value;
            self.factors.push(FactorDraft::new(name, value, description));
        }
    }
}

pub trait ComponentScorer: Send + Sync {
    fn component(&self) -> Component;
    fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore;
}

/// Keyword bucket: `(matches, matches / len * weight)`. Empty lists score zero.
pub(crate) fn keyword_bucket(
    ctx: &ScoringContext<'_>,
    keywords: &[String],
    weight: f64,
) -> (usize, f64) {
    if keywords.is_empty() {
        return (0, 0.0);
    }
    let hits = ctx.matcher.count_matches(ctx.text, keywords);
    (hits, hits as f64 / keywords.len() as f64 * weight)
}

/// `matched / total * weight`, zero when `total` is zero.
pub(crate) fn fraction(matched: usize, total: usize, weight: f64) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * weight
    }
}
