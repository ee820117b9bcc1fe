//! Risk correlation: for each event category in the correlation table, credit the
//! share of the profile's concerns listed among its related risks (× 0.5) and a flat
//! 0.3 when the profile's industry is among the impacted industries. Both checks are
//! exact, case-insensitive list membership. Categories accumulate.

use super::{fraction, Component, ComponentScore, ComponentScorer, ScoringContext};

const CONCERNS_WEIGHT: f64 = 0.5;
const INDUSTRY_BONUS: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskCorrelationScorer;

impl ComponentScorer for RiskCorrelationScorer {
    fn component(&self) -> Component {
        Component::RiskCorrelation
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let mut out = ComponentScore::default();
        let concerns = &ctx.profile.areas_of_concern;
        let industry = ctx.profile.industry.trim().to_lowercase();

        for category in &ctx.event.categories {
            let Some(corr) = ctx.tables.correlation(category) else {
                continue;
            };
            let category = category.trim();

            let matched = concerns
                .iter()
                .map(|a| a.category.trim().to_lowercase())
                .filter(|c| corr.related_risks.iter().any(|r| r == c))
                .count();
            out.add(
                "risk_correlation_concerns",
                fraction(matched, concerns.len(), CONCERNS_WEIGHT),
                format!(
                    "{category} risks correlate with {matched} of {} areas of concern",
                    concerns.len()
                ),
            );

            if !industry.is_empty() && corr.industry_impact.iter().any(|i| *i == industry) {
                out.add(
                    "risk_correlation_industry",
                    INDUSTRY_BONUS,
                    format!("{category} risks historically impact the {industry} industry"),
                );
            }
        }

        out
    }
}
