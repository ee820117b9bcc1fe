//! Industry intelligence: keywords associated with the profile's industry,
//! searched in the event text.

use super::{keyword_bucket, Component, ComponentScore, ComponentScorer, ScoringContext};

const SUPPLY_CHAIN_WEIGHT: f64 = 0.3;
const REGULATORY_WEIGHT: f64 = 0.3;
const GEOPOLITICAL_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, Default)]
pub struct IndustryScorer;

impl ComponentScorer for IndustryScorer {
    fn component(&self) -> Component {
        Component::Industry
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let mut out = ComponentScore::default();
        let industry = ctx.profile.industry.trim();
        // Unknown industry means "no intelligence", not an error.
        let Some(intel) = ctx.tables.industry(industry) else {
            return out;
        };

        for (name, label, keywords, weight) in [
            (
                "industry_supply_chain",
                "supply-chain",
                &intel.supply_chain_risks,
                SUPPLY_CHAIN_WEIGHT,
            ),
            (
                "industry_regulatory",
                "regulatory",
                &intel.regulatory_risks,
                REGULATORY_WEIGHT,
            ),
            (
                "industry_geopolitical",
                "geopolitical",
                &intel.geopolitical_risks,
                GEOPOLITICAL_WEIGHT,
            ),
        ] {
            let (hits, value) = keyword_bucket(ctx, keywords, weight);
            out.add(
                name,
                value,
                format!(
                    "{industry} {label} risk: {hits} of {} indicators mentioned",
                    keywords.len()
                ),
            );
        }

        out
    }
}
