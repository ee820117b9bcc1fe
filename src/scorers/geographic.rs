//! Geographic intelligence. Every profile region found in the region table adds its
//! own related-region / supply-chain / geopolitical sub-scores; matches accumulate.

use super::{keyword_bucket, Component, ComponentScore, ComponentScorer, ScoringContext};

const RELATED_REGIONS_WEIGHT: f64 = 0.4;
const SUPPLY_CHAIN_WEIGHT: f64 = 0.3;
const GEOPOLITICAL_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default)]
pub struct GeographicScorer;

impl ComponentScorer for GeographicScorer {
    fn component(&self) -> Component {
        Component::Geographic
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let mut out = ComponentScore::default();

        for region in &ctx.profile.regions {
            let Some(intel) = ctx.tables.region(region) else {
                continue;
            };
            let region = region.trim();

            let (hits, value) = keyword_bucket(ctx, &intel.related_regions, RELATED_REGIONS_WEIGHT);
            out.add(
                "geographic_related_regions",
                value,
                format!(
                    "{hits} locations related to {region} mentioned (of {})",
                    intel.related_regions.len()
                ),
            );

            let (hits, value) = keyword_bucket(ctx, &intel.supply_chain_risks, SUPPLY_CHAIN_WEIGHT);
            out.add(
                "geographic_supply_chain",
                value,
                format!(
                    "{region} supply-chain risk: {hits} of {} indicators mentioned",
                    intel.supply_chain_risks.len()
                ),
            );

            let (hits, value) = keyword_bucket(ctx, &intel.geopolitical_risks, GEOPOLITICAL_WEIGHT);
            out.add(
                "geographic_geopolitical",
                value,
                format!(
                    "{region} geopolitical risk: {hits} of {} indicators mentioned",
                    intel.geopolitical_risks.len()
                ),
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorers::test_support::{run, scenario_profile, trade_event};

    #[test]
    fn scenario_region_contributes() {
        let s = run(&GeographicScorer, &scenario_profile(), &trade_event());
        // related: "china" 1/8 * 0.4; geopolitical: "trade tensions" 1/5 * 0.3
        let expected = 1.0 / 8.0 * 0.4 + 1.0 / 5.0 * 0.3;
        assert!((s.score - expected).abs() < 1e-9, "got {}", s.score);
        assert_eq!(s.factors.len(), 2);
    }

    #[test]
    fn matching_regions_accumulate() {
        let single = run(&GeographicScorer, &scenario_profile(), &trade_event());
        let mut p = scenario_profile();
        p.regions.push("Asia-Pacific".into());
        let double = run(&GeographicScorer, &p, &trade_event());
        assert!((double.score - 2.0 * single.score).abs() < 1e-9);
        assert_eq!(double.factors.len(), 2 * single.factors.len());
    }

    #[test]
    fn unmapped_region_is_ignored() {
        let mut p = scenario_profile();
        p.regions = vec!["atlantis".into()];
        let s = run(&GeographicScorer, &p, &trade_event());
        assert_eq!(s.score, 0.0);
    }
}
