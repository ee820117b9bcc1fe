//! Business-unit intelligence: for each unit type found in the table, compare its
//! related categories with the event's categories and search its geographic and
//! regulatory keywords in the event text. Units accumulate.

use super::{fraction, keyword_bucket, Component, ComponentScore, ComponentScorer, ScoringContext};
use crate::text::tags_overlap;

const CATEGORIES_WEIGHT: f64 = 0.4;
const GEOGRAPHIC_WEIGHT: f64 = 0.3;
const REGULATORY_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessUnitScorer;

impl ComponentScorer for BusinessUnitScorer {
    fn component(&self) -> Component {
        Component::BusinessUnit
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let mut out = ComponentScore::default();
        let categories = &ctx.event.categories;

        for unit in &ctx.profile.business_units {
            let Some(intel) = ctx.tables.business_unit(&unit.name) else {
                continue;
            };
            let name = unit.name.trim();

            let related = &intel.related_categories;
            let matched = related
                .iter()
                .filter(|rc| categories.iter().any(|c| tags_overlap(rc, c)))
                .count();
            out.add(
                "business_unit_categories",
                fraction(matched, related.len(), CATEGORIES_WEIGHT),
                format!(
                    "{name} unit: {matched} of {} related categories in event",
                    related.len()
                ),
            );

            let (hits, value) = keyword_bucket(ctx, &intel.geographic_risks, GEOGRAPHIC_WEIGHT);
            out.add(
                "business_unit_geographic",
                value,
                format!(
                    "{name} unit: {hits} of {} exposed locations mentioned",
                    intel.geographic_risks.len()
                ),
            );

            let (hits, value) = keyword_bucket(ctx, &intel.regulatory_risks, REGULATORY_WEIGHT);
            out.add(
                "business_unit_regulatory",
                value,
                format!(
                    "{name} unit: {hits} of {} regulatory indicators mentioned",
                    intel.regulatory_risks.len()
                ),
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BusinessUnit;
    use crate::scorers::test_support::{run, scenario_profile, trade_event};

    #[test]
    fn scenario_semiconductor_unit() {
        let s = run(&BusinessUnitScorer, &scenario_profile(), &trade_event());
        // categories: technology + trade 2/5 * 0.4; geographic: "china" 1/5 * 0.3
        let expected = 2.0 / 5.0 * 0.4 + 1.0 / 5.0 * 0.3;
        assert!((s.score - expected).abs() < 1e-9, "got {}", s.score);
        assert!(s.factors.iter().all(|f| f.name.starts_with("business_unit_")));
    }

    #[test]
    fn units_accumulate() {
        let mut p = scenario_profile();
        p.business_units.push(BusinessUnit::named("Manufacturing"));
        let one = run(&BusinessUnitScorer, &scenario_profile(), &trade_event());
        let two = run(&BusinessUnitScorer, &p, &trade_event());
        assert!(two.score > one.score);
    }

    #[test]
    fn unit_without_intel_is_skipped() {
        let mut p = scenario_profile();
        p.business_units = vec![BusinessUnit::named("catering")];
        let s = run(&BusinessUnitScorer, &p, &trade_event());
        assert_eq!(s.score, 0.0);
    }
}
