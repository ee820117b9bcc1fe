//! Direct match: literal overlap between the profile and the event's tags.
//!
//! - business units whose name overlaps an event category  × 0.4
//! - areas of concern whose category overlaps an event category × 0.4
//! - profile regions contained in an event region × 0.2
//!
//! Each fraction is skipped when the profile collection is empty.

use super::{fraction, Component, ComponentScore, ComponentScorer, ScoringContext};
use crate::text::tags_overlap;

const BUSINESS_UNIT_WEIGHT: f64 = 0.4;
const CONCERN_WEIGHT: f64 = 0.4;
const REGION_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMatchScorer;

impl ComponentScorer for DirectMatchScorer {
    fn component(&self) -> Component {
        Component::DirectMatch
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let profile = ctx.profile;
        let categories = &ctx.event.categories;
        let mut out = ComponentScore::default();

        let units = &profile.business_units;
        if !units.is_empty() {
            let matched = units
                .iter()
                .filter(|bu| categories.iter().any(|c| tags_overlap(&bu.name, c)))
                .count();
            out.add(
                "direct_match_business_units",
                fraction(matched, units.len(), BUSINESS_UNIT_WEIGHT),
                format!(
                    "{matched} of {} business units match event categories",
                    units.len()
                ),
            );
        }

        let concerns = &profile.areas_of_concern;
        if !concerns.is_empty() {
            let matched = concerns
                .iter()
                .filter(|a| categories.iter().any(|c| tags_overlap(&a.category, c)))
                .count();
            out.add(
                "direct_match_concerns",
                fraction(matched, concerns.len(), CONCERN_WEIGHT),
                format!(
                    "{matched} of {} areas of concern match event categories",
                    concerns.len()
                ),
            );
        }

        let regions = &profile.regions;
        if !regions.is_empty() {
            let event_regions: Vec<String> =
                ctx.event.regions.iter().map(|r| r.to_lowercase()).collect();
            let matched = regions
                .iter()
                .map(|r| r.trim().to_lowercase())
                .filter(|r| !r.is_empty() && event_regions.iter().any(|er| er.contains(r.as_str())))
                .count();
            out.add(
                "direct_match_regions",
                fraction(matched, regions.len(), REGION_WEIGHT),
                format!("{matched} of {} operating regions affected", regions.len()),
            );
        }

        out
    }
}
