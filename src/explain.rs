//! Confidence and rationale derived from the contributing factors.
//! Pure functions of the factor list: same factors in, same strings out.

use std::collections::BTreeSet;

use crate::scored::{ConfidenceLevel, ContributingFactor};

const TOP_FACTORS: usize = 3;

/// Family of a factor name: the part before the first `_`
/// (`business_unit_categories` → `business`).
pub fn factor_family(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

/// ≥4 distinct families with a non-zero factor → high, ≥2 → medium, else low.
pub fn confidence_level(factors: &[ContributingFactor]) -> ConfidenceLevel {
    let families: BTreeSet<&str> = factors
        .iter()
        .filter(|f| f.weight != 0.0)
        .map(|f| factor_family(&f.factor))
        .collect();

    match families.len() {
        n if n >= 4 => ConfidenceLevel::High,
        n if n >= 2 => ConfidenceLevel::Medium,
        _ => ConfidenceLevel::Low,
    }
}

/// `"Relevance score: 47.6%. Top factors: a; b; c (and 4 additional factors)"`.
/// Top factors are ordered by weight, descending; equal weights keep factor order.
pub fn rationale(score: f64, factors: &[ContributingFactor]) -> String {
    let mut ranked: Vec<&ContributingFactor> = factors.iter().collect();
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let top = ranked
        .iter()
        .take(TOP_FACTORS)
        .map(|f| f.description.as_str())
        .collect::<Vec<_>>();

    let mut out = format!("Relevance score: {:.1}%. Top factors: ", score * 100.0);
    if top.is_empty() {
        out.push_str("none");
    } else {
        out.push_str(&top.join("; "));
    }

    let extra = factors.len().saturating_sub(TOP_FACTORS);
    if extra > 0 {
        out.push_str(&format!(" (and {extra} additional factors)"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn f(name: &str, weight: f64, desc: &str) -> ContributingFactor {
        ContributingFactor {
            factor: name.into(),
            weight,
            description: desc.into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn family_is_prefix_before_first_separator() {
        assert_eq!(factor_family("business_unit_categories"), "business");
        assert_eq!(factor_family("industry_geopolitical"), "industry");
        assert_eq!(factor_family("plain"), "plain");
    }

    #[test]
    fn confidence_counts_distinct_families() {
        let one = vec![f("industry_a", 0.1, ""), f("industry_b", 0.2, "")];
        assert_eq!(confidence_level(&one), ConfidenceLevel::Low);

        let two = vec![f("industry_a", 0.1, ""), f("direct_match_regions", 0.2, "")];
        assert_eq!(confidence_level(&two), ConfidenceLevel::Medium);

        let four = vec![
            f("industry_a", 0.1, ""),
            f("direct_match_regions", 0.2, ""),
            f("geographic_related_regions", 0.1, ""),
            f("business_unit_categories", 0.1, ""),
        ];
        assert_eq!(confidence_level(&four), ConfidenceLevel::High);
    }

    #[test]
    fn zero_weight_factors_do_not_count() {
        let v = vec![f("industry_a", 0.1, ""), f("direct_match_regions", 0.0, "")];
        assert_eq!(confidence_level(&v), ConfidenceLevel::Low);
        assert_eq!(confidence_level(&[]), ConfidenceLevel::Low);
    }

    #[test]
    fn rationale_lists_top_three_by_weight() {
        let v = vec![
            f("a_x", 0.1, "low"),
            f("b_x", 0.4, "highest"),
            f("c_x", 0.3, "second"),
            f("d_x", 0.2, "third"),
            f("e_x", 0.05, "lowest"),
        ];
        assert_eq!(
            rationale(0.4567, &v),
            "Relevance score: 45.7%. Top factors: highest; second; third (and 2 additional factors)"
        );
    }

    #[test]
    fn rationale_without_overflow_suffix() {
        let v = vec![f("a_x", 0.1, "only")];
        assert_eq!(rationale(1.0, &v), "Relevance score: 100.0%. Top factors: only");
    }

    #[test]
    fn rationale_ties_keep_input_order() {
        let v = vec![f("a_x", 0.2, "first"), f("b_x", 0.2, "second")];
        assert_eq!(
            rationale(0.5, &v),
            "Relevance score: 50.0%. Top factors: first; second"
        );
    }

    #[test]
    fn rationale_empty() {
        assert_eq!(rationale(0.0, &[]), "Relevance score: 0.0%. Top factors: none");
    }
}
