// tests/analytics.rs
// Aggregation over engine output: bucket and confidence counts always add up.

use geo_risk_relevance::analytics::{scoring_analytics, RelevanceBands};
use geo_risk_relevance::model::{AreaOfConcern, BusinessUnit, Event, Priority, Profile, Severity};
use geo_risk_relevance::relevance::RelevanceEngine;
use rand::{rngs::StdRng, Rng, SeedableRng};

const CATEGORIES: &[&str] = &["Trade", "Technology", "Cyber", "Energy", "Conflict", "Sports"];
const REGIONS: &[&str] = &["Asia-Pacific", "Europe", "Middle East", "Antarctica"];
const WORDS: &[&str] = &["china", "tariff", "port", "sanctions", "oil", "taiwan", "parade"];

fn profile() -> Profile {
    Profile {
        id: "acme".into(),
        industry: "technology".into(),
        business_units: vec![BusinessUnit::named("semiconductor"), BusinessUnit::named("energy")],
        areas_of_concern: vec![
            AreaOfConcern::new("trade disputes", Priority::High),
            AreaOfConcern::new("cyber attacks", Priority::Medium),
        ],
        regions: vec!["asia-pacific".into(), "europe".into()],
        risk_tolerance: None,
    }
}

fn events(seed: u64, n: usize) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| Event {
            id: format!("e{i}"),
            title: (0..3)
                .map(|_| WORDS[rng.random_range(0..WORDS.len())])
                .collect::<Vec<_>>()
                .join(" "),
            categories: vec![CATEGORIES[rng.random_range(0..CATEGORIES.len())].into()],
            regions: vec![REGIONS[rng.random_range(0..REGIONS.len())].into()],
            severity: Some(Severity::Critical),
            ..Default::default()
        })
        .collect()
}

#[test]
fn distributions_sum_to_total() {
    let eng = RelevanceEngine::with_defaults();
    for seed in 0..10 {
        let scored = eng.score_events(&profile(), &events(seed, 40));
        let a = eng.analytics(&scored);

        assert_eq!(a.total_events, scored.len());
        assert_eq!(a.score_distribution.total(), a.total_events);
        assert_eq!(a.confidence_distribution.total(), a.total_events);

        let factor_total: usize = scored.iter().map(|s| s.contributing_factors().len()).sum();
        assert_eq!(a.factor_frequency.values().sum::<usize>(), factor_total);
        assert!(a.top_factors.len() <= 10);
        for w in a.top_factors.windows(2) {
            assert!(w[0].count >= w[1].count);
        }
    }
}

#[test]
fn buckets_follow_configured_bands() {
    let eng = RelevanceEngine::with_defaults();
    let scored = eng.score_events(&profile(), &events(42, 60));

    let a = scoring_analytics(&scored, RelevanceBands::default());
    let high = scored.iter().filter(|s| s.relevance_score() >= 0.7).count();
    let low = scored.iter().filter(|s| s.relevance_score() < 0.4).count();
    assert_eq!(a.score_distribution.high, high);
    assert_eq!(a.score_distribution.low, low);
    assert_eq!(a.score_distribution.medium, scored.len() - high - low);

    // Everything counts as low once the bands are out of reach.
    let strict = scoring_analytics(&scored, RelevanceBands { medium: 1.1, high: 1.2 });
    assert_eq!(strict.score_distribution.low, scored.len());
}

#[test]
fn analytics_serializes_camel_case() {
    let eng = RelevanceEngine::with_defaults();
    let scored = eng.score_events(&profile(), &events(1, 10));
    let v = serde_json::to_value(eng.analytics(&scored)).unwrap();
    for key in [
        "totalEvents",
        "averageScore",
        "scoreDistribution",
        "confidenceDistribution",
        "factorFrequency",
        "topFactors",
    ] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
}
