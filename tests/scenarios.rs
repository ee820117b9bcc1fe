// tests/scenarios.rs
// Hand-picked end-to-end scenarios against the built-in intelligence tables.

use geo_risk_relevance::model::{
    AreaOfConcern, BusinessUnit, Event, PredictiveAnalytics, Priority, Profile, Severity,
    Timeframe,
};
use geo_risk_relevance::relevance::RelevanceEngine;
use geo_risk_relevance::ConfidenceLevel;

fn profile() -> Profile {
    Profile {
        id: "acme".into(),
        industry: "technology".into(),
        business_units: vec![BusinessUnit::named("semiconductor")],
        areas_of_concern: vec![AreaOfConcern::new("trade disputes", Priority::High)],
        regions: vec!["asia-pacific".into()],
        risk_tolerance: None,
    }
}

fn trade_event() -> Event {
    Event {
        id: "evt-trade".into(),
        title: "US-China Trade Tensions Escalate".into(),
        categories: vec!["Trade".into(), "Technology".into()],
        regions: vec!["Asia-Pacific".into()],
        severity: Some(Severity::High),
        ..Default::default()
    }
}

fn krill_event() -> Event {
    Event {
        id: "evt-krill".into(),
        title: "Seasonal krill survey published".into(),
        categories: vec!["Agriculture".into()],
        regions: vec!["Antarctica".into()],
        severity: Some(Severity::Low),
        ..Default::default()
    }
}

#[test]
fn trade_tensions_are_relevant_to_a_chip_maker() {
    let eng = RelevanceEngine::with_defaults();
    let scored = eng.score_event(&profile(), &trade_event());

    // 0.35*0.6 + 0.25*(1/6*0.3 + 2/6*0.4) + 0.20*0.11 + 0.15*0.22 + 0.05*1.1, then *1.3
    let expected = (0.21 + 0.045_833_333 + 0.022 + 0.033 + 0.055) * 1.3;
    assert!(
        (scored.relevance_score() - expected).abs() < 1e-6,
        "got {}",
        scored.relevance_score()
    );
    assert!(scored.relevance_score() > 0.3);
    assert!(scored
        .contributing_factors()
        .iter()
        .any(|f| f.factor.starts_with("business_unit_") || f.factor.starts_with("industry_")));
    assert_eq!(scored.confidence_level(), ConfidenceLevel::High);
    assert!(scored.rationale().starts_with("Relevance score: 47.6%. Top factors: "));

    let ranked = eng.score_events(&profile(), &[trade_event()]);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].event().id, "evt-trade");
}

#[test]
fn unrelated_event_is_absent_not_low() {
    let eng = RelevanceEngine::with_defaults();
    let scored = eng.score_event(&profile(), &krill_event());
    assert!(scored.relevance_score() < 0.05);
    assert!(scored.contributing_factors().is_empty());
    assert!(scored.rationale().ends_with("Top factors: none"));

    let ranked = eng.score_events(&profile(), &[krill_event(), trade_event()]);
    assert_eq!(ranked.len(), 1);
    assert!(ranked.iter().all(|s| s.event().id != "evt-krill"));
}

#[test]
fn imminent_events_outrank_distant_ones() {
    let eng = RelevanceEngine::with_defaults();
    let with_timeframe = |id: &str, tf: Timeframe| Event {
        id: id.into(),
        predictive_analytics: Some(PredictiveAnalytics { timeframe: Some(tf) }),
        severity: Some(Severity::Medium),
        ..trade_event()
    };
    let events = vec![
        with_timeframe("long", Timeframe::LongTerm),
        with_timeframe("now", Timeframe::Immediate),
        with_timeframe("soon", Timeframe::ShortTerm),
    ];
    let ids: Vec<String> = eng
        .score_events(&profile(), &events)
        .into_iter()
        .map(|s| s.event().id.clone())
        .collect();
    assert_eq!(ids, ["now", "soon", "long"]);
}

#[test]
fn breakdown_explains_the_final_score() {
    let eng = RelevanceEngine::with_defaults();
    let s = eng.score_event(&profile(), &trade_event());
    let b = s.breakdown();

    let w = &eng.config().weights;
    let combined = b.direct_match * w.direct_match
        + b.industry * w.industry
        + b.geographic * w.geographic
        + b.business_unit * w.business_unit
        + b.risk_correlation * w.risk_correlation;
    assert!((combined - b.combined).abs() < 1e-12);
    let boosted = (b.combined * b.severity_multiplier * b.recency_multiplier).clamp(0.0, 1.0);
    assert!((boosted - s.relevance_score()).abs() < 1e-12);
}

#[test]
fn unknown_industry_and_units_are_not_errors() {
    let eng = RelevanceEngine::with_defaults();
    let p = Profile {
        industry: "interplanetary mining".into(),
        business_units: vec![BusinessUnit::named("asteroid ops")],
        regions: vec!["kuiper belt".into()],
        ..Default::default()
    };
    let s = eng.score_event(&p, &trade_event());
    let b = s.breakdown();
    assert_eq!(b.industry, 0.0);
    assert_eq!(b.geographic, 0.0);
    assert_eq!(b.business_unit, 0.0);
    assert!(s.relevance_score().is_finite());
}

#[test]
fn custom_tables_cover_new_domains() {
    use geo_risk_relevance::config::ScoringConfig;
    use geo_risk_relevance::intelligence::{
        BusinessUnitIntel, IndustryIntel, IntelligenceTables, RegionIntel, RiskCorrelation,
    };

    let kw = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let tables = IntelligenceTables::default()
        .with_industry(
            "Mining",
            IndustryIntel {
                supply_chain_risks: kw(&["Cobalt", "smelter"]),
                ..Default::default()
            },
        )
        .with_region(
            "Africa",
            RegionIntel {
                related_regions: kw(&["congo"]),
                ..Default::default()
            },
        )
        .with_business_unit(
            "Extraction",
            BusinessUnitIntel {
                related_categories: kw(&["Labor"]),
                ..Default::default()
            },
        )
        .with_correlation(
            "Labor",
            RiskCorrelation {
                related_risks: kw(&["strikes"]),
                industry_impact: kw(&["Mining"]),
            },
        );
    let eng = RelevanceEngine::new(ScoringConfig::default(), std::sync::Arc::new(tables)).unwrap();

    let p = Profile {
        industry: "mining".into(),
        business_units: vec![BusinessUnit::named("extraction")],
        areas_of_concern: vec![AreaOfConcern::new("strikes", Priority::High)],
        regions: vec!["africa".into()],
        ..Default::default()
    };
    let ev = Event {
        title: "Cobalt smelter strike spreads across Congo".into(),
        categories: vec!["Labor".into()],
        severity: Some(Severity::High),
        ..Default::default()
    };
    let s = eng.score_event(&p, &ev);
    let b = s.breakdown();
    assert!((b.industry - 0.3).abs() < 1e-9, "industry {}", b.industry);
    assert!((b.geographic - 0.4).abs() < 1e-9, "geographic {}", b.geographic);
    assert!((b.business_unit - 0.4).abs() < 1e-9, "business unit {}", b.business_unit);
    assert!((b.risk_correlation - 0.8).abs() < 1e-9, "correlation {}", b.risk_correlation);
    assert!(eng.evaluate(&p, &ev).is_some());

    // The built-in tables know nothing about mining.
    let builtin = RelevanceEngine::with_defaults().score_event(&p, &ev);
    assert_eq!(builtin.breakdown().industry, 0.0);
}

#[test]
fn word_boundary_mode_stops_partial_word_hits() {
    use geo_risk_relevance::config::ScoringConfig;
    use geo_risk_relevance::intelligence::{IndustryIntel, IntelligenceTables};
    use geo_risk_relevance::text::MatchMode;
    use std::sync::Arc;

    let tables = Arc::new(IntelligenceTables::default().with_industry(
        "retail",
        IndustryIntel {
            geopolitical_risks: vec!["war".into()],
            ..Default::default()
        },
    ));
    let p = Profile {
        industry: "retail".into(),
        ..Default::default()
    };
    let ev = Event {
        title: "New warehouse opens in Rotterdam".into(),
        ..Default::default()
    };

    let substring = RelevanceEngine::new(ScoringConfig::default(), Arc::clone(&tables)).unwrap();
    assert!(substring.score_event(&p, &ev).breakdown().industry > 0.0);

    let mut cfg = ScoringConfig::default();
    cfg.scoring.match_mode = MatchMode::WordBoundary;
    let strict = RelevanceEngine::new(cfg, tables).unwrap();
    assert_eq!(strict.score_event(&p, &ev).breakdown().industry, 0.0);
}
