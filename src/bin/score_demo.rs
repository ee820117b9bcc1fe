//! Demo: score the seed store's active events for one profile and print the ranking.
//!
//! Usage: `cargo run --bin score_demo -- [profile-id]` (default: first profile in the seed).

use anyhow::{anyhow, Context};
use geo_risk_relevance::relevance::RelevanceEngine;
use geo_risk_relevance::store::Store;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let engine = RelevanceEngine::from_env()?;
    let store = Store::from_env()?;

    let id = match std::env::args().nth(1) {
        Some(id) => id,
        None => store
            .profile_ids()
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("seed store has no profiles"))?,
    };
    let profile = store
        .profile(&id)
        .with_context(|| format!("profile {id:?} not found"))?;

    let events = store.active_events();
    let scored = engine.score_events(profile, &events);

    println!("profile {id}: {} of {} active events relevant", scored.len(), events.len());
    for (rank, s) in scored.iter().enumerate() {
        println!(
            "{:>2}. {:.3} [{:?}] {}",
            rank + 1,
            s.relevance_score(),
            s.confidence_level(),
            s.event().title
        );
        println!("    {}", s.rationale());
    }

    let a = engine.analytics(&scored);
    println!(
        "high={} medium={} low={} avg={:.3}",
        a.score_distribution.high, a.score_distribution.medium, a.score_distribution.low, a.average_score
    );
    Ok(())
}
