//! Geo-risk relevance service: binary entrypoint.
//! Boots the Axum HTTP server, wiring the relevance engine, store, metrics and middleware.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use geo_risk_relevance::api::{self, AppState};
use geo_risk_relevance::config::config_path_from_env;
use geo_risk_relevance::metrics::Metrics;
use geo_risk_relevance::relevance::{start_hot_reload_thread, RelevanceEngine, RelevanceHandle};
use geo_risk_relevance::store::Store;

/// Compact logs, filtered by `RUST_LOG`. Shuttle may already have installed a
/// subscriber, in which case ours is skipped.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("geo_risk_relevance=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    // Start-up config errors are fatal.
    let engine = RelevanceEngine::from_env().context("failed to initialise relevance engine")?;
    let handle = RelevanceHandle::new(engine);

    // If hot reload is enabled, spawn background watcher
    start_hot_reload_thread(handle.clone(), config_path_from_env());

    let store = Store::from_env().context("failed to load seed store")?;
    let metrics = Metrics::init()?;

    let state = AppState::new(handle, store).with_metrics(metrics);
    let router = api::router(state);

    info!("geo-risk relevance service ready");
    Ok(router.into())
}
