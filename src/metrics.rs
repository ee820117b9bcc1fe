// src/metrics.rs
use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const REQUESTS_TOTAL: &str = "relevance_requests_total";
pub const EVENTS_SCORED_TOTAL: &str = "relevance_events_scored_total";
pub const EVENTS_RETURNED_TOTAL: &str = "relevance_events_returned_total";
pub const BATCH_DURATION_MS: &str = "relevance_batch_duration_ms";
pub const MINIMUM_SCORE: &str = "relevance_minimum_score";

// The global recorder can only be installed once per process.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (first call only) and describe the series.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Router exposing `/metrics` in the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!(REQUESTS_TOTAL, "HTTP requests handled, by route.");
    describe_counter!(EVENTS_SCORED_TOTAL, "Events offered to the relevance engine.");
    describe_counter!(
        EVENTS_RETURNED_TOTAL,
        "Scored events returned to callers after all thresholds."
    );
    describe_histogram!(BATCH_DURATION_MS, "Wall time of one scoring batch in milliseconds.");
    describe_gauge!(MINIMUM_SCORE, "Engine floor of the active relevance engine.");
}

// Recording helpers. Without an installed recorder these are no-ops.

pub fn record_request(route: &'static str) {
    counter!(REQUESTS_TOTAL, "route" => route).increment(1);
}

pub fn record_batch(scored: usize, returned: usize, elapsed_ms: f64, minimum_score: f64) {
    counter!(EVENTS_SCORED_TOTAL).increment(scored as u64);
    counter!(EVENTS_RETURNED_TOTAL).increment(returned as u64);
    histogram!(BATCH_DURATION_MS).record(elapsed_ms);
    gauge!(MINIMUM_SCORE).set(minimum_score);
}
