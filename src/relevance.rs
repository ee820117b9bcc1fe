// src/relevance.rs
//! Relevance engine: runs the five component scorers per event, combines, boosts,
//! filters and ranks. Plus a thread-safe handle that swaps whole engines on reload.
//!
//! Scoring is a pure function of `(Profile, Event, tables, config)`. The only value
//! that differs between two identical calls is the `last_updated` timestamp.

use anyhow::Context;
use chrono::Utc;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

use crate::analytics::{scoring_analytics, RelevanceBands, ScoringAnalytics};
use crate::combine::{boost, combine, passes_threshold, ComponentScores};
use crate::config::ScoringConfig;
use crate::error::{ConfigError, ScoringError};
use crate::intelligence::IntelligenceTables;
use crate::model::{Event, Profile};
use crate::scored::{ContributingFactor, ScoreBreakdown, ScoredEvent, ScoredEventBuilder};
use crate::scorers::{ScoringContext, BUILTIN_SCORERS};
use crate::text::{EventText, KeywordMatcher};

/// Batches at least this large are scored on the rayon pool.
pub const PARALLEL_MIN_BATCH: usize = 256;

const HOT_RELOAD_POLL: Duration = Duration::from_secs(2);

// Dev env: debug build OR SHUTTLE_ENV in {local, development, dev}
fn is_dev_env() -> bool {
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

// Dev logging gate: RELEVANCE_DEV_LOG=1 AND dev env
pub(crate) fn dev_logging_enabled() -> bool {
    std::env::var("RELEVANCE_DEV_LOG").ok().as_deref() == Some("1") && is_dev_env()
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

/// Minimal, anonymized dev logger for per-event outcomes.
fn dev_log_relevance(
    outcome: &str,
    event: &Event,
    factors: &[ContributingFactor],
    score: f64,
    threshold: f64,
) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(&event.title);
    let names: Vec<&str> = factors.iter().map(|f| f.factor.as_str()).collect();
    let factors_short = truncate_vec(&names, 5);
    // Never log raw text. Only hashed id + short lists.
    info!(
        target: "relevance",
        %id, %score, %threshold, outcome,
        factors = ?factors_short
    );
}

#[derive(Debug)]
pub struct RelevanceEngine {
    cfg: ScoringConfig,
    tables: Arc<IntelligenceTables>,
    matcher: KeywordMatcher,
}

impl RelevanceEngine {
    /// Validate `cfg` and pair it with `tables`.
    pub fn new(cfg: ScoringConfig, tables: Arc<IntelligenceTables>) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let (industries, regions, units, correlations) = tables.sizes();
        info!(
            minimum_score = cfg.scoring.minimum_score,
            match_mode = ?cfg.scoring.match_mode,
            industries, regions, units, correlations,
            "relevance engine ready"
        );
        let matcher = KeywordMatcher::new(cfg.scoring.match_mode);
        Ok(Self {
            cfg,
            tables,
            matcher,
        })
    }

    /// Built-in config and tables.
    pub fn with_defaults() -> Self {
        let cfg = ScoringConfig::default();
        let matcher = KeywordMatcher::new(cfg.scoring.match_mode);
        Self {
            cfg,
            tables: IntelligenceTables::builtin(),
            matcher,
        }
    }

    /// Tables come from `cfg.scoring.intelligence_dir` when set, else the built-in ones.
    pub fn from_config(cfg: ScoringConfig) -> Result<Self, ConfigError> {
        let tables = match &cfg.scoring.intelligence_dir {
            Some(dir) => {
                let t = IntelligenceTables::from_dir(dir)?;
                info!(dir = %dir.display(), "loaded intelligence tables");
                Arc::new(t)
            }
            None => IntelligenceTables::builtin(),
        };
        Self::new(cfg, tables)
    }

    /// Config from env/file (see `ScoringConfig::from_env`), then tables.
    pub fn from_env() -> anyhow::Result<Self> {
        let cfg = ScoringConfig::from_env().context("failed to load scoring config")?;
        Self::from_config(cfg).context("failed to build relevance engine")
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.cfg
    }

    pub fn tables(&self) -> &IntelligenceTables {
        &self.tables
    }

    pub fn minimum_score(&self) -> f64 {
        self.cfg.scoring.minimum_score
    }

    pub fn bands(&self) -> RelevanceBands {
        RelevanceBands {
            medium: self.cfg.scoring.medium_relevance,
            high: self.cfg.scoring.high_relevance,
        }
    }

    /// Score one event without applying the threshold.
    pub fn score_event(&self, profile: &Profile, event: &Event) -> ScoredEvent {
        let text = EventText::new(event);
        let ctx = ScoringContext {
            profile,
            event,
            text: &text,
            tables: &self.tables,
            matcher: self.matcher,
        };

        let mut components = ComponentScores::default();
        let mut builder = ScoredEventBuilder::new(event, Utc::now());
        for scorer in BUILTIN_SCORERS.iter() {
            let c = scorer.score(&ctx);
            components.set(scorer.component(), c.score);
            builder = builder.factors(c.factors);
        }

        let combined = combine(&components, &self.cfg.weights);
        let boosted = boost(combined, event.severity, event.timeframe(), &self.cfg.boost);

        builder
            .breakdown(ScoreBreakdown {
                direct_match: components.direct_match,
                industry: components.industry,
                geographic: components.geographic,
                business_unit: components.business_unit,
                risk_correlation: components.risk_correlation,
                combined,
                severity_multiplier: boosted.severity_multiplier,
                recency_multiplier: boosted.recency_multiplier,
            })
            .build(boosted.score)
    }

    /// Score one event; `None` when it falls below the engine floor or nothing matched.
    /// A zero floor never lets a factorless event through.
    pub fn evaluate(&self, profile: &Profile, event: &Event) -> Option<ScoredEvent> {
        let scored = self.score_event(profile, event);
        let threshold = self.minimum_score();
        let score = scored.relevance_score();

        if passes_threshold(score, threshold) && !scored.contributing_factors().is_empty() {
            dev_log_relevance("passed", event, scored.contributing_factors(), score, threshold);
            Some(scored)
        } else {
            dev_log_relevance("filtered", event, scored.contributing_factors(), score, threshold);
            None
        }
    }

    /// Score, filter and rank a batch. Sorted by score descending; equal scores keep
    /// their input order.
    pub fn score_events(&self, profile: &Profile, events: &[Event]) -> Vec<ScoredEvent> {
        let mut out = if events.len() >= PARALLEL_MIN_BATCH {
            self.evaluate_parallel(profile, events)
        } else {
            events
                .iter()
                .filter_map(|e| self.evaluate(profile, e))
                .collect::<Vec<_>>()
        };
        // `sort_by` is stable.
        out.sort_by(|a, b| b.relevance_score().total_cmp(&a.relevance_score()));
        out
    }

    /// Rayon fan-out; `collect` keeps input order.
    fn evaluate_parallel(&self, profile: &Profile, events: &[Event]) -> Vec<ScoredEvent> {
        events
            .par_iter()
            .filter_map(|e| self.evaluate(profile, e))
            .collect()
    }

    /// Entry point for loosely-typed callers (JSON bodies) where the profile or the
    /// event list may be absent. Absence is a contract violation, not a zero score.
    pub fn score_batch(
        &self,
        profile: Option<&Profile>,
        events: Option<&[Event]>,
    ) -> Result<Vec<ScoredEvent>, ScoringError> {
        let profile =
            profile.ok_or_else(|| ScoringError::InvalidInput("profile is required".into()))?;
        let events =
            events.ok_or_else(|| ScoringError::InvalidInput("events are required".into()))?;
        Ok(self.score_events(profile, events))
    }

    /// Aggregate a scored batch using this engine's relevance bands.
    pub fn analytics(&self, scored: &[ScoredEvent]) -> ScoringAnalytics {
        scoring_analytics(scored, self.bands())
    }
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// Shared handle to the current engine. Readers take an `Arc` snapshot per batch, so a
/// reload swaps the whole engine between batches and never mid-batch.
#[derive(Clone, Debug)]
pub struct RelevanceHandle {
    inner: Arc<RwLock<Arc<RelevanceEngine>>>,
}

impl RelevanceHandle {
    pub fn new(engine: RelevanceEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    pub fn snapshot(&self) -> Arc<RelevanceEngine> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn swap(&self, engine: RelevanceEngine) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(engine);
    }

    /// Rebuild from env/file and swap. On failure the current engine stays in place.
    pub fn reload(&self) -> anyhow::Result<()> {
        let engine = RelevanceEngine::from_env()?;
        self.swap(engine);
        Ok(())
    }
}

/// Returns true if we should enable hot reload (dev/local only).
fn hot_reload_enabled() -> bool {
    let want = std::env::var("RELEVANCE_HOT_RELOAD")
        .ok()
        .map(|v| v == "1")
        .unwrap_or(false);
    want && is_dev_env()
}

/// Start a simple polling watcher on `path`; a newer mtime triggers `handle.reload()`.
pub fn start_hot_reload_thread(handle: RelevanceHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }
    info!(path = %path.display(), "relevance hot reload enabled");

    thread::spawn(move || {
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            // File missing or unreadable; keep trying.
            if let Ok(mtime) = fs::metadata(&path).and_then(|m| m.modified()) {
                let changed = last_mtime.is_some_and(|prev| mtime > prev);
                if changed {
                    match handle.reload() {
                        Ok(()) => info!(path = %path.display(), "relevance engine reloaded"),
                        Err(e) => warn!(error = ?e, "reload failed, keeping current engine"),
                    }
                }
                last_mtime = Some(mtime);
            }
            thread::sleep(HOT_RELOAD_POLL);
        }
    });
}

/* ----------------------------
Tests
---------------------------- */
