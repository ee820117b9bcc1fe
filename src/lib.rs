// src/lib.rs
// Public library surface for the binary, the demo and integration tests.

pub mod analytics;
pub mod combine;
pub mod config;
pub mod error;
pub mod explain;
pub mod intelligence;
pub mod model;
pub mod relevance;
pub mod scored;
pub mod scorers;
pub mod text;

// Service layer: store, HTTP, metrics
pub mod api;
pub mod metrics;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::config::ScoringConfig;
pub use crate::error::{ConfigError, ScoringError};
pub use crate::model::{Event, Profile};
pub use crate::relevance::{RelevanceEngine, RelevanceHandle};
pub use crate::scored::{ConfidenceLevel, ContributingFactor, ScoredEvent};
