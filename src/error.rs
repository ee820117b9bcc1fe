//! Error types for configuration loading and scoring calls.

use std::path::PathBuf;
use thiserror::Error;

/// Start-up configuration failure. Fatal at boot; on hot reload the old engine is kept.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scoring config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid intelligence table `{table}`: {source}")]
    Table {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("global weights must sum to 1.0 (±0.01), got {sum:.4}")]
    WeightSum { sum: f64 },

    #[error("weight `{name}` must be finite and non-negative, got {value}")]
    Weight { name: &'static str, value: f64 },

    #[error(
        "thresholds must satisfy 0 <= minimum ({minimum}) < medium ({medium}) < high ({high}) <= 1"
    )]
    Thresholds { minimum: f64, medium: f64, high: f64 },

    #[error("multiplier `{name}` must be finite and non-negative, got {value}")]
    Multiplier { name: &'static str, value: f64 },

    #[error("{kind} multipliers must be non-increasing from {stronger} to {weaker}")]
    MultiplierOrder {
        kind: &'static str,
        stronger: &'static str,
        weaker: &'static str,
    },
}

/// Per-call contract violation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
