// src/config/scoring.rs
//! Scoring configuration (TOML): global component weights, severity/recency boosts,
//! thresholds and keyword match mode.
//!
//! ```toml
//! [scoring]
//! minimum_score = 0.05
//! medium_relevance = 0.4
//! high_relevance = 0.7
//! match_mode = "substring"      # or "word_boundary"
//!
//! [weights]
//! direct_match = 0.35
//! industry = 0.25
//! geographic = 0.20
//! business_unit = 0.15
//! risk_correlation = 0.05
//!
//! [boost.severity]
//! critical = 1.5
//! high = 1.3
//! medium = 1.0
//! low = 0.7
//!
//! [boost.recency]
//! immediate = 1.4
//! short_term = 1.2
//! medium_term = 1.0
//! long_term = 0.8
//! ```
//!
//! Every section and key is optional; missing values fall back to the defaults above.
//! Validation runs once at load. A config that fails it never reaches the engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ConfigError;
use crate::model::{Severity, Timeframe};
use crate::text::MatchMode;

// --- env defaults & names ---
pub const DEFAULT_RELEVANCE_CONFIG_PATH: &str = "config/relevance.toml";

pub const ENV_RELEVANCE_CONFIG_PATH: &str = "RELEVANCE_CONFIG_PATH";
pub const ENV_RELEVANCE_MIN_SCORE: &str = "RELEVANCE_MIN_SCORE";
pub const ENV_RELEVANCE_INTELLIGENCE_DIR: &str = "RELEVANCE_INTELLIGENCE_DIR";

const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub scoring: ScoringSection,
    #[serde(default)]
    pub weights: ComponentWeights,
    #[serde(default)]
    pub boost: BoostConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Engine floor: events below this boosted score are dropped.
    pub minimum_score: f64,
    /// Lower bound of the "medium" analytics bucket.
    pub medium_relevance: f64,
    /// Lower bound of the "high" analytics bucket.
    pub high_relevance: f64,
    pub match_mode: MatchMode,
    /// Directory holding `industry.json`, `geographic.json`, `business_units.json`,
    /// `risk_correlations.json`. `None` → tables compiled into the binary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence_dir: Option<PathBuf>,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            minimum_score: 0.05,
            medium_relevance: 0.4,
            high_relevance: 0.7,
            match_mode: MatchMode::Substring,
            intelligence_dir: None,
        }
    }
}

/// Global weights applied to the five component scores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub direct_match: f64,
    pub industry: f64,
    pub geographic: f64,
    pub business_unit: f64,
    pub risk_correlation: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            direct_match: 0.35,
            industry: 0.25,
            geographic: 0.20,
            business_unit: 0.15,
            risk_correlation: 0.05,
        }
    }
}

impl ComponentWeights {
    pub fn sum(&self) -> f64 {
        self.direct_match + self.industry + self.geographic + self.business_unit + self.risk_correlation
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("direct_match", self.direct_match),
            ("industry", self.industry),
            ("geographic", self.geographic),
            ("business_unit", self.business_unit),
            ("risk_correlation", self.risk_correlation),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    #[serde(default)]
    pub severity: SeverityBoost,
    #[serde(default)]
    pub recency: RecencyBoost,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityBoost {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for SeverityBoost {
    fn default() -> Self {
        Self {
            critical: 1.5,
            high: 1.3,
            medium: 1.0,
            low: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyBoost {
    pub immediate: f64,
    pub short_term: f64,
    pub medium_term: f64,
    pub long_term: f64,
}

impl Default for RecencyBoost {
    fn default() -> Self {
        Self {
            immediate: 1.4,
            short_term: 1.2,
            medium_term: 1.0,
            long_term: 0.8,
        }
    }
}

impl BoostConfig {
    /// Missing or unrecognized severity → 1.0.
    pub fn severity_multiplier(&self, severity: Option<Severity>) -> f64 {
        match severity {
            Some(Severity::Critical) => self.severity.critical,
            Some(Severity::High) => self.severity.high,
            Some(Severity::Medium) => self.severity.medium,
            Some(Severity::Low) => self.severity.low,
            Some(Severity::Unknown) | None => 1.0,
        }
    }

    /// Missing or unrecognized timeframe → 1.0.
    pub fn recency_multiplier(&self, timeframe: Option<Timeframe>) -> f64 {
        match timeframe {
            Some(Timeframe::Immediate) => self.recency.immediate,
            Some(Timeframe::ShortTerm) => self.recency.short_term,
            Some(Timeframe::MediumTerm) => self.recency.medium_term,
            Some(Timeframe::LongTerm) => self.recency.long_term,
            Some(Timeframe::Unknown) | None => 1.0,
        }
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_score_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

/// Config file path: `RELEVANCE_CONFIG_PATH` or `config/relevance.toml`.
pub fn config_path_from_env() -> PathBuf {
    std::env::var(ENV_RELEVANCE_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_RELEVANCE_CONFIG_PATH))
}

impl ScoringConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let cfg: ScoringConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config from the environment:
    /// 1. `RELEVANCE_CONFIG_PATH` must point at a readable file if set.
    /// 2. Otherwise `config/relevance.toml` if present, else built-in defaults.
    /// 3. `RELEVANCE_MIN_SCORE` and `RELEVANCE_INTELLIGENCE_DIR` override the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let explicit = std::env::var(ENV_RELEVANCE_CONFIG_PATH).is_ok();
        let path = config_path_from_env();

        let mut cfg = if explicit || path.exists() {
            let cfg = Self::from_path(&path)?;
            info!(path = %path.display(), "loaded scoring config");
            cfg
        } else {
            info!("no scoring config file found, using built-in defaults");
            Self::default()
        };

        if let Some(min) = parse_score_env(std::env::var(ENV_RELEVANCE_MIN_SCORE).ok()) {
            cfg.scoring.minimum_score = min;
        }
        if let Ok(dir) = std::env::var(ENV_RELEVANCE_INTELLIGENCE_DIR) {
            if !dir.trim().is_empty() {
                cfg.scoring.intelligence_dir = Some(PathBuf::from(dir));
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every start-up invariant; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.weights.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Weight { name, value });
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }

        let s = &self.scoring;
        let ordered = s.minimum_score >= 0.0
            && s.minimum_score < s.medium_relevance
            && s.medium_relevance < s.high_relevance
            && s.high_relevance <= 1.0;
        if !ordered {
            return Err(ConfigError::Thresholds {
                minimum: s.minimum_score,
                medium: s.medium_relevance,
                high: s.high_relevance,
            });
        }

        let sev = &self.boost.severity;
        let rec = &self.boost.recency;
        for (name, value) in [
            ("severity.critical", sev.critical),
            ("severity.high", sev.high),
            ("severity.medium", sev.medium),
            ("severity.low", sev.low),
            ("recency.immediate", rec.immediate),
            ("recency.short_term", rec.short_term),
            ("recency.medium_term", rec.medium_term),
            ("recency.long_term", rec.long_term),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Multiplier { name, value });
            }
        }

        check_order(
            "severity",
            &[
                ("critical", sev.critical),
                ("high", sev.high),
                ("medium", sev.medium),
                ("low", sev.low),
            ],
        )?;
        check_order(
            "recency",
            &[
                ("immediate", rec.immediate),
                ("short_term", rec.short_term),
                ("medium_term", rec.medium_term),
                ("long_term", rec.long_term),
            ],
        )?;

        Ok(())
    }
}

fn check_order(kind: &'static str, ladder: &[(&'static str, f64)]) -> Result<(), ConfigError> {
    for pair in ladder.windows(2) {
        let (stronger, a) = pair[0];
        let (weaker, b) = pair[1];
        if a < b {
            return Err(ConfigError::MultiplierOrder {
                kind,
                stronger,
                weaker,
            });
        }
    }
    Ok(())
}
