//! Runtime configuration.

pub mod scoring;

pub use scoring::{
    config_path_from_env, BoostConfig, ComponentWeights, RecencyBoost, ScoringConfig,
    ScoringSection, SeverityBoost, DEFAULT_RELEVANCE_CONFIG_PATH, ENV_RELEVANCE_CONFIG_PATH,
    ENV_RELEVANCE_INTELLIGENCE_DIR, ENV_RELEVANCE_MIN_SCORE,
};
